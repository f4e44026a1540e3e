use clap::{Parser, Subcommand};
use sentence_gen::parser::parse_assignment;
use sentence_gen::{Grammar, GrammarConfig, GrammarError, defaults, utils};
use std::path::PathBuf;

/// Random sentence generator for context-free grammars
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rules file with one `<name> ::= alternatives` per line
    #[arg(short, long, value_name = "FILE")]
    grammar: Option<PathBuf>,

    /// Start from an empty grammar instead of the built-in one
    #[arg(long)]
    no_defaults: bool,

    /// Override a single rule, e.g. '<noun>=cat, mouse'
    #[arg(short, long = "rule", value_name = "RULE")]
    rules: Vec<String>,

    /// Comma separated nouns
    #[arg(long)]
    nouns: Option<String>,

    /// Comma separated verbs
    #[arg(long)]
    verbs: Option<String>,

    /// Comma separated prepositions
    #[arg(long)]
    preps: Option<String>,

    /// Comma separated articles
    #[arg(long)]
    articles: Option<String>,

    /// The starting non-terminal symbol
    #[arg(short, long, value_name = "SYMBOL")]
    start: Option<String>,

    /// Number of sentences to generate
    #[arg(short = 'n', long, default_value = "1")]
    count: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Give up once expansion nests this deep (0 disables the guard)
    #[arg(long, default_value = "1000")]
    max_depth: usize,

    /// Trim surrounding whitespace from each sentence
    #[arg(long)]
    trim: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the default nonterminals next to their default rules
    Rules,
    /// Print the effective grammar
    Show {
        /// Render as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(Commands::Rules) = cli.command {
        for (name, rule) in defaults::nonterminals()
            .into_iter()
            .zip(defaults::default_rules())
        {
            println!("<{}> ::= {}", name, rule);
        }
        return Ok(());
    }

    let grammar = load_grammar(&cli)?;

    if let Some(Commands::Show { json }) = cli.command {
        if json {
            println!("{}", grammar.to_json()?);
        } else {
            print!("{}", grammar);
        }
        return Ok(());
    }

    let mut rng = utils::rng(cli.seed);

    for _ in 0..cli.count {
        println!("{}", grammar.generate_with(grammar.start_symbol(), &mut rng)?);
    }

    Ok(())
}

fn load_grammar(cli: &Cli) -> Result<Grammar, Box<dyn std::error::Error>> {
    let mut grammar = if cli.no_defaults {
        Grammar::new()
    } else {
        Grammar::with_defaults()
    };

    grammar.set_config(GrammarConfig {
        max_recursion_depth: (cli.max_depth > 0).then_some(cli.max_depth),
        trim_output: cli.trim,
        ..GrammarConfig::default()
    });

    if let Some(path) = &cli.grammar {
        grammar.apply_rules_file(path)?;
    }

    let words = [
        (defaults::NOUN, &cli.nouns),
        (defaults::VERB, &cli.verbs),
        (defaults::PREP, &cli.preps),
        (defaults::ARTICLE, &cli.articles),
    ];
    grammar.update_rules(
        words
            .iter()
            .filter_map(|(name, list)| list.as_deref().map(|list| (*name, list))),
    );

    for rule in &cli.rules {
        let (name, text) = parse_assignment(rule)?;
        grammar.set_rule(&name, &text);
    }

    if let Some(start) = &cli.start {
        grammar.set_start_symbol(start);
    }
    if !grammar.has_nonterminal(grammar.start_symbol()) {
        return Err(GrammarError::UnknownStartSymbol(grammar.start_symbol().to_string()).into());
    }

    Ok(grammar)
}
