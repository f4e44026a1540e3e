use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::defaults::{self, WordLists};
use crate::parser::{self, NONTERMINAL_CLOSE, NONTERMINAL_OPEN};
use crate::utils::{GrammarError, Result};

/// A grammar symbol, either literal text or a reference to another rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    /// A terminal symbol (literal text)
    Terminal(String),
    /// A non-terminal symbol, stored without its `<` `>` delimiters
    NonTerminal(String),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(text) => write!(f, "{}", text),
            Symbol::NonTerminal(name) => {
                write!(f, "{}{}{}", NONTERMINAL_OPEN, name, NONTERMINAL_CLOSE)
            }
        }
    }
}

/// One alternative right-hand side of a rule
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Production {
    /// The sequence of symbols in this production
    pub symbols: Vec<Symbol>,
}

impl Production {
    /// Rebuild the rule text this production was parsed from
    pub fn to_rule_text(&self) -> String {
        self.symbols.iter().map(Symbol::to_string).collect()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

/// All alternatives for one nonterminal, in the order they were written
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rule {
    pub productions: Vec<Production>,
}

impl Rule {
    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    /// Rebuild editable rule text; parsing it again gives back this rule
    pub fn to_rule_text(&self) -> String {
        self.productions
            .iter()
            .map(Production::to_rule_text)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Configuration options for generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// Maximum nesting of nonterminal expansions; `None` never gives up
    pub max_recursion_depth: Option<usize>,
    /// Text appended after every terminal
    pub separator: String,
    /// Whether to trim whitespace from output
    pub trim_output: bool,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        GrammarConfig {
            max_recursion_depth: None,
            separator: " ".to_string(),
            trim_output: false,
        }
    }
}

/// A set of rules mapping nonterminal names to their alternatives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    /// The rules mapping non-terminals to productions
    rules: HashMap<String, Rule>,
    /// Nonterminal names in the order they were first defined
    order: Vec<String>,
    /// The starting symbol for generation
    start_symbol: String,
    /// Configuration options
    #[serde(default)]
    config: GrammarConfig,
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::new()
    }
}

impl Grammar {
    /// Create a new empty grammar starting at `<start>`
    pub fn new() -> Self {
        Grammar {
            rules: HashMap::new(),
            order: Vec::new(),
            start_symbol: defaults::START.to_string(),
            config: GrammarConfig::default(),
        }
    }

    /// Create a new empty grammar with custom configuration
    pub fn with_config(config: GrammarConfig) -> Self {
        Grammar {
            config,
            ..Grammar::new()
        }
    }

    /// The built-in grammar with its default vocabulary
    pub fn with_defaults() -> Self {
        Grammar::with_default_structure(&WordLists::default())
    }

    /// The built-in sentence structure filled with the given vocabulary
    pub fn with_default_structure(words: &WordLists) -> Self {
        let mut grammar = Grammar::new();
        grammar.update_rules(defaults::STRUCTURAL_RULES);
        grammar.update_words(words);
        grammar
    }

    /// Build a grammar from raw rule text per nonterminal
    pub fn from_rules<I, K, V>(rules: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut grammar = Grammar::new();
        grammar.update_rules(rules);
        grammar
    }

    /// Load a rules file into a new, otherwise empty grammar.
    ///
    /// Fails if the file leaves the start symbol without a rule.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut grammar = Grammar::new();
        grammar.apply_rules_file(path)?;

        // Validate that the start symbol exists
        if !grammar.has_nonterminal(&grammar.start_symbol) {
            return Err(GrammarError::UnknownStartSymbol(grammar.start_symbol.clone()));
        }

        Ok(grammar)
    }

    /// Restore a grammar from its JSON rendering
    pub fn from_json(json: &str) -> Result<Self> {
        let mut grammar: Grammar = serde_json::from_str(json)?;

        // Keep `order` consistent with the rule table whatever the input said
        let Grammar { rules, order, .. } = &mut grammar;
        let mut seen = HashSet::new();
        order.retain(|name| rules.contains_key(name) && seen.insert(name.clone()));
        let mut missing: Vec<String> = rules
            .keys()
            .filter(|name| !order.contains(name))
            .cloned()
            .collect();
        missing.sort();
        order.extend(missing);

        Ok(grammar)
    }

    /// Render the grammar as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace the rule of every given nonterminal with freshly parsed text.
    ///
    /// Nonterminals not mentioned keep their current rules.
    pub fn update_rules<I, K, V>(&mut self, rules: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, text) in rules {
            self.set_rule(name.as_ref(), text.as_ref());
        }
    }

    /// Replace the rule of a single nonterminal
    pub fn set_rule(&mut self, name: &str, text: &str) {
        let name = parser::nonterminal_name(name).to_string();
        let rule = parser::parse_rule(text);

        if !self.rules.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.rules.insert(name, rule);
    }

    /// Overwrite only the four lexical categories
    pub fn update_words(&mut self, words: &WordLists) {
        self.update_rules(words.rules());
    }

    /// Consume the grammar, returning it with new lexical categories
    pub fn with_words(mut self, words: &WordLists) -> Self {
        self.update_words(words);
        self
    }

    /// Apply a rules file over this grammar.
    ///
    /// A `@start` directive in the file replaces the start symbol.
    pub fn apply_rules_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let content = fs::read_to_string(path)?;
        let file = parser::parse_rules_file(&content)?;

        self.update_rules(file.rules);
        if let Some(start) = file.start {
            self.set_start_symbol(&start);
        }

        Ok(())
    }

    /// Generate one sentence from the start symbol
    pub fn generate(&self) -> Result<String> {
        self.generate_from(&self.start_symbol)
    }

    /// Generate one sentence from the given symbol
    pub fn generate_from(&self, start: &str) -> Result<String> {
        self.generate_with(start, &mut rand::thread_rng())
    }

    /// Generate one sentence from `start` drawing every choice from `rng`.
    ///
    /// A start symbol without a rule is emitted as literal text, exactly as
    /// written. Generation does not terminate for a grammar whose every
    /// alternative recurses, unless `max_recursion_depth` is set.
    pub fn generate_with<R: Rng + ?Sized>(&self, start: &str, rng: &mut R) -> Result<String> {
        let name = parser::nonterminal_name(start);

        let mut result = String::new();
        if self.rules.contains_key(name) {
            self.expand(&Symbol::NonTerminal(name.to_string()), rng, 0, &mut result)?;
        } else {
            result.push_str(start.trim());
            result.push_str(&self.config.separator);
        }

        if self.config.trim_output {
            Ok(result.trim().to_string())
        } else {
            Ok(result)
        }
    }

    /// Recursively expand a symbol onto the end of `out`
    fn expand<R: Rng + ?Sized>(
        &self,
        symbol: &Symbol,
        rng: &mut R,
        depth: usize,
        out: &mut String,
    ) -> Result<()> {
        let name = match symbol {
            Symbol::Terminal(text) => {
                out.push_str(text);
                out.push_str(&self.config.separator);
                return Ok(());
            }
            Symbol::NonTerminal(name) => name,
        };

        // No rule means the reference is a literal leaf
        let Some(rule) = self.rules.get(name) else {
            out.push_str(&symbol.to_string());
            out.push_str(&self.config.separator);
            return Ok(());
        };

        if let Some(limit) = self.config.max_recursion_depth {
            if depth >= limit {
                return Err(GrammarError::GenerationDepthExceeded {
                    symbol: name.clone(),
                    limit,
                });
            }
        }

        if rule.is_empty() {
            return Err(GrammarError::EmptyProductionSet(name.clone()));
        }

        let production = &rule.productions[rng.gen_range(0..rule.len())];
        for symbol in &production.symbols {
            self.expand(symbol, rng, depth + 1, out)?;
        }

        Ok(())
    }

    /// Check if the grammar contains a specific non-terminal
    pub fn has_nonterminal(&self, name: &str) -> bool {
        self.rules.contains_key(parser::nonterminal_name(name))
    }

    /// The rule for a nonterminal, if defined
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(parser::nonterminal_name(name))
    }

    /// Editable rule text for a nonterminal, if defined
    pub fn rule_text(&self, name: &str) -> Option<String> {
        self.rule(name).map(Rule::to_rule_text)
    }

    /// Nonterminal names in a stable order.
    ///
    /// The default nonterminals come first, in the order of
    /// [`defaults::nonterminals`], followed by any other names in the order
    /// they were first defined.
    pub fn nonterminals(&self) -> Vec<&str> {
        let canonical = defaults::nonterminals();

        let mut names: Vec<&str> = Vec::with_capacity(self.rules.len());
        for name in &canonical {
            if let Some((key, _)) = self.rules.get_key_value(*name) {
                names.push(key.as_str());
            }
        }
        for name in &self.order {
            if !canonical.iter().any(|c| *c == name.as_str()) {
                names.push(name.as_str());
            }
        }
        names
    }

    /// Get a reference to the grammar's rules
    pub fn rules(&self) -> &HashMap<String, Rule> {
        &self.rules
    }

    /// Get the start symbol
    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    pub fn set_start_symbol(&mut self, start: &str) {
        self.start_symbol = parser::nonterminal_name(start).to_string();
    }

    /// Get a reference to the grammar's configuration
    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// Set a new configuration
    pub fn set_config(&mut self, config: GrammarConfig) {
        self.config = config;
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in self.nonterminals() {
            let Some(rule) = self.rules.get(name) else {
                continue;
            };
            write!(f, "{}{}{}:", NONTERMINAL_OPEN, name, NONTERMINAL_CLOSE)?;
            for (i, production) in rule.productions.iter().enumerate() {
                let sep = if i == 0 { " " } else { " | " };
                write!(f, "{}{}", sep, production)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Builder for constructing Grammar instances
#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    grammar: Grammar,
}

impl GrammarBuilder {
    /// Start from an empty grammar
    pub fn new() -> Self {
        GrammarBuilder {
            grammar: Grammar::new(),
        }
    }

    /// Start from the built-in default grammar
    pub fn with_defaults() -> Self {
        GrammarBuilder {
            grammar: Grammar::with_defaults(),
        }
    }

    /// Set the start symbol
    pub fn start(mut self, start: &str) -> Self {
        self.grammar.set_start_symbol(start);
        self
    }

    /// Set the configuration
    pub fn config(mut self, config: GrammarConfig) -> Self {
        self.grammar.config = config;
        self
    }

    /// Add or replace the rule for a nonterminal
    pub fn rule(mut self, name: &str, text: &str) -> Self {
        self.grammar.set_rule(name, text);
        self
    }

    /// Replace the four lexical categories
    pub fn words(mut self, words: &WordLists) -> Self {
        self.grammar.update_words(words);
        self
    }

    /// Build the grammar
    pub fn build(self) -> Grammar {
        self.grammar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils;

    #[test]
    fn test_single_terminal_keeps_trailing_space() {
        let grammar = Grammar::from_rules([("X", "boy")]);

        for _ in 0..20 {
            assert_eq!(grammar.generate_from("X").unwrap(), "boy ");
        }
    }

    #[test]
    fn test_grammar_generate() {
        let grammar = Grammar::from_rules([
            ("start", "Hello<subject>"),
            ("subject", "world, Rust"),
        ]);

        let result = grammar.generate().unwrap();
        assert!(result == "Hello world " || result == "Hello Rust ", "{:?}", result);
    }

    #[test]
    fn test_undefined_nonterminal_is_literal() {
        let grammar = Grammar::from_rules([("start", "see<missing>")]);
        assert_eq!(grammar.generate().unwrap(), "see <missing> ");
    }

    #[test]
    fn test_undefined_start_is_literal() {
        let grammar = Grammar::new();
        assert_eq!(grammar.generate_from("nowhere").unwrap(), "nowhere ");
        assert_eq!(grammar.generate_from("<nowhere>").unwrap(), "<nowhere> ");
        assert_eq!(grammar.generate_from(" X ").unwrap(), "X ");
    }

    #[test]
    fn test_empty_production_set() {
        let grammar = Grammar::from_rules([("start", "<noun> sleeps"), ("noun", "")]);

        match grammar.generate() {
            Err(GrammarError::EmptyProductionSet(name)) => assert_eq!(name, "noun"),
            other => panic!("expected EmptyProductionSet, got {:?}", other),
        }
    }

    #[test]
    fn test_recursion_limit() {
        let config = GrammarConfig {
            max_recursion_depth: Some(5),
            ..GrammarConfig::default()
        };
        let grammar = GrammarBuilder::new()
            .config(config)
            .rule("recursive", "<recursive>loop")
            .start("recursive")
            .build();

        match grammar.generate() {
            Err(GrammarError::GenerationDepthExceeded { symbol, limit }) => {
                assert_eq!(symbol, "recursive");
                assert_eq!(limit, 5);
            }
            other => panic!("expected GenerationDepthExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_limit_does_not_trip_on_shallow_grammar() {
        let config = GrammarConfig {
            max_recursion_depth: Some(8),
            ..GrammarConfig::default()
        };
        let mut grammar = Grammar::with_defaults();
        grammar.set_config(config);

        let mut rng = utils::rng(Some(11));
        for _ in 0..200 {
            assert!(grammar.generate_with("start", &mut rng).is_ok());
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let grammar = Grammar::with_defaults();
        let mut a = utils::rng(Some(42));
        let mut b = utils::rng(Some(42));

        for _ in 0..10 {
            assert_eq!(
                grammar.generate_with("start", &mut a).unwrap(),
                grammar.generate_with("start", &mut b).unwrap()
            );
        }
    }

    #[test]
    fn test_trim_and_separator_config() {
        let config = GrammarConfig {
            separator: "_".to_string(),
            trim_output: false,
            ..GrammarConfig::default()
        };
        let mut grammar = Grammar::with_config(config);
        grammar.update_rules([("start", "<a><b>"), ("a", "x"), ("b", "y")]);
        assert_eq!(grammar.generate().unwrap(), "x_y_");

        grammar.set_config(GrammarConfig {
            trim_output: true,
            ..GrammarConfig::default()
        });
        assert_eq!(grammar.generate().unwrap(), "x y");
    }

    #[test]
    fn test_update_rules_overwrites_by_key() {
        let mut grammar = Grammar::with_defaults();
        let before = grammar.rule("start").cloned();

        grammar.update_rules([("<noun>", "cat")]);

        assert_eq!(grammar.rule("start").cloned(), before);
        assert_eq!(grammar.rule_text("noun").as_deref(), Some("cat"));
        assert_eq!(grammar.nonterminals().len(), 10);
    }

    #[test]
    fn test_names_with_and_without_delimiters() {
        let grammar = Grammar::from_rules([("<noun>", "cat")]);
        assert!(grammar.has_nonterminal("noun"));
        assert!(grammar.has_nonterminal("<noun>"));
        assert_eq!(grammar.generate_from("<noun>").unwrap(), "cat ");
    }

    #[test]
    fn test_rule_text_round_trips_through_parser() {
        let grammar = Grammar::with_defaults();

        for name in grammar.nonterminals() {
            let rule = grammar.rule(name).unwrap();
            assert_eq!(&parser::parse_rule(&rule.to_rule_text()), rule, "{}", name);
        }
    }

    #[test]
    fn test_nonterminals_listed_in_default_order() {
        let rules: HashMap<&str, &str> = defaults::nonterminals()
            .into_iter()
            .zip(defaults::default_rules())
            .collect();
        let mut grammar = Grammar::from_rules(rules);
        grammar.set_rule("adjective", "big, small");
        grammar.set_rule("adverb", "quickly");

        let mut expected = defaults::nonterminals();
        expected.extend(["adjective", "adverb"]);
        assert_eq!(grammar.nonterminals(), expected);
    }

    #[test]
    fn test_display() {
        let grammar = Grammar::from_rules([
            ("noun-phrase", "<cmplx-noun>,<cmplx-noun><prep-phrase>"),
            ("noun", "girl, dog"),
        ]);

        assert_eq!(
            grammar.to_string(),
            "<noun-phrase>: <cmplx-noun> | <cmplx-noun>+<prep-phrase>\n<noun>: girl | dog\n"
        );
    }

    #[test]
    fn test_json_restores_grammar() {
        let grammar = Grammar::with_defaults();
        let json = grammar.to_json().unwrap();
        let restored = Grammar::from_json(&json).unwrap();

        assert_eq!(restored, grammar);
    }
}
