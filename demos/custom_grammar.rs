use sentence_gen::{Grammar, GrammarBuilder, GrammarConfig, WordLists, utils};
use std::error::Error;

/// Example of building grammars in code
fn main() -> Result<(), Box<dyn Error>> {
    // Example 1: The built-in grammar with a different vocabulary
    let grammar = Grammar::with_defaults().with_words(&WordLists::new(
        "fox, programmer, robot",
        "jumps over, observes, debugs",
        "near, beside",
        "the, a, every",
    ));

    println!("Default structure, custom words:");
    for i in 1..=5 {
        println!("{}. {}", i, grammar.generate()?);
    }

    // Example 2: Greetings in several languages
    let grammar = GrammarBuilder::new()
        .rule("greeting", "<english>, <spanish>, <french>, <german>")
        .rule("english", "Hello<person>!")
        .rule("spanish", "¡Hola<person>!")
        .rule("french", "Bonjour<person>!")
        .rule("german", "Guten Tag<person>!")
        .rule("person", "world, friend, programmer, everyone")
        .start("greeting")
        .config(GrammarConfig {
            trim_output: true,
            ..GrammarConfig::default()
        })
        .build();

    println!("\nGenerated greetings in different languages:");
    let mut rng = utils::rng(Some(2024));
    for i in 1..=5 {
        println!("{}. {}", i, grammar.generate_with("greeting", &mut rng)?);
    }

    // Example 3: A recursive expression grammar with a depth guard
    let grammar = GrammarBuilder::new()
        .rule("expr", "<term>, <term>+<expr>")
        .rule("term", "<factor>, <factor>*<term>")
        .rule("factor", "<number>, (<expr>)")
        .rule("number", "0, 1, 42")
        .start("expr")
        .config(GrammarConfig {
            max_recursion_depth: Some(12),
            trim_output: true,
            ..GrammarConfig::default()
        })
        .build();

    println!("\nGenerated expressions:");
    for i in 1..=5 {
        match grammar.generate() {
            Ok(text) => println!("{}. {}", i, text),
            Err(e) => println!("{}. ({})", i, e),
        }
    }

    println!("\nGrammar:\n{}", grammar);

    Ok(())
}
