//! Sentence-Gen is a context-free grammar sentence generator.
//!
//! Rules are written in a small text format: alternatives are separated by
//! `,` and nonterminals are wrapped in `<` `>`. Anything else is terminal
//! text. A sentence is produced by expanding the start symbol, picking one
//! alternative uniformly at random for every nonterminal met on the way.
//!
//! # Example
//!
//! ```rust
//! use sentence_gen::GrammarBuilder;
//!
//! let grammar = GrammarBuilder::new()
//!     .rule("greeting", "Hello<subject>")
//!     .rule("subject", "world, Rust programmers")
//!     .start("greeting")
//!     .build();
//!
//! let text = grammar.generate().unwrap();
//! assert!(text == "Hello world " || text == "Hello Rust programmers ");
//! ```
//!
//! Nothing guards against a grammar whose nonterminals can only recurse;
//! set [`GrammarConfig::max_recursion_depth`] when rules come from an
//! untrusted source.

pub mod defaults;
pub mod grammar;
pub mod parser;
pub mod utils;

pub use defaults::WordLists;
pub use grammar::{Grammar, GrammarBuilder, GrammarConfig};
pub use utils::{GrammarError, Result};

// Re-export common enums and structs
pub use grammar::{Production, Rule, Symbol};

/// Build a grammar from raw rule text per nonterminal
pub fn build_grammar<I, K, V>(rules: I) -> Grammar
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    Grammar::from_rules(rules)
}

/// The built-in English-like grammar
pub fn build_default_grammar() -> Grammar {
    Grammar::with_defaults()
}

/// Replace the noun, verb, prep and article rules, keeping the structure
pub fn update_word_lists(
    grammar: Grammar,
    nouns: &str,
    verbs: &str,
    preps: &str,
    articles: &str,
) -> Grammar {
    grammar.with_words(&WordLists::new(nouns, verbs, preps, articles))
}

/// Generate one sentence starting at `start`
pub fn generate(grammar: &Grammar, start: &str) -> Result<String> {
    grammar.generate_from(start)
}

/// Nonterminal names of a grammar, default nonterminals first
pub fn list_nonterminals(grammar: &Grammar) -> Vec<String> {
    grammar
        .nonterminals()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Default rule text, index-aligned with the default grammar's nonterminals
pub fn list_default_rules() -> Vec<String> {
    defaults::default_rules()
        .into_iter()
        .map(str::to_string)
        .collect()
}
