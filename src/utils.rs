use std::io;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

/// Custom error types for the sentence generator
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown start symbol: <{0}>")]
    UnknownStartSymbol(String),

    #[error("Empty production set for <{0}>")]
    EmptyProductionSet(String),

    #[error("Generation depth exceeded at <{symbol}> (limit {limit})")]
    GenerationDepthExceeded { symbol: String, limit: usize },
}

/// Result type for grammar operations
pub type Result<T> = std::result::Result<T, GrammarError>;

/// Build the random source for a generation run.
///
/// A seed gives a reproducible sequence of sentences; without one the
/// generator is seeded from the operating system.
pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Trait extension for Option<T> to convert to GrammarError
pub trait OptionExt<T> {
    fn ok_or_parse_err<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_parse_err<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| GrammarError::Parse(f()))
    }
}
