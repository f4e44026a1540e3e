//! The built-in English-like starter grammar.

/// Start symbol of the default grammar
pub const START: &str = "start";
pub const NOUN_PHRASE: &str = "noun-phrase";
pub const VERB_PHRASE: &str = "verb-phrase";
pub const PREP_PHRASE: &str = "prep-phrase";
pub const CMPLX_NOUN: &str = "cmplx-noun";
pub const CMPLX_VERB: &str = "cmplx-verb";
pub const NOUN: &str = "noun";
pub const VERB: &str = "verb";
pub const PREP: &str = "prep";
pub const ARTICLE: &str = "article";

pub const DEFAULT_NOUNS: &str = "girl, dog, boy";
pub const DEFAULT_VERBS: &str = "eats, attacks, launches";
pub const DEFAULT_PREPS: &str = "around, over, under";
pub const DEFAULT_ARTICLES: &str = "the, a";

/// Sentence structure rules, fixed regardless of vocabulary
pub const STRUCTURAL_RULES: [(&str, &str); 6] = [
    (START, "<noun-phrase><verb-phrase>"),
    (NOUN_PHRASE, "<cmplx-noun>,<cmplx-noun><prep-phrase>"),
    (VERB_PHRASE, "<cmplx-verb>,<cmplx-verb><prep-phrase>"),
    (PREP_PHRASE, "<prep><cmplx-noun>"),
    (CMPLX_NOUN, "<article><noun>"),
    (CMPLX_VERB, "<verb>,<verb><noun-phrase>"),
];

/// The ten nonterminals of the default grammar.
///
/// Index `i` here corresponds to index `i` of [`default_rules`].
pub fn nonterminals() -> Vec<&'static str> {
    STRUCTURAL_RULES
        .iter()
        .map(|(name, _)| *name)
        .chain([NOUN, VERB, PREP, ARTICLE])
        .collect()
}

/// The default rule text for each entry of [`nonterminals`]
pub fn default_rules() -> Vec<&'static str> {
    STRUCTURAL_RULES
        .iter()
        .map(|(_, text)| *text)
        .chain([DEFAULT_NOUNS, DEFAULT_VERBS, DEFAULT_PREPS, DEFAULT_ARTICLES])
        .collect()
}

/// Comma separated vocabularies for the four lexical categories
#[derive(Debug, Clone, PartialEq)]
pub struct WordLists {
    pub nouns: String,
    pub verbs: String,
    pub preps: String,
    pub articles: String,
}

impl Default for WordLists {
    fn default() -> Self {
        WordLists {
            nouns: DEFAULT_NOUNS.to_string(),
            verbs: DEFAULT_VERBS.to_string(),
            preps: DEFAULT_PREPS.to_string(),
            articles: DEFAULT_ARTICLES.to_string(),
        }
    }
}

impl WordLists {
    pub fn new(nouns: &str, verbs: &str, preps: &str, articles: &str) -> Self {
        WordLists {
            nouns: nouns.to_string(),
            verbs: verbs.to_string(),
            preps: preps.to_string(),
            articles: articles.to_string(),
        }
    }

    /// The word lists as rule text keyed by their nonterminal
    pub fn rules(&self) -> [(&'static str, &str); 4] {
        [
            (NOUN, self.nouns.as_str()),
            (VERB, self.verbs.as_str()),
            (PREP, self.preps.as_str()),
            (ARTICLE, self.articles.as_str()),
        ]
    }
}
