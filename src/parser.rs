//! The rule text micro-format.
//!
//! A rule is written as a list of alternatives separated by `,`. Each
//! alternative is a concatenation of bracketed nonterminal references
//! (`<noun-phrase>`) and bare terminal text:
//!
//! ```text
//! rule        := alternative ("," alternative)*
//! alternative := (nonterminal | terminal)*
//! nonterminal := "<" name ">"
//! terminal    := any run of characters outside "<" ... ">"
//! ```
//!
//! Parsing never fails. An unmatched `<` swallows the rest of the
//! alternative as literal terminal text.

use regex::Regex;

use crate::grammar::{Production, Rule, Symbol};
use crate::utils::{GrammarError, OptionExt, Result};

/// Separates the alternatives of one rule
pub const ALTERNATIVE_SEPARATOR: char = ',';
/// Opens a nonterminal reference
pub const NONTERMINAL_OPEN: char = '<';
/// Closes a nonterminal reference
pub const NONTERMINAL_CLOSE: char = '>';

/// Parse the raw text of one nonterminal into its list of alternatives.
///
/// Every comma separated piece becomes one trimmed alternative, so an empty
/// piece between two commas is an empty production. Blank rule text yields a
/// rule with no productions at all.
pub fn parse_rule(text: &str) -> Rule {
    if text.trim().is_empty() {
        return Rule::default();
    }

    let productions = text
        .split(ALTERNATIVE_SEPARATOR)
        .map(parse_production)
        .collect();

    Rule { productions }
}

/// Parse a single alternative into its ordered symbols
pub fn parse_production(alternative: &str) -> Production {
    let mut symbols = Vec::new();
    let mut current = String::new();
    let mut in_nonterminal = false;

    for c in alternative.trim().chars() {
        if in_nonterminal {
            current.push(c);
            if c == NONTERMINAL_CLOSE {
                let name = &current[NONTERMINAL_OPEN.len_utf8()..current.len() - c.len_utf8()];
                symbols.push(Symbol::NonTerminal(name.to_string()));
                current.clear();
                in_nonterminal = false;
            }
        } else if c == NONTERMINAL_OPEN {
            if !current.is_empty() {
                symbols.push(Symbol::Terminal(std::mem::take(&mut current)));
            }
            current.push(c);
            in_nonterminal = true;
        } else {
            current.push(c);
        }
    }

    // Trailing terminal text, or an unterminated `<...` kept verbatim
    if !current.is_empty() {
        symbols.push(Symbol::Terminal(current));
    }

    Production { symbols }
}

/// Strip the surrounding delimiters from a nonterminal name, if present.
///
/// `"<noun>"` and `"noun"` both name the same nonterminal.
pub fn nonterminal_name(name: &str) -> &str {
    let name = name.trim();
    name.strip_prefix(NONTERMINAL_OPEN)
        .and_then(|inner| inner.strip_suffix(NONTERMINAL_CLOSE))
        .unwrap_or(name)
}

/// Contents of a rules file: an optional start directive and the rule
/// assignments in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RulesFile {
    pub start: Option<String>,
    pub rules: Vec<(String, String)>,
}

/// Parse one `<name> ::= text` (or `name = text`) assignment.
///
/// Returns the bare nonterminal name and the untouched rule text.
pub fn parse_assignment(line: &str) -> Result<(String, String)> {
    match_assignment(&assignment_regex()?, line)
}

fn assignment_regex() -> Result<Regex> {
    Regex::new(r"^\s*<?([^<>=:\s]+)>?\s*(?:::=|=)\s*(.*)$")
        .map_err(|e| GrammarError::Parse(e.to_string()))
}

fn match_assignment(assignment: &Regex, line: &str) -> Result<(String, String)> {
    let captures = assignment
        .captures(line)
        .ok_or_parse_err(|| format!("expected `<name> ::= alternatives`, got `{}`", line))?;
    let name = captures
        .get(1)
        .ok_or_parse_err(|| format!("missing nonterminal name in `{}`", line))?;
    let text = captures.get(2).map_or("", |m| m.as_str());

    Ok((name.as_str().to_string(), text.trim().to_string()))
}

/// Parse the text of a rules file.
///
/// Blank lines and lines starting with `#` are skipped. `@start = <name>`
/// selects the start symbol. Every other line must be an assignment; the
/// error names the offending line number.
pub fn parse_rules_file(content: &str) -> Result<RulesFile> {
    let start_directive = Regex::new(r"^\s*@start\s*=\s*<?([^<>\s]+)>?\s*$")
        .map_err(|e| GrammarError::Parse(e.to_string()))?;
    let assignment = assignment_regex()?;

    let mut file = RulesFile::default();

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(captures) = start_directive.captures(trimmed) {
            file.start = captures.get(1).map(|m| m.as_str().to_string());
            continue;
        }

        let rule = match_assignment(&assignment, trimmed).map_err(|e| match e {
            GrammarError::Parse(msg) => {
                GrammarError::Parse(format!("line {}: {}", index + 1, msg))
            }
            other => other,
        })?;
        file.rules.push(rule);
    }

    Ok(file)
}
