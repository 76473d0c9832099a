use std::collections::BTreeSet;

use thiserror::Error;

use crate::glob;
use crate::ruleset::{OwnershipRule, OwnershipTable};

/// Marker character every pro token starts with.
pub const PRO_MARKER: char = '@';

/// Header prefix setting the comment title.
pub const TITLE_PREFIX: &str = "TITLE=";

/// Header prefix setting the comment lead-in message.
pub const MESSAGE_PREFIX: &str = "MESSAGE=";

/// An error encountered while parsing a CODEPROS file. Both variants carry
/// the offending line verbatim so the caller can surface it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line opens with a pro token, so there is no file path to own.
    #[error("line missing file: {0:?}")]
    LineMissingFile(String),
    /// A token after the file path does not start with the pro marker.
    #[error("pro incorrect, expected a token starting with '@': {0:?}")]
    ProIncorrect(String),
}

/// Parse CODEPROS source into an [`OwnershipTable`], removing
/// `excluded_pros` from every rule as it is read.
///
/// `TITLE=` and `MESSAGE=` headers are recognized by prefix on any line;
/// the first occurrence of each wins and later ones are ignored. Blank
/// lines are skipped. Every other line must be a file path optionally
/// followed by pro tokens.
pub fn parse(source: &str, excluded_pros: &BTreeSet<String>) -> Result<OwnershipTable, ParseError> {
    let mut title: Option<String> = None;
    let mut message: Option<String> = None;
    let mut rules = Vec::new();

    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(text) = trimmed.strip_prefix(TITLE_PREFIX) {
            title.get_or_insert_with(|| text.to_string());
            continue;
        }
        if let Some(text) = trimmed.strip_prefix(MESSAGE_PREFIX) {
            message.get_or_insert_with(|| text.to_string());
            continue;
        }

        rules.push(parse_rule(trimmed, excluded_pros)?);
    }

    Ok(OwnershipTable {
        title: title.unwrap_or_default(),
        message: message.unwrap_or_default(),
        rules,
    })
}

fn parse_rule(line: &str, excluded_pros: &BTreeSet<String>) -> Result<OwnershipRule, ParseError> {
    let mut tokens = line.split_whitespace();
    let file = match tokens.next() {
        Some(file) if !file.starts_with(PRO_MARKER) => file,
        _ => return Err(ParseError::LineMissingFile(line.to_string())),
    };

    let mut pros = BTreeSet::new();
    for token in tokens {
        if !token.starts_with(PRO_MARKER) {
            return Err(ParseError::ProIncorrect(line.to_string()));
        }
        if !excluded_pros.contains(token) {
            pros.insert(token.to_string());
        }
    }

    Ok(OwnershipRule::new(glob::globulize(file), pros))
}
