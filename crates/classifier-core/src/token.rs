//! Token classification.
//!
//! A line is split on whitespace and every token is assigned a
//! [`TokenKind`]. Integer classification is purely syntactic so values of any
//! magnitude stay integers; float classification defers to `f64` parsing and
//! accepts only finite results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The class a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Optional sign followed by ASCII digits.
    Integer,
    /// A finite decimal or exponent-form number that is not an integer.
    Float,
    /// Anything else.
    String,
}

impl TokenKind {
    /// All kinds, in output order.
    pub const ALL: [TokenKind; 3] = [TokenKind::Integer, TokenKind::Float, TokenKind::String];

    /// Default output file name for this kind.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Integer => "integers.txt",
            Self::Float => "floats.txt",
            Self::String => "strings.txt",
        }
    }

    /// Plural label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Integer => "Integers",
            Self::Float => "Floats",
            Self::String => "Strings",
        }
    }

    /// Position of this kind in [`TokenKind::ALL`].
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Integer => 0,
            Self::Float => 1,
            Self::String => 2,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
        }
    }
}

/// Returns `true` if `token` is an optionally signed run of ASCII digits.
pub fn is_integer(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Returns `true` if `token` parses as a finite `f64`.
pub fn is_float(token: &str) -> bool {
    token.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Classifies a single token.
pub fn classify(token: &str) -> TokenKind {
    if is_integer(token) {
        TokenKind::Integer
    } else if is_float(token) {
        TokenKind::Float
    } else {
        TokenKind::String
    }
}

/// Splits a line into tokens.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split_whitespace()
}

/// Tokens of one line grouped by kind, each group joined by single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLine {
    groups: [String; 3],
}

impl ClassifiedLine {
    /// Classifies every token of `line`, calling `on_token` for each one.
    pub fn from_line<F>(line: &str, mut on_token: F) -> Self
    where
        F: FnMut(TokenKind, &str),
    {
        let mut classified = Self::default();
        for token in tokenize(line) {
            let kind = classify(token);
            on_token(kind, token);
            let group = &mut classified.groups[kind.index()];
            if !group.is_empty() {
                group.push(' ');
            }
            group.push_str(token);
        }
        classified
    }

    /// The joined tokens of `kind`, or `None` if there were none.
    pub fn group(&self, kind: TokenKind) -> Option<&str> {
        let group = &self.groups[kind.index()];
        (!group.is_empty()).then_some(group.as_str())
    }

    /// Non-empty groups, in output order.
    pub fn groups(&self) -> impl Iterator<Item = (TokenKind, &str)> {
        TokenKind::ALL
            .into_iter()
            .filter_map(|kind| self.group(kind).map(|g| (kind, g)))
    }
}
