//! Identifier character sets.
//!
//! A configured charset is either a symbolic expression naming standard
//! character classes or a literal set of characters:
//!
//! - `"digits"`, `"ascii_letters + digits"`, `"string.hexdigits"` -- one or
//!   more class names joined by `+`, each optionally prefixed `string.`.
//!   Classes concatenate in the order given; repeated characters keep their
//!   first position.
//! - `"abc"` -- anything that names no class is a literal. Literal characters
//!   are sorted ascending and de-duplicated, so `"cabba"` resolves to `abc`.
//! - `{ literal = "digits" }` -- the table form forces literal reading.
//!
//! Expressions are looked up in a fixed table, never evaluated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IdError;

const ASCII_LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const ASCII_UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const HEXDIGITS: &str = "0123456789abcdefABCDEF";
const OCTDIGITS: &str = "01234567";

/// A named standard character class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    Letters,
    Lowercase,
    Uppercase,
    Digits,
    HexDigits,
    OctDigits,
}

impl CharClass {
    /// Look up a class by name, accepting an optional `string.` prefix.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("string.").unwrap_or(name);
        match name {
            "letters" | "ascii_letters" => Some(Self::Letters),
            "lowercase" | "ascii_lowercase" => Some(Self::Lowercase),
            "uppercase" | "ascii_uppercase" => Some(Self::Uppercase),
            "digits" => Some(Self::Digits),
            "hexdigits" => Some(Self::HexDigits),
            "octdigits" => Some(Self::OctDigits),
            _ => None,
        }
    }

    fn extend(self, out: &mut Vec<char>) {
        match self {
            Self::Letters => {
                out.extend(ASCII_LOWERCASE.chars());
                out.extend(ASCII_UPPERCASE.chars());
            }
            Self::Lowercase => out.extend(ASCII_LOWERCASE.chars()),
            Self::Uppercase => out.extend(ASCII_UPPERCASE.chars()),
            Self::Digits => out.extend(DIGITS.chars()),
            Self::HexDigits => out.extend(HEXDIGITS.chars()),
            Self::OctDigits => out.extend(OCTDIGITS.chars()),
        }
    }
}

/// Charset as written in configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CharsetSpec {
    /// A symbolic expression, or a literal when it names no class.
    Expression(String),
    /// Always a literal, even if it spells a class name.
    Literal { literal: String },
}

impl CharsetSpec {
    /// Resolve to the concrete character sequence identifiers are drawn from.
    pub fn resolve(&self) -> Result<ResolvedCharset, IdError> {
        match self {
            Self::Literal { literal } => ResolvedCharset::literal(literal),
            Self::Expression(expr) => match parse_expression(expr)? {
                Some(classes) => ResolvedCharset::from_classes(&classes),
                None => ResolvedCharset::literal(expr),
            },
        }
    }
}

impl Default for CharsetSpec {
    fn default() -> Self {
        Self::Expression("ascii_letters + digits".into())
    }
}

impl From<&str> for CharsetSpec {
    fn from(s: &str) -> Self {
        Self::Expression(s.to_string())
    }
}

impl fmt::Display for CharsetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expr) => write!(f, "{expr}"),
            Self::Literal { literal } => write!(f, "literal:{literal}"),
        }
    }
}

/// Split an expression on `+` into classes.
///
/// Returns `Ok(None)` when no term looks like a class reference (the string is
/// a literal), and an error when some terms do but one of them is unknown.
fn parse_expression(expr: &str) -> Result<Option<Vec<CharClass>>, IdError> {
    let terms: Vec<&str> = expr.split('+').map(str::trim).collect();
    let symbolic = terms
        .iter()
        .any(|t| t.starts_with("string.") || CharClass::from_name(t).is_some());
    if !symbolic {
        return Ok(None);
    }
    terms
        .into_iter()
        .map(|t| CharClass::from_name(t).ok_or_else(|| IdError::UnknownCharsetClass(t.to_string())))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// A non-empty, duplicate-free character sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCharset {
    chars: Vec<char>,
}

impl ResolvedCharset {
    /// Sorted, de-duplicated characters of `s`.
    pub fn literal(s: &str) -> Result<Self, IdError> {
        let mut chars: Vec<char> = s.chars().collect();
        chars.sort_unstable();
        chars.dedup();
        Self::from_chars(chars)
    }

    fn from_classes(classes: &[CharClass]) -> Result<Self, IdError> {
        let mut all = Vec::new();
        for class in classes {
            class.extend(&mut all);
        }
        let mut chars = Vec::with_capacity(all.len());
        for c in all {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        Self::from_chars(chars)
    }

    fn from_chars(chars: Vec<char>) -> Result<Self, IdError> {
        if chars.is_empty() {
            return Err(IdError::EmptyCharset);
        }
        Ok(Self { chars })
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always `false`; resolution rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

impl fmt::Display for ResolvedCharset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.chars.iter().collect();
        write!(f, "{s}")
    }
}
