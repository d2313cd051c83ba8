//! Error types.
//!
//! Two families, never mixed:
//! - [`ConfigError`]: the option definitions themselves are broken. Raised
//!   while freezing a spec or building a [`Parser`](crate::Parser).
//! - [`ParseError`]: the argument vector does not satisfy the definitions.
//!   Collected per `parse` call into a [`ParseErrors`] aggregate.

use std::fmt;

use thiserror::Error;

use crate::option::Arity;

/// Invalid option definitions, detected before any argument is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("option name must not be empty")]
    EmptyName,

    #[error("option '{name}' is incomplete: {missing} was never set")]
    Incomplete { name: String, missing: &'static str },

    #[error("option '{name}' has arity 0; an occurrence must accept at least one value")]
    InvalidArity { name: String },

    #[error(
        "option '{name}' has inconsistent value bounds: min {min}, max {max}, arity {arity}"
    )]
    InvalidValueBounds {
        name: String,
        min: usize,
        max: Arity,
        arity: Arity,
    },

    #[error("'{alias}' refers to both '{first}' and '{second}'")]
    DuplicateName {
        alias: String,
        first: String,
        second: String,
    },

    #[error("option '{option}' depends on unknown option '{dependency}'")]
    UnknownDependency { option: String, dependency: String },

    #[error("option '{option}' depends on itself")]
    SelfDependency { option: String },

    #[error("'{prefix}' cannot be used as an option prefix")]
    InvalidPrefix { prefix: char },
}

/// A single problem found while parsing an argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown option: {token}")]
    UnknownOption { token: String },

    #[error("missing required option: {name}")]
    MissingRequiredOption { name: String },

    #[error("option '{name}' requires '{dependency}'")]
    MissingDependency { name: String, dependency: String },

    #[error("option '{name}' expects {expected} value(s) per occurrence, got {actual}")]
    ArityViolation {
        name: String,
        expected: ValueRange,
        actual: usize,
    },

    #[error("invalid value '{raw}' for option '{name}': {cause}")]
    TransformFailure {
        name: String,
        raw: String,
        cause: String,
    },
}

impl ParseError {
    /// Canonical name of the option the error is about, if any.
    pub fn option_name(&self) -> Option<&str> {
        match self {
            Self::UnknownOption { .. } => None,
            Self::MissingRequiredOption { name }
            | Self::MissingDependency { name, .. }
            | Self::ArityViolation { name, .. }
            | Self::TransformFailure { name, .. } => Some(name),
        }
    }
}

/// Inclusive bound on the number of values an occurrence may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    pub min: usize,
    pub max: Arity,
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Arity::Finite(max) if max == self.min => write!(f, "{max}"),
            Arity::Finite(max) => write!(f, "{}..={max}", self.min),
            Arity::Unbounded => write!(f, "at least {}", self.min),
        }
    }
}

/// All errors from one `parse` call, in the order they were found.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors {
    errors: Vec<ParseError>,
}

impl ParseErrors {
    /// Returns `None` when `errors` is empty.
    pub(crate) fn from_vec(errors: Vec<ParseError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }

    /// Whether any collected error equals `err`.
    pub fn contains(&self, err: &ParseError) -> bool {
        self.errors.contains(err)
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.errors.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_range_display() {
        let exact = ValueRange {
            min: 1,
            max: Arity::Finite(1),
        };
        let span = ValueRange {
            min: 1,
            max: Arity::Finite(3),
        };
        let open = ValueRange {
            min: 2,
            max: Arity::Unbounded,
        };
        assert_eq!(exact.to_string(), "1");
        assert_eq!(span.to_string(), "1..=3");
        assert_eq!(open.to_string(), "at least 2");
    }

    #[test]
    fn aggregate_renders_one_error_per_line() {
        let errs = ParseErrors::from_vec(vec![
            ParseError::UnknownOption {
                token: "-x".to_string(),
            },
            ParseError::MissingRequiredOption {
                name: "size".to_string(),
            },
        ])
        .unwrap();
        assert_eq!(
            errs.to_string(),
            "unknown option: -x\nmissing required option: size"
        );
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn empty_aggregate_is_not_constructed() {
        assert!(ParseErrors::from_vec(Vec::new()).is_none());
    }
}
