//! Error types for citation checking.
//!
//! Structural problems are collected into a [`ValidationFailure`] so that every
//! problem with a citation is reported at once. Semantic problems stop the
//! pipeline at the first failure.

use crate::checker::grammar::CitationKind;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single, positioned structural problem with a citation.
///
/// `start` and `end` are character offsets into the citation text after
/// month and journal abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct CitationError {
    pub message: String,
    pub start: usize,
    pub end: usize,
    pub field: Option<String>,
}

impl CitationError {
    pub fn new(message: impl Into<String>, start: usize, end: usize, field: &str) -> CitationError {
        CitationError {
            message: message.into(),
            start,
            end,
            field: Some(field.to_string()),
        }
    }
}

/// Every structural problem found in a citation, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    errors: Vec<CitationError>,
}

impl ValidationFailure {
    /// Returns `None` for an empty list; a failure always holds at least one
    /// error.
    pub fn new(errors: Vec<CitationError>) -> Option<ValidationFailure> {
        if errors.is_empty() {
            None
        } else {
            Some(ValidationFailure { errors })
        }
    }

    pub fn single(error: CitationError) -> ValidationFailure {
        ValidationFailure {
            errors: vec![error],
        }
    }

    pub fn errors(&self) -> &[CitationError] {
        &self.errors
    }

    /// Whether any error is tagged with `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors
            .iter()
            .any(|e| e.field.as_deref() == Some(field))
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("\n"))
    }
}

impl std::error::Error for ValidationFailure {}

/// Problems with an otherwise well-formed citation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("Reporter '{reporter}' not allowed")]
    ReporterNotAllowed { reporter: String },

    #[error("Reporter '{reporter}' not valid for {level}. Allowed: {}", .allowed.join(", "))]
    ReporterNotForCourt {
        reporter: String,
        level: String,
        allowed: Vec<String>,
    },

    #[error("Pincite {pincite} outside {low}-{high}")]
    PinciteOutOfRange { pincite: String, low: u32, high: u32 },

    #[error("Pincite '{0}' is not a page or page range")]
    PinciteInvalid(String),

    #[error("Citation not found or pincite incorrect")]
    CitationNotFound,

    #[error("Provided quote does not match source text")]
    QuoteMismatch,
}

/// Why a full citation failed to validate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("{0}")]
    Validation(ValidationFailure),

    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl From<ValidationFailure> for CheckError {
    fn from(failure: ValidationFailure) -> CheckError {
        CheckError::Validation(failure)
    }
}

/// Grammar dispatch failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Invalid {kind} citation format")]
    NoRuleMatched { kind: CitationKind },

    #[error("No validator found for kind '{0}'")]
    UnknownKind(String),
}

/// The repair loop gave up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepairFailure {
    #[error("No changes made; still invalid: {citation}")]
    NoChange { citation: String, original: CheckError },

    #[error("Unable to automatically fix citation.\nOriginal errors: {original}\nTried fix: '{repaired}'")]
    StillInvalid {
        original: CheckError,
        repaired: String,
        repaired_error: CheckError,
    },
}

/// Short-form lookups that cannot be answered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupFailure {
    #[error("No matching full citation for short form: '{0}'")]
    NoMatchingFullCitation(String),

    #[error("Unsupported short form kind: {0}")]
    UnsupportedShortFormKind(CitationKind),

    #[error("A {kind} short form needs a {field}")]
    IncompleteRecord {
        kind: CitationKind,
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_failure_is_none() {
        assert!(ValidationFailure::new(Vec::new()).is_none());
    }

    #[test]
    fn failure_display_joins_messages() {
        let failure = ValidationFailure::new(vec![
            CitationError::new("first", 0, 1, "parentheses"),
            CitationError::new("second", 0, 1, "comma"),
        ])
        .unwrap();

        assert_eq!(failure.to_string(), "first\nsecond");
        assert!(failure.has_field("comma"));
        assert!(!failure.has_field("year"));
    }
}
