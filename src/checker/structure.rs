//! Structural checks on raw case-citation text.
//!
//! Every check runs, and every violation is reported, so that an author can
//! fix all of a citation's problems in one pass. The order of the returned
//! errors is the order of the checks: parentheses, comma, volume/reporter/page,
//! parenthetical shape, year, court, and finally overall structure.

use super::grammar::{CitationKind, GrammarTable};
use crate::error::CitationError;
use lazy_static::lazy_static;
use regex::Regex;
use slog::{debug, trace};

lazy_static! {
    /// Digits, a reporter-like run starting with a letter ("U.S.", "F.2d",
    /// "F. Supp. 2d"), and more digits.
    static ref VOLUME_REPORTER_PAGE: Regex =
        Regex::new(r"\d+\s+[A-Za-z][A-Za-z0-9.' ]*?\s+\d+").unwrap();
}

/// Collect the structural problems with `citation`. An empty list means the
/// citation is structurally sound.
pub fn check(citation: &str, grammar: &GrammarTable) -> Vec<CitationError> {
    debug!(slog_scope::logger(), "Starting structural check...");
    let mut errors: Vec<CitationError> = Vec::new();
    let total = char_offset(citation, citation.len());

    let open = citation.find('(');
    let close = citation.rfind(')');

    // Parentheses
    if open.is_none() || close.is_none() {
        errors.push(CitationError::new(
            "Missing parentheses around court and year (…)",
            0,
            total,
            "parentheses",
        ));
    }

    // Comma before the parenthetical
    let prefix = match open {
        Some(i) => &citation[..i],
        None => citation,
    };
    let prefix_end = char_offset(citation, prefix.len());
    if !prefix.contains(',') {
        errors.push(CitationError::new(
            "Missing comma before the parenthetical containing court and year.",
            0,
            prefix_end,
            "comma",
        ));
    }

    // Volume, reporter, and page
    if !VOLUME_REPORTER_PAGE.is_match(prefix) {
        errors.push(CitationError::new(
            "Missing volume, reporter, or page (e.g., ‘123 U.S. 456’).",
            0,
            prefix_end,
            "volume_reporter_page",
        ));
    }

    // Parenthetical contents
    if let (Some(open), Some(close)) = (open, close) {
        let inner_start = open + 1;
        let inner = if close > open {
            &citation[inner_start..close]
        } else {
            ""
        };
        trace!(slog_scope::logger(), "parenthetical: {:?}", inner);

        match inner.rsplit_once(' ') {
            None => errors.push(CitationError::new(
                "Parenthetical must be of the form ‘(Court Year)’.",
                char_offset(citation, open),
                char_offset(citation, close) + 1,
                "parenthetical_contents",
            )),
            Some((court, year)) => {
                // Year
                if !(year.len() == 4 && year.chars().all(|c| c.is_ascii_digit())) {
                    let year_start = inner_start + court.len() + 1;
                    errors.push(CitationError::new(
                        format!("Invalid year ‘{}’; expected four digits.", year),
                        char_offset(citation, year_start),
                        char_offset(citation, year_start + year.len()),
                        "year",
                    ));
                }

                // Court
                if court.trim().is_empty() {
                    errors.push(CitationError::new(
                        "Missing court name before the year inside parentheses.",
                        char_offset(citation, inner_start),
                        char_offset(citation, inner_start + court.len()),
                        "court",
                    ));
                }
            }
        }
    }

    // Overall structure
    if errors.is_empty() && grammar.parse(CitationKind::Case, citation).is_none() {
        errors.push(CitationError::new(
            "Citation structure invalid. Expected: CaseName Volume Reporter Page (Court Year).",
            0,
            total,
            "overall",
        ));
    }

    debug!(
        slog_scope::logger(),
        "Structural check complete: {} error(s)",
        errors.len()
    );
    errors
}

/// Convert a byte index into `text` to a character offset.
fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}
