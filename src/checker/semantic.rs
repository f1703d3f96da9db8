//! Semantic checks: reporter/court compatibility, pincites, and quotations.
//!
//! Court levels are found by keyword matching in a fixed priority order. The
//! order matters (a court string can contain more than one keyword), so it
//! must not be rearranged.

use super::{
    record::CitationRecord,
    repository::{CaseRepository, RepositoryRecord},
    tables::{COURT_REPORTERS, REPORTERS, SIGNALS, STATE_REPORTERS},
};
use crate::error::SemanticError;
use lazy_static::lazy_static;
use regex::Regex;
use similar::TextDiff;
use slog::{debug, trace};
use std::cmp::Reverse;

lazy_static! {
    /// Starred signals, e.g. `*See*`, inside a quotation.
    static ref STARRED_SIGNAL: Regex = {
        let mut signals: Vec<String> = SIGNALS.iter().map(|s| regex::escape(s)).collect();
        signals.sort_by_key(|s| Reverse(s.len()));
        Regex::new(&format!(r"(?i)\*({})\*", signals.join("|"))).unwrap()
    };
}

/// Federal court levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FederalLevel {
    SupremeCourt,
    FederalClaims,
    TaxCourt,
    CourtOfAppeals,
    DistrictCourts,
    MilitaryService,
    VeteransAppeals,
    Unknown,
}

impl FederalLevel {
    /// The key used in the court-reporter table.
    pub fn label(&self) -> &'static str {
        match self {
            FederalLevel::SupremeCourt => "Supreme Court",
            FederalLevel::FederalClaims => "Court of Federal Claims",
            FederalLevel::TaxCourt => "Tax Court",
            FederalLevel::CourtOfAppeals => "Court of Appeals",
            FederalLevel::DistrictCourts => "District Courts",
            FederalLevel::MilitaryService => "Military Service",
            FederalLevel::VeteransAppeals => "Veterans' Appeals",
            FederalLevel::Unknown => "Unknown",
        }
    }
}

/// Map a court string to a federal level. `None` for an empty court.
pub fn federal_level(court: &str) -> Option<FederalLevel> {
    if court.is_empty() {
        return None;
    }

    let court = court.to_lowercase();
    let level = if court.contains("supreme") {
        FederalLevel::SupremeCourt
    } else if court.contains("ct. cl.") {
        FederalLevel::FederalClaims
    } else if court.contains("t.c.") {
        FederalLevel::TaxCourt
    } else if court.contains("cir") {
        FederalLevel::CourtOfAppeals
    } else if court.contains("f.r.d.") || court.contains("district") {
        FederalLevel::DistrictCourts
    } else if court.contains("m.j.") {
        FederalLevel::MilitaryService
    } else if court.contains("vet. app.") {
        FederalLevel::VeteransAppeals
    } else {
        FederalLevel::Unknown
    };

    Some(level)
}

/// Map a reporter to a state court level.
pub fn state_level(reporter: &str) -> Option<&'static str> {
    if reporter.starts_with("Cal. App.") {
        return Some("California Appellate");
    }
    if reporter.starts_with("Cal. Rptr.") {
        return Some("California");
    }
    if reporter == "N.Y.2d" || reporter == "N.Y.3d" {
        return Some("New York Appellate");
    }
    if reporter == "N.Y." || reporter == "N.Y.S." {
        return Some("New York");
    }

    STATE_REPORTERS
        .iter()
        .find(|(_, reporters)| reporters.contains(&reporter))
        .map(|(state, _)| *state)
}

fn state_reporters(level: &str) -> Option<&'static [&'static str]> {
    STATE_REPORTERS
        .iter()
        .find(|(state, _)| *state == level)
        .map(|(_, reporters)| *reporters)
}

/// The reporter must be one the grammar knows.
pub fn check_reporter_allowed(reporter: &str) -> Result<(), SemanticError> {
    if REPORTERS.contains(&reporter) {
        Ok(())
    } else {
        Err(SemanticError::ReporterNotAllowed {
            reporter: reporter.to_string(),
        })
    }
}

/// The reporter must belong to the citing court's level.
///
/// A court that maps to no known federal level and a reporter that maps to no
/// state pass unchecked.
pub fn check_reporter_court(record: &CitationRecord) -> Result<(), SemanticError> {
    let court = record.court().unwrap_or("");
    let reporter = record.reporter().unwrap_or("");

    let not_for_court = |level: &str, allowed: &[&str]| SemanticError::ReporterNotForCourt {
        reporter: reporter.to_string(),
        level: level.to_string(),
        allowed: allowed.iter().map(|r| r.to_string()).collect(),
    };

    match federal_level(court) {
        Some(level) if level != FederalLevel::Unknown => {
            trace!(slog_scope::logger(), "federal level: {:?}", level);
            if let Some(allowed) = COURT_REPORTERS.get(level.label()) {
                if !allowed.contains(&reporter) {
                    return Err(not_for_court(
                        &format!("federal {}", level.label()),
                        allowed,
                    ));
                }
            }
            Ok(())
        }
        _ => {
            if let Some(level) = state_level(reporter) {
                trace!(slog_scope::logger(), "state level: {}", level);
                if let Some(allowed) = state_reporters(level) {
                    if !allowed.contains(&reporter) {
                        return Err(not_for_court(level, allowed));
                    }
                }
            }
            Ok(())
        }
    }
}

/// Look the citation up in the repository, checking the pincite if there is
/// one.
pub fn check_pincite(
    repository: &dyn CaseRepository,
    record: &CitationRecord,
    pincite: Option<&str>,
) -> Result<RepositoryRecord, SemanticError> {
    debug!(slog_scope::logger(), "Checking pincite {:?}...", pincite);
    let found = repository.fetch(
        record.volume().unwrap_or(""),
        record.reporter().unwrap_or(""),
        record.page().unwrap_or(""),
        pincite,
    )?;

    found.ok_or(SemanticError::CitationNotFound)
}

/// Strip starred signals from a quotation.
pub fn remove_signals(quote: &str) -> String {
    STARRED_SIGNAL.replace_all(quote, "").trim().to_string()
}

/// The quotation must be close enough to the source text.
///
/// Short quotations (under 50 characters) need a similarity ratio above 0.3;
/// longer ones above 0.6.
pub fn check_quote(quote: &str, source_text: &str) -> Result<(), SemanticError> {
    let cleaned = remove_signals(quote);
    let ratio = TextDiff::from_chars(cleaned.as_str(), source_text).ratio();
    let threshold = if cleaned.chars().count() < 50 { 0.3 } else { 0.6 };
    trace!(
        slog_scope::logger(),
        "quote ratio {} against threshold {}",
        ratio,
        threshold
    );

    if ratio > threshold {
        Ok(())
    } else {
        Err(SemanticError::QuoteMismatch)
    }
}
