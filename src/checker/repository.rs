//! The case repository: decision text and valid pincite ranges.
//!
//! The pipeline only needs [`CaseRepository::fetch`]. [`MemoryRepository`] is
//! a simple in-memory implementation that can be loaded from a JSON file.

use crate::error::SemanticError;
use serde::{Deserialize, Serialize};
use slog::{debug, trace};
use std::collections::HashMap;

/// A decision held by a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub text: String,
    pub valid_pin_range: (u32, u32),
}

/// A source of decisions, looked up by volume, reporter, and first page.
///
/// Implementations must return `Ok(None)` when the decision is unknown and
/// must reject a supplied pincite (or pincite range) that falls outside the
/// record's valid range; [`check_pin_range`] does the latter.
pub trait CaseRepository {
    fn fetch(
        &self,
        volume: &str,
        reporter: &str,
        page: &str,
        pincite: Option<&str>,
    ) -> Result<Option<RepositoryRecord>, SemanticError>;
}

/// Check `pincite` (a page like `485` or a range like `485-87`) against a
/// record's valid range.
///
/// An abbreviated range end takes its missing leading digits from the start,
/// so `485-87` covers pages 485 through 487. A range must not run backwards.
pub fn check_pin_range(record: &RepositoryRecord, pincite: &str) -> Result<(), SemanticError> {
    let (low, high) = record.valid_pin_range;
    let invalid = || SemanticError::PinciteInvalid(pincite.to_string());
    let parse = |s: &str| s.parse::<u32>().map_err(|_| invalid());

    let (first, last) = match pincite.split_once('-') {
        Some((start, end)) => {
            let (start, end) = (start.trim(), end.trim());
            let first = parse(start)?;
            let end = match start.len().checked_sub(end.len()) {
                Some(n) if n > 0 && !end.is_empty() => format!("{}{}", &start[..n], end),
                _ => end.to_string(),
            };
            let last = parse(&end)?;
            if last < first {
                return Err(invalid());
            }
            (first, last)
        }
        None => {
            let page = parse(pincite.trim())?;
            (page, page)
        }
    };
    trace!(slog_scope::logger(), "pin pages {}..={}", first, last);

    if low <= first && last <= high {
        Ok(())
    } else {
        Err(SemanticError::PinciteOutOfRange {
            pincite: pincite.to_string(),
            low,
            high,
        })
    }
}

/// An in-memory repository.
#[derive(Debug, Default, Clone)]
pub struct MemoryRepository {
    records: HashMap<String, RepositoryRecord>,
}

impl MemoryRepository {
    pub fn new() -> MemoryRepository {
        MemoryRepository::default()
    }

    pub fn insert(&mut self, volume: &str, reporter: &str, page: &str, record: RepositoryRecord) {
        self.records
            .insert(format!("{}_{}_{}", volume, reporter, page), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CaseRepository for MemoryRepository {
    fn fetch(
        &self,
        volume: &str,
        reporter: &str,
        page: &str,
        pincite: Option<&str>,
    ) -> Result<Option<RepositoryRecord>, SemanticError> {
        let key = format!("{}_{}_{}", volume, reporter, page);
        trace!(slog_scope::logger(), "repository lookup: {}", key);

        match self.records.get(&key) {
            Some(record) => {
                if let Some(pin) = pincite {
                    check_pin_range(record, pin)?;
                }
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }
}

/// One entry in a repository file.
#[derive(Debug, Deserialize)]
struct RepositoryEntry {
    volume: String,
    reporter: String,
    page: String,
    text: String,
    valid_pin_range: (u32, u32),
}

/// Deserialize a JSON array of repository entries.
pub fn build_repository(json: &str) -> Result<MemoryRepository, String> {
    debug!(slog_scope::logger(), "Starting repository parsing...");
    let entries: Vec<RepositoryEntry> = match serde_json::from_str(json) {
        Ok(e) => e,
        Err(e) => {
            let err_msg = format!("error deserializing the case repository—{}", e);
            return Err(err_msg);
        }
    };

    let mut repository = MemoryRepository::new();
    for entry in entries {
        repository.insert(
            &entry.volume,
            &entry.reporter,
            &entry.page,
            RepositoryRecord {
                text: entry.text,
                valid_pin_range: entry.valid_pin_range,
            },
        );
    }

    debug!(
        slog_scope::logger(),
        "Repository parsed: {} record(s)",
        repository.len()
    );
    Ok(repository)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brown() -> MemoryRepository {
        let mut repository = MemoryRepository::new();
        repository.insert(
            "347",
            "U.S.",
            "483",
            RepositoryRecord {
                text: "Brown v. Board decision text...".to_string(),
                valid_pin_range: (480, 500),
            },
        );
        repository
    }

    #[test]
    fn fetch_in_range() {
        let record = brown().fetch("347", "U.S.", "483", Some("490")).unwrap();
        assert!(record.is_some());

        let range = brown().fetch("347", "U.S.", "483", Some("485-495")).unwrap();
        assert!(range.is_some());
    }

    #[test]
    fn fetch_out_of_range() {
        assert_eq!(
            brown().fetch("347", "U.S.", "483", Some("501")),
            Err(SemanticError::PinciteOutOfRange {
                pincite: "501".to_string(),
                low: 480,
                high: 500
            })
        );
        assert!(brown().fetch("347", "U.S.", "483", Some("470-490")).is_err());
    }

    #[test]
    fn abbreviated_range_end() {
        assert!(brown().fetch("347", "U.S.", "483", Some("485-87")).is_ok());
        assert!(brown().fetch("347", "U.S.", "483", Some("498-9")).is_ok());
        assert_eq!(
            brown().fetch("347", "U.S.", "483", Some("495-05")),
            Err(SemanticError::PinciteInvalid("495-05".to_string()))
        );
        assert!(matches!(
            brown().fetch("347", "U.S.", "483", Some("495-505")),
            Err(SemanticError::PinciteOutOfRange { .. })
        ));
    }

    #[test]
    fn reversed_range() {
        assert_eq!(
            brown().fetch("347", "U.S.", "483", Some("495-485")),
            Err(SemanticError::PinciteInvalid("495-485".to_string()))
        );
    }

    #[test]
    fn fetch_bad_pincite() {
        assert_eq!(
            brown().fetch("347", "U.S.", "483", Some("passim")),
            Err(SemanticError::PinciteInvalid("passim".to_string()))
        );
    }

    #[test]
    fn fetch_missing() {
        assert_eq!(brown().fetch("1", "U.S.", "1", Some("1")), Ok(None));
    }

    #[test]
    fn load_from_json() {
        let json = r#"[
            {"volume": "291", "reporter": "U.S.", "page": "193",
             "text": "Opinion text here...", "valid_pin_range": [190, 210]}
        ]"#;
        let repository = build_repository(json).unwrap();

        assert_eq!(repository.len(), 1);
        let record = repository.fetch("291", "U.S.", "193", None).unwrap().unwrap();
        assert_eq!(record.valid_pin_range, (190, 210));
    }

    #[test]
    fn load_bad_json() {
        assert!(build_repository("{").is_err());
    }
}
