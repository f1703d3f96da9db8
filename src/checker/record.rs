//! The structured form of a parsed citation.

use super::grammar::{CitationKind, Fields, RuleMatch};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// A single `volume reporter page` triple inside a run of parallel cites.
    static ref PARALLEL: Regex =
        Regex::new(r"(?P<volume>\d+)\s+(?P<reporter>[^,]+?)\s+(?P<page>\d+)\b").unwrap();
}

/// A parallel citation to the same decision in another reporter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParallelCite {
    pub volume: String,
    pub reporter: String,
    pub page: String,
}

/// A parsed citation: the captured fields plus any parallel citations.
///
/// Records are built by the grammar and not changed afterwards, except that a
/// case name may be replaced once by its normalized form (see
/// [`CitationRecord::with_case_name`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationRecord {
    pub kind: CitationKind,
    pub rule: String,
    fields: Fields,
    parallels: Vec<ParallelCite>,
}

impl CitationRecord {
    /// Build a record from a grammar match.
    ///
    /// The raw `parallels` capture, if any, is split into [`ParallelCite`]s;
    /// empty captures are dropped.
    pub fn from_match(kind: CitationKind, rule_match: RuleMatch) -> CitationRecord {
        let mut fields = rule_match.fields;
        let parallels = match fields.remove("parallels") {
            Some(raw) => PARALLEL
                .captures_iter(&raw)
                .map(|caps| ParallelCite {
                    volume: caps["volume"].to_string(),
                    reporter: caps["reporter"].to_string(),
                    page: caps["page"].to_string(),
                })
                .collect(),
            None => Vec::new(),
        };
        fields.retain(|_, v| !v.is_empty());

        CitationRecord {
            kind,
            rule: rule_match.rule.to_string(),
            fields,
            parallels,
        }
    }

    /// Build a record from loose fields, e.g. for a short-form request on a
    /// source that was never parsed.
    pub fn from_fields(kind: CitationKind, fields: &[(&str, &str)]) -> CitationRecord {
        CitationRecord {
            kind,
            rule: "manual".to_string(),
            fields: fields
                .iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            parallels: Vec::new(),
        }
    }

    pub fn with_parallels(mut self, parallels: Vec<ParallelCite>) -> CitationRecord {
        self.parallels = parallels;
        self
    }

    /// Replace the case name.
    pub fn with_case_name(mut self, case_name: String) -> CitationRecord {
        self.fields.insert("case_name".to_string(), case_name);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn parallels(&self) -> &[ParallelCite] {
        &self.parallels
    }

    pub fn case_name(&self) -> Option<&str> {
        self.get("case_name")
    }

    pub fn volume(&self) -> Option<&str> {
        self.get("volume")
    }

    pub fn reporter(&self) -> Option<&str> {
        self.get("reporter")
    }

    pub fn page(&self) -> Option<&str> {
        self.get("page")
    }

    pub fn pinpoint(&self) -> Option<&str> {
        self.get("pinpoint")
    }

    pub fn court(&self) -> Option<&str> {
        self.get("court")
    }

    pub fn year(&self) -> Option<&str> {
        self.get("year")
    }

    /// The `volume_reporter_page` key used to index documents.
    pub fn composite_key(&self) -> Option<String> {
        Some(format!(
            "{}_{}_{}",
            self.volume()?,
            self.reporter()?,
            self.page()?
        ))
    }
}
