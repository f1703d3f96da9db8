//! Short forms and "Id."
//!
//! The resolver remembers the identity of the last work it produced a short
//! form for. A request for the same work again yields "Id."; anything else
//! yields the explicit short form and becomes the new last work.

use super::{
    grammar::CitationKind,
    record::{CitationRecord, ParallelCite},
};
use crate::error::LookupFailure;
use slog::{debug, trace};

/// The identity of a cited work, for "Id." purposes.
///
/// Parallel citations are kept sorted, so two keys built from the same
/// parallels in a different order are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortFormKey {
    pub kind: CitationKind,
    pub volume: Option<String>,
    /// The reporter, or failing that the code, or failing that the title.
    pub source: Option<String>,
    /// The pinpoint, or failing that the page, or failing that the section.
    pub pin: Option<String>,
    pub parallels: Vec<ParallelCite>,
}

impl ShortFormKey {
    pub fn from_record(record: &CitationRecord) -> ShortFormKey {
        let owned = |field: Option<&str>| field.map(str::to_string);
        let mut parallels = record.parallels().to_vec();
        parallels.sort();

        ShortFormKey {
            kind: record.kind,
            volume: owned(record.volume()),
            source: owned(
                record
                    .reporter()
                    .or_else(|| record.get("code"))
                    .or_else(|| record.get("title")),
            ),
            pin: owned(
                record
                    .pinpoint()
                    .or_else(|| record.page())
                    .or_else(|| record.get("section")),
            ),
            parallels,
        }
    }
}

/// Tracks the last cited work for one document.
///
/// A resolver holds a single "current work", so it must not be shared between
/// documents. Each checker owns its own.
#[derive(Debug, Default, Clone)]
pub struct ShortCiteResolver {
    last_key: Option<ShortFormKey>,
}

impl ShortCiteResolver {
    pub fn new() -> ShortCiteResolver {
        ShortCiteResolver::default()
    }

    pub fn last_key(&self) -> Option<&ShortFormKey> {
        self.last_key.as_ref()
    }

    /// Forget the last work.
    pub fn reset(&mut self) {
        self.last_key = None;
    }

    /// The short form for `record`.
    ///
    /// Court rules and administrative materials have no short form.
    pub fn short_form(&mut self, record: &CitationRecord) -> Result<String, LookupFailure> {
        let kind = record.kind;
        if matches!(kind, CitationKind::CourtRule | CitationKind::Administrative) {
            return Err(LookupFailure::UnsupportedShortFormKind(kind));
        }

        let key = ShortFormKey::from_record(record);
        if self.last_key.as_ref() == Some(&key) {
            trace!(slog_scope::logger(), "same work as last time: {:?}", key);
            return Ok(match &key.pin {
                Some(pin) => format!("Id. at {}.", pin),
                None => "Id.".to_string(),
            });
        }

        let mut short = explicit_form(record)?;
        if !short.ends_with('.') {
            short.push('.');
        }

        debug!(slog_scope::logger(), "New short form: {}", short);
        self.last_key = Some(key);
        Ok(short)
    }
}

fn explicit_form(record: &CitationRecord) -> Result<String, LookupFailure> {
    let kind = record.kind;
    let require = |field: &'static str| {
        record
            .get(field)
            .ok_or(LookupFailure::IncompleteRecord { kind, field })
    };

    let short = match kind {
        CitationKind::Case => {
            let name = require("case_name")?
                .split_whitespace()
                .next()
                .unwrap_or_default();
            let mut short = format!(
                "{}, {} {} at {}",
                name,
                require("volume")?,
                require("reporter")?,
                require("page")?
            );
            for parallel in record.parallels() {
                short.push_str(&format!(
                    ", {} {} at {}",
                    parallel.volume, parallel.reporter, parallel.page
                ));
            }
            short
        }
        CitationKind::Statute => {
            let section = require("section")?;
            match record.get("code").map(str::trim) {
                Some(code) if !code.is_empty() => format!("{} § {}", code, section),
                _ => format!("§ {}", section),
            }
        }
        CitationKind::Regulation => match (record.get("title"), record.get("section")) {
            (Some(title), Some(section)) => format!("{} C.F.R. § {}", title, section),
            (None, Some(section)) => format!("§ {}", section),
            _ => format!("§ {}", require("number")?),
        },
        CitationKind::Book | CitationKind::Article => {
            let pinpoint = match kind {
                CitationKind::Article => record.pinpoint().or_else(|| record.page()),
                _ => record.pinpoint(),
            };
            match record.get("author") {
                Some(author) => match pinpoint {
                    Some(pin) => format!("{}, supra at {}", author, pin),
                    None => format!("{}, supra", author),
                },
                None => "Id.".to_string(),
            }
        }
        CitationKind::CourtRule | CitationKind::Administrative => {
            return Err(LookupFailure::UnsupportedShortFormKind(kind))
        }
    };

    Ok(short)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha() -> CitationRecord {
        CitationRecord::from_fields(
            CitationKind::Case,
            &[
                ("case_name", "Alpha v. Beta"),
                ("volume", "10"),
                ("reporter", "U.S."),
                ("page", "100"),
                ("court", "U.S."),
                ("year", "1800"),
            ],
        )
    }

    fn statute() -> CitationRecord {
        CitationRecord::from_fields(
            CitationKind::Statute,
            &[("code", "12 C.S.C."), ("section", "3456")],
        )
    }

    #[test]
    fn explicit_then_id() {
        let mut resolver = ShortCiteResolver::new();
        assert_eq!(resolver.short_form(&alpha()).unwrap(), "Alpha, 10 U.S. at 100.");
        assert_eq!(resolver.short_form(&alpha()).unwrap(), "Id. at 100.");
        assert_eq!(resolver.short_form(&alpha()).unwrap(), "Id. at 100.");
    }

    #[test]
    fn other_work_in_between() {
        let mut resolver = ShortCiteResolver::new();
        resolver.short_form(&alpha()).unwrap();
        assert_eq!(resolver.short_form(&statute()).unwrap(), "12 C.S.C. § 3456.");
        assert_eq!(resolver.short_form(&alpha()).unwrap(), "Alpha, 10 U.S. at 100.");
    }

    #[test]
    fn reset_forgets() {
        let mut resolver = ShortCiteResolver::new();
        resolver.short_form(&alpha()).unwrap();
        resolver.reset();
        assert!(resolver.last_key().is_none());
        assert_eq!(resolver.short_form(&alpha()).unwrap(), "Alpha, 10 U.S. at 100.");
    }

    #[test]
    fn parallels_are_order_insensitive() {
        let a = ParallelCite {
            volume: "1".to_string(),
            reporter: "S. Ct.".to_string(),
            page: "2".to_string(),
        };
        let b = ParallelCite {
            volume: "3".to_string(),
            reporter: "L. Ed.".to_string(),
            page: "4".to_string(),
        };
        let first = alpha().with_parallels(vec![a.clone(), b.clone()]);
        let second = alpha().with_parallels(vec![b, a]);

        assert_eq!(
            ShortFormKey::from_record(&first),
            ShortFormKey::from_record(&second)
        );

        let mut resolver = ShortCiteResolver::new();
        assert_eq!(
            resolver.short_form(&first).unwrap(),
            "Alpha, 10 U.S. at 100, 1 S. Ct. at 2, 3 L. Ed. at 4."
        );
        assert_eq!(resolver.short_form(&second).unwrap(), "Id. at 100.");
    }

    #[test]
    fn statute_without_code() {
        let record = CitationRecord::from_fields(CitationKind::Statute, &[("section", "12")]);
        assert_eq!(ShortCiteResolver::new().short_form(&record).unwrap(), "§ 12.");
    }

    #[test]
    fn regulations() {
        let cfr = CitationRecord::from_fields(
            CitationKind::Regulation,
            &[("title", "29"), ("section", "1604.11")],
        );
        assert_eq!(
            ShortCiteResolver::new().short_form(&cfr).unwrap(),
            "29 C.F.R. § 1604.11."
        );
    }

    #[test]
    fn books_and_articles() {
        let book = CitationRecord::from_fields(
            CitationKind::Book,
            &[("author", "Wright"), ("pinpoint", "12")],
        );
        assert_eq!(
            ShortCiteResolver::new().short_form(&book).unwrap(),
            "Wright, supra at 12."
        );

        let article = CitationRecord::from_fields(
            CitationKind::Article,
            &[("author", "Gamma"), ("page", "45")],
        );
        assert_eq!(
            ShortCiteResolver::new().short_form(&article).unwrap(),
            "Gamma, supra at 45."
        );

        let anonymous = CitationRecord::from_fields(CitationKind::Book, &[("title", "Treatise")]);
        assert_eq!(ShortCiteResolver::new().short_form(&anonymous).unwrap(), "Id.");
    }

    #[test]
    fn unsupported_kinds() {
        let rule = CitationRecord::from_fields(CitationKind::CourtRule, &[("section", "12")]);
        assert_eq!(
            ShortCiteResolver::new().short_form(&rule),
            Err(LookupFailure::UnsupportedShortFormKind(CitationKind::CourtRule))
        );
    }

    #[test]
    fn incomplete_case() {
        let record = CitationRecord::from_fields(CitationKind::Case, &[("case_name", "Alpha")]);
        let mut resolver = ShortCiteResolver::new();
        assert_eq!(
            resolver.short_form(&record),
            Err(LookupFailure::IncompleteRecord {
                kind: CitationKind::Case,
                field: "volume"
            })
        );
        assert!(resolver.last_key().is_none());
    }
}
