//! The single mechanical reformat tried on a citation that failed to
//! validate.

use lazy_static::lazy_static;
use regex::Regex;
use slog::trace;

lazy_static! {
    /// A loosely written case citation: name, volume, reporter, page, an
    /// optional court, and a trailing year. Reporters may carry a series
    /// ("F.2d") or spaces ("F. Supp. 2d").
    static ref LOOSE_CASE: Regex = Regex::new(
        r"^(?P<case>.+?)\s+(?P<vol>\d+)\s+(?P<rep>[A-Za-z][A-Za-z0-9.' ]*?)\s+(?P<page>\d+)\b\s*(?P<court>.+?)?\s*(?P<year>\d{4})\.?$"
    )
    .unwrap();
}

/// Rebuild `citation` as `Case, Volume Reporter Page (Court Year)`.
///
/// Text that does not look like a loosely written case citation comes back
/// trimmed but otherwise unchanged.
pub fn fix_citation_format(citation: &str) -> String {
    let text = citation.trim();
    let caps = match LOOSE_CASE.captures(text) {
        Some(c) => c,
        None => {
            trace!(slog_scope::logger(), "no reformat for {:?}", text);
            return text.to_string();
        }
    };

    let court = caps.name("court").map_or("", |m| m.as_str());
    let parenthetical = format!("{} {}", court, &caps["year"]);
    let fixed = format!(
        "{}, {} {} {} ({})",
        caps["case"].trim_end_matches(','),
        &caps["vol"],
        &caps["rep"],
        &caps["page"],
        parenthetical.trim()
    );
    trace!(slog_scope::logger(), "reformatted {:?} -> {:?}", text, fixed);
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_comma_and_parentheses() {
        assert_eq!(
            fix_citation_format("Brown v. Board 347 U.S. 483 U.S. 1954"),
            "Brown v. Board, 347 U.S. 483 (U.S. 1954)"
        );
    }

    #[test]
    fn keeps_existing_comma() {
        assert_eq!(
            fix_citation_format("Doe v. Roe, 12 F.2d 34 2d Cir. 1926."),
            "Doe v. Roe, 12 F.2d 34 (2d Cir. 1926)"
        );
    }

    #[test]
    fn spaced_series_reporter() {
        assert_eq!(
            fix_citation_format("Smith v. Jones 100 F. Supp. 2d 200 S.D.N.Y. 2000"),
            "Smith v. Jones, 100 F. Supp. 2d 200 (S.D.N.Y. 2000)"
        );
    }

    #[test]
    fn bogus_text_is_untouched() {
        assert_eq!(
            fix_citation_format("completely bogus text"),
            "completely bogus text"
        );
        assert_eq!(fix_citation_format("  padded  "), "padded");
    }
}
