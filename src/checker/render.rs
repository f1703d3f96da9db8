//! Rendering citations and quotations for display.
//!
//! Emphasis is applied to the case name, to the cross-reference words "id.",
//! "supra", and "infra", and to explanatory phrases such as "aff'd". Signals
//! are emphasized last, and only where they open a citation clause.

use super::{
    record::CitationRecord,
    tables::{EXPLANATORY_PHRASES, SIGNALS},
};
use crate::config::Style;
use lazy_static::lazy_static;
use regex::{Captures, NoExpand, Regex};
use slog::trace;

lazy_static! {
    static ref CROSS_REFERENCES: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"\bid\.").unwrap(), "id."),
        (Regex::new(r"\bsupra\b").unwrap(), "supra"),
        (Regex::new(r"\binfra\b").unwrap(), "infra"),
    ];

    static ref PHRASES: Vec<Regex> = EXPLANATORY_PHRASES
        .iter()
        .map(|p| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(p))).unwrap())
        .collect();

    /// One pattern per signal, in priority order. A signal opens a clause
    /// when it starts the text or follows ". " or "; ".
    static ref SIGNAL_PATTERNS: Vec<Regex> = SIGNALS
        .iter()
        .map(|s| Regex::new(&format!(r"(?i)(^|[.;]\s+)({})\s", regex::escape(s))).unwrap())
        .collect();

    static ref ELLIPSIS: Regex = Regex::new(r"\s*\.{3,}\s*").unwrap();
}

/// Quotations of this many words or more are set as block quotes.
const BLOCK_QUOTE_WORDS: usize = 50;

/// Render a case citation as
/// `CaseName, Volume Reporter Page[, Pinpoint][, parallels] (Court Year)`.
pub fn render(record: &CitationRecord, style: Style) -> String {
    let case_name = record.case_name().unwrap_or("");
    let mut s = format!(
        "{}, {} {} {}",
        case_name,
        record.volume().unwrap_or(""),
        record.reporter().unwrap_or(""),
        record.page().unwrap_or("")
    );
    if let Some(pinpoint) = record.pinpoint() {
        s.push_str(&format!(", {}", pinpoint));
    }
    for parallel in record.parallels() {
        s.push_str(&format!(
            ", {} {} {}",
            parallel.volume, parallel.reporter, parallel.page
        ));
    }
    s.push_str(&format!(
        " ({} {})",
        record.court().unwrap_or(""),
        record.year().unwrap_or("")
    ));

    if !case_name.is_empty() {
        s = s.replacen(case_name, &style.emphasize(case_name), 1);
    }

    for (pattern, word) in CROSS_REFERENCES.iter() {
        s = pattern
            .replace_all(&s, NoExpand(&style.emphasize(word)))
            .into_owned();
    }

    for pattern in PHRASES.iter() {
        s = pattern
            .replace_all(&s, |caps: &Captures| style.emphasize(&caps[0]))
            .into_owned();
    }

    let s = apply_signal_formatting(&s, style);
    trace!(slog_scope::logger(), "rendered: {}", s);
    s
}

/// Emphasize signals that open a citation clause.
///
/// "See Smith" and "Id.; see also Smith" have their signals marked; "as we
/// see in Smith" does not.
pub fn apply_signal_formatting(text: &str, style: Style) -> String {
    let mut text = text.to_string();
    for pattern in SIGNAL_PATTERNS.iter() {
        text = pattern
            .replace_all(&text, |caps: &Captures| {
                format!("{}{} ", &caps[1], style.emphasize(&caps[2]))
            })
            .into_owned();
    }
    text
}

/// Format a quotation with its citation.
///
/// Quotations under fifty words run inline in quotation marks, with a
/// lowercase first letter bracketed and capitalized. Longer ones are indented
/// one space per line and the citation follows on its own line.
pub fn format_quote(quote: &str, citation: &str) -> String {
    let words = quote.split_whitespace().count();

    let quote = quote
        .replace(['“', '”'], "\"")
        .replace('"', "'")
        .replace(['‘', '’'], "'");
    let quote = ELLIPSIS.replace_all(&quote, " . . . ");
    let quote = quote.trim();

    if words < BLOCK_QUOTE_WORDS {
        let mut chars = quote.chars();
        let quote = match chars.next() {
            Some(first) if first.is_lowercase() => {
                format!("[{}]{}", first.to_uppercase(), chars.as_str())
            }
            _ => quote.to_string(),
        };
        format!("“{}” {}", quote, citation)
    } else {
        let indented: Vec<String> = quote.lines().map(|line| format!(" {}", line)).collect();
        format!("{}\n{}", indented.join("\n"), citation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{grammar::CitationKind, record::ParallelCite};

    fn brown() -> CitationRecord {
        CitationRecord::from_fields(
            CitationKind::Case,
            &[
                ("case_name", "Brown v. Board"),
                ("volume", "347"),
                ("reporter", "U.S."),
                ("page", "483"),
                ("court", "U.S."),
                ("year", "1954"),
            ],
        )
    }

    #[test]
    fn renders_case() {
        assert_eq!(
            render(&brown(), Style::Italic),
            "<i>Brown v. Board</i>, 347 U.S. 483 (U.S. 1954)"
        );
        assert_eq!(
            render(&brown(), Style::Underline),
            "__Brown v. Board__, 347 U.S. 483 (U.S. 1954)"
        );
    }

    #[test]
    fn renders_pinpoint_and_parallels() {
        let record = CitationRecord::from_fields(
            CitationKind::Case,
            &[
                ("case_name", "Roe v. Wade"),
                ("volume", "410"),
                ("reporter", "U.S."),
                ("page", "113"),
                ("pinpoint", "153"),
                ("court", "U.S."),
                ("year", "1973"),
            ],
        )
        .with_parallels(vec![ParallelCite {
            volume: "93".to_string(),
            reporter: "S. Ct.".to_string(),
            page: "705".to_string(),
        }]);

        assert_eq!(
            render(&record, Style::Italic),
            "<i>Roe v. Wade</i>, 410 U.S. 113, 153, 93 S. Ct. 705 (U.S. 1973)"
        );
    }

    #[test]
    fn explanatory_phrases_and_cross_references() {
        let record = brown().with_case_name("Smith v. Jones, aff’d".to_string());
        let rendered = render(&record, Style::Italic);
        assert!(rendered.contains("<i>aff’d</i>"));

        let record = brown().with_case_name("Smith, supra".to_string());
        assert!(render(&record, Style::Italic).contains("<i>supra</i>"));
    }

    #[test]
    fn signals_only_open_clauses() {
        assert_eq!(
            apply_signal_formatting("See also Smith; see Jones", Style::Italic),
            "<i>See also</i> Smith; <i>see</i> Jones"
        );
        assert_eq!(
            apply_signal_formatting("as we see in Smith", Style::Italic),
            "as we see in Smith"
        );
        assert_eq!(
            apply_signal_formatting("Id. Cf. Jones", Style::Underline),
            "Id. __Cf.__ Jones"
        );
    }

    #[test]
    fn inline_quote() {
        assert_eq!(
            format_quote("the “law” is... clear", "Id."),
            "“[T]he 'law' is . . . clear” Id."
        );
    }

    #[test]
    fn forty_nine_words_run_inline() {
        let quote = vec!["Word"; 49].join(" ");
        let formatted = format_quote(&quote, "Id. at 5.");
        assert!(formatted.starts_with('“'));
        assert!(formatted.ends_with("” Id. at 5."));
    }

    #[test]
    fn fifty_words_are_a_block() {
        let quote = vec!["word"; 50].join(" ");
        let formatted = format_quote(&quote, "Id. at 5.");
        assert_eq!(formatted, format!(" {}\nId. at 5.", quote));
    }
}
