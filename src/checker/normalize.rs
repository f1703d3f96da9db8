//! Abbreviation of months and journal names inside citation text.
//!
//! Both rewrites are context sensitive. A month is only abbreviated inside a
//! date parenthetical, and a journal name only when a `volume reporter page`
//! triple follows it.

use super::tables::{JOURNALS, MONTHS};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use slog::{debug, trace};
use std::{cmp::Reverse, collections::HashMap};

/// User-supplied journal abbreviations, full name to abbreviation.
pub type UserJournals = HashMap<String, String>;

lazy_static! {
    /// Any full month name.
    static ref MONTH: Regex = {
        let months: Vec<&str> = MONTHS.keys().copied().collect();
        Regex::new(&format!(r"\b({})\b", months.join("|"))).unwrap()
    };

    /// A four-digit year closing off the text before a `)`.
    static ref YEAR_TAIL: Regex = Regex::new(r"\W\d{4}$").unwrap();

    /// The built-in journal normalizer.
    static ref STANDARD: TextNormalizer = {
        let journals = JOURNALS
            .entries()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TextNormalizer::from_table(journals).unwrap()
    };
}

/// Read user journal abbreviations from a RON map. Every entry needs both a
/// name and an abbreviation.
pub fn load_user_journals(input: &str) -> Result<UserJournals, String> {
    let journals: UserJournals = ron::de::from_str(input)
        .map_err(|e| format!("error deserializing the user journal file—{}", e))?;

    if let Some((name, _)) = journals
        .iter()
        .find(|(name, abbreviation)| name.trim().is_empty() || abbreviation.trim().is_empty())
    {
        return Err(format!(
            "error in the user journal file—blank entry for {:?}",
            name
        ));
    }

    debug!(
        slog_scope::logger(),
        "User journal file parsed: {} journal(s)",
        journals.len()
    );
    Ok(journals)
}

/// Rewrites citation text before it is validated.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    /// Abbreviations keyed by title-cased full name.
    journals: HashMap<String, String>,
    journal_pattern: Regex,
}

impl TextNormalizer {
    /// A normalizer using the built-in journals plus any user journals. User
    /// journals take precedence.
    pub fn new(user_journals: Option<&UserJournals>) -> Result<TextNormalizer, String> {
        match user_journals {
            None => Ok(STANDARD.clone()),
            Some(user) => {
                let mut journals = STANDARD.journals.clone();
                for (name, abbreviation) in user {
                    journals.insert(title_case(name), abbreviation.clone());
                }
                TextNormalizer::from_table(journals)
            }
        }
    }

    fn from_table(journals: HashMap<String, String>) -> Result<TextNormalizer, String> {
        // Longest names first so a journal is never cut short by another
        // journal whose name it starts with.
        let mut names: Vec<&String> = journals.keys().collect();
        names.sort_by_key(|n| Reverse(n.len()));
        let alternation = names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<String>>()
            .join("|");

        let journal_pattern = Regex::new(&format!(
            r"(?i)\b({})(\s+\d+\s+[A-Za-z.]+\s+\d+)",
            alternation
        ))
        .map_err(|e| format!("error building the journal pattern—{}", e))?;

        Ok(TextNormalizer {
            journals,
            journal_pattern,
        })
    }

    /// Abbreviate months, then journals.
    pub fn normalize(&self, text: &str) -> String {
        let text = abbreviate_months(text);
        let text = self.abbreviate_journals(&text);
        trace!(slog_scope::logger(), "normalized: {:?}", text);
        text
    }

    /// Replace full journal names that are followed by a volume, reporter,
    /// and page.
    pub fn abbreviate_journals(&self, text: &str) -> String {
        self.journal_pattern
            .replace_all(text, |caps: &Captures| {
                let name = &caps[1];
                let abbreviation = self
                    .journals
                    .get(&title_case(name))
                    .map(String::as_str)
                    .unwrap_or(name);
                format!("{}{}", abbreviation, &caps[2])
            })
            .into_owned()
    }
}

impl Default for TextNormalizer {
    fn default() -> TextNormalizer {
        STANDARD.clone()
    }
}

/// Replace full month names that sit inside a parenthetical ending in a
/// four-digit year, e.g. `(2d Cir. March 3, 1999)`.
pub fn abbreviate_months(text: &str) -> String {
    MONTH
        .replace_all(text, |caps: &Captures| {
            let month = &caps[1];
            let end = caps.get(0).map_or(text.len(), |m| m.end());
            let rest = &text[end..];
            // The month must sit inside the parenthetical, so no `(` may come
            // between it and the closing `)`.
            let in_date = match rest.find(')') {
                Some(close) => !rest[..close].contains('(') && YEAR_TAIL.is_match(&rest[..close]),
                None => false,
            };

            match MONTHS.get(month) {
                Some(abbreviation) if in_date => abbreviation.to_string(),
                _ => month.to_string(),
            }
        })
        .into_owned()
}

/// Capitalize the first letter of every word and lowercase the rest.
///
/// A "word" starts at any letter that follows a non-letter, so "ass'n"
/// becomes "Ass'N".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_cased = true;
        } else {
            out.push(c);
            previous_cased = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_inside_date_parentheticals() {
        assert_eq!(
            abbreviate_months("Doe v. Roe, No. 12 (D. Mass. September 5, 2001)"),
            "Doe v. Roe, No. 12 (D. Mass. Sept. 5, 2001)"
        );
    }

    #[test]
    fn months_outside_parentheticals_are_kept() {
        assert_eq!(
            abbreviate_months("The January Group v. Smith (D. Mass. 2001)"),
            "The January Group v. Smith (D. Mass. 2001)"
        );
        assert_eq!(abbreviate_months("decided in August"), "decided in August");
    }

    #[test]
    fn months_need_a_year_before_the_close() {
        assert_eq!(
            abbreviate_months("(argued December 3) (2001)"),
            "(argued December 3) (2001)"
        );
    }

    #[test]
    fn journals_before_a_triple() {
        let normalizer = TextNormalizer::default();
        assert_eq!(
            normalizer.abbreviate_journals("see harvard law review 99 U.S. 100"),
            "see Harv. L. Rev. 99 U.S. 100"
        );
        assert_eq!(
            normalizer.abbreviate_journals("see the Harvard Law Review generally"),
            "see the Harvard Law Review generally"
        );
    }

    #[test]
    fn multi_word_lowercase_keys() {
        let normalizer = TextNormalizer::default();
        assert_eq!(
            normalizer.abbreviate_journals("University of Chicago Law Review 10 U.S. 1"),
            "U. Chi. L. Rev. 10 U.S. 1"
        );
    }

    #[test]
    fn user_journals_take_precedence() {
        let mut user = UserJournals::new();
        user.insert("Yale Law Journal".to_string(), "YLJ".to_string());
        user.insert("Journal of Stuff".to_string(), "J. Stuff".to_string());
        let normalizer = TextNormalizer::new(Some(&user)).unwrap();

        assert_eq!(
            normalizer.abbreviate_journals("Yale Law Journal 1 U.S. 2"),
            "YLJ 1 U.S. 2"
        );
        assert_eq!(
            normalizer.abbreviate_journals("Journal of Stuff 1 U.S. 2"),
            "J. Stuff 1 U.S. 2"
        );
    }

    #[test]
    fn user_journals_from_ron() {
        let ron_string = r#"
{
    "Journal of Stuff":"J. Stuff",
    "Journal of More Stuff":"J. More Stuff",
}
"#;
        let journals = load_user_journals(ron_string).unwrap();
        assert_eq!(&journals["Journal of More Stuff"], "J. More Stuff");

        let normalizer = TextNormalizer::new(Some(&journals)).unwrap();
        assert_eq!(
            normalizer.abbreviate_journals("journal of stuff 3 U.S. 4"),
            "J. Stuff 3 U.S. 4"
        );
    }

    #[test]
    fn bad_user_journals() {
        let err = load_user_journals("{ \"Journal\": }").unwrap_err();
        assert!(err.starts_with("error deserializing the user journal file"));

        let err = load_user_journals("{ \"Journal of Stuff\": \" \" }").unwrap_err();
        assert!(err.contains("blank entry for \"Journal of Stuff\""));
    }

    #[test]
    fn title_case_matches_word_starts() {
        assert_eq!(title_case("university of chicago"), "University Of Chicago");
        assert_eq!(title_case("ASS'N"), "Ass'N");
    }
}
