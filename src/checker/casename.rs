//! Case-name omissions and abbreviations.

use super::tables::WORD_ABBREVIATIONS;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use slog::trace;

lazy_static! {
    static ref LEADING_THE: Regex = Regex::new(r"(?i)^The\s+").unwrap();
    static ref DESCRIPTOR: Regex =
        Regex::new(r"(?i)\b(?:Trustee|Executor|Administrator|Administratrix)\b.*").unwrap();
    static ref STATE_OF: Regex = Regex::new(r"(?i)\bState of\s+").unwrap();
    static ref CITY_OF: Regex = Regex::new(r"(?i)\bCity of\s+").unwrap();
    static ref LOCATIONAL: Regex =
        Regex::new(r"(?i)\b(?:of|County|Township|Village|District)\s+[A-Za-z.' ]+").unwrap();
    static ref USA: Regex = Regex::new(r"(?i)United States of America").unwrap();
    static ref CORPORATE: Regex = Regex::new(r"\b(?:Co|Corp|Ass'n)\b").unwrap();
    static ref ENTITY_SUFFIX: Regex = Regex::new(r"\b(?:Inc|Ltd|N\.A\.|F\.S\.B\.),?\s*").unwrap();
    static ref WORD: Regex = Regex::new(r"\b[A-Za-z][A-Za-z'.]*\b").unwrap();
}

/// Reduce a full case name to its citable form.
///
/// The rewrites run in a fixed order, each on the output of the one before:
///
/// 1. drop a leading "The"
/// 2. keep only the text before the first comma (for both parties of an
///    "A v. B" name, and for "In re" names)
/// 3. drop trustee, executor, and administrator descriptors and what follows
/// 4. "State of X" becomes "State X"
/// 5. drop "City of" unless it opens the name
/// 6. drop locational phrases ("of ...", "County ...", and the like)
/// 7. "United States of America" becomes "United States"
/// 8. keep only the last word of each multi-word party in "A v. B"
/// 9. with a corporate marker present, drop entity suffixes like "Inc"
pub fn normalize(raw: &str) -> String {
    let mut name = LEADING_THE.replace(raw, "").into_owned();

    name = first_clause(&name).to_string();
    if let Some((left, right)) = name.split_once(" v. ") {
        name = format!("{} v. {}", first_clause(left), first_clause(right));
    }
    if name.to_lowercase().starts_with("in re") {
        name = first_clause(&name).to_string();
    }

    name = DESCRIPTOR.replace(&name, "").trim().to_string();
    name = STATE_OF.replace_all(&name, "State ").into_owned();
    name = CITY_OF
        .replace_all(&name, |caps: &Captures| match caps.get(0) {
            Some(m) if m.start() == 0 => m.as_str().to_string(),
            _ => String::new(),
        })
        .into_owned();

    // Applied to each party separately so a phrase never runs across the "v."
    name = match name.split_once(" v. ") {
        Some((left, right)) => format!(
            "{} v. {}",
            LOCATIONAL.replace_all(left, "").trim(),
            LOCATIONAL.replace_all(right, "").trim()
        ),
        None => LOCATIONAL.replace_all(&name, "").into_owned(),
    };

    name = USA.replace_all(&name, "United States").into_owned();

    if let Some((left, right)) = name.split_once(" v. ") {
        name = format!("{} v. {}", last_word(left), last_word(right));
    }

    if CORPORATE.is_match(&name) {
        name = ENTITY_SUFFIX.replace_all(&name, "").into_owned();
    }

    let name = name.trim().to_string();
    trace!(slog_scope::logger(), "case name {:?} -> {:?}", raw, name);
    name
}

/// Replace whole words with their standard party-name abbreviations, e.g.
/// "Board of Education" becomes "Bd. of Educ.".
pub fn abbreviate(name: &str) -> String {
    WORD
        .replace_all(name, |caps: &Captures| {
            let word = &caps[0];
            WORD_ABBREVIATIONS
                .get(word)
                .copied()
                .unwrap_or(word)
                .to_string()
        })
        .into_owned()
}

fn first_clause(text: &str) -> &str {
    text.split(',').next().unwrap_or(text).trim()
}

fn last_word(party: &str) -> &str {
    party.split_whitespace().last().unwrap_or(party)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_names_are_unchanged() {
        assert_eq!(normalize("Brown v. Board"), "Brown v. Board");
        assert_eq!(normalize("Alpha v. Beta"), "Alpha v. Beta");
    }

    #[test]
    fn leading_the_and_commas() {
        assert_eq!(normalize("The Foo v. Bar"), "Foo v. Bar");
        assert_eq!(normalize("Foo v. Bar, Inc."), "Foo v. Bar");
        assert_eq!(normalize("In re Smith, Debtor"), "In re Smith");
    }

    #[test]
    fn descriptors_are_dropped() {
        assert_eq!(normalize("Jones, Trustee v. Smith"), "Jones");
        assert_eq!(normalize("Estate of Kim Executor"), "Estate");
    }

    #[test]
    fn individuals_keep_last_names() {
        assert_eq!(normalize("John Smith v. Jane Doe"), "Smith v. Doe");
    }

    #[test]
    fn locational_phrases() {
        assert_eq!(normalize("Brown v. Board of Education"), "Brown v. Board");
        assert_eq!(normalize("Board of Ed v. Smith"), "Board v. Smith");
        assert_eq!(normalize("Brown v. Bd. of Educ."), "Brown v. Bd.");
        assert_eq!(normalize("Bd. of Trs. of Univ. v. Garrett"), "Bd. v. Garrett");
    }

    #[test]
    fn state_and_city() {
        assert_eq!(normalize("State of Texas"), "State Texas");
        assert_eq!(normalize("Smith v. City of Boston"), "Smith v. Boston");
    }

    #[test]
    fn corporate_suffixes() {
        assert_eq!(normalize("Acme Co Inc"), "Acme Co");
        assert_eq!(normalize("Acme Inc"), "Acme Inc");
    }

    #[test]
    fn word_abbreviations() {
        assert_eq!(abbreviate("Board of Education"), "Bd. of Educ.");
        assert_eq!(
            abbreviate("National Railroad Corporation"),
            "Nat'l R.R. Corp."
        );
        assert_eq!(abbreviate("Smith v. Jones"), "Smith v. Jones");
    }
}
