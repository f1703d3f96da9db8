//! The grammar table: named, ordered pattern rules for each citation kind.
//!
//! A [`GrammarTable`] maps each [`CitationKind`] to a list of [`Rule`]s. The
//! rules for a kind are alternatives tried in order; the first one that
//! matches wins. A match is a [`RuleMatch`], the rule's name plus its named
//! captures.
//!
//! The table is versioned and can be replaced wholesale, so the pipeline never
//! depends on the exact rules below.

use super::tables::REPORTERS;
use crate::error::GrammarError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use slog::trace;
use std::{cmp::Reverse, collections::BTreeMap, fmt, str::FromStr};

/// Named captures from a rule.
pub type Fields = BTreeMap<String, String>;

/// The kinds of citations the grammar knows about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationKind {
    Case,
    Statute,
    CourtRule,
    Book,
    Article,
    Regulation,
    Administrative,
}

impl CitationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CitationKind::Case => "case",
            CitationKind::Statute => "statute",
            CitationKind::CourtRule => "court_rule",
            CitationKind::Book => "book",
            CitationKind::Article => "article",
            CitationKind::Regulation => "regulation",
            CitationKind::Administrative => "administrative",
        }
    }
}

impl fmt::Display for CitationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CitationKind {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<CitationKind, GrammarError> {
        match s.trim().to_lowercase().as_str() {
            "case" => Ok(CitationKind::Case),
            "statute" => Ok(CitationKind::Statute),
            "court_rule" | "rule" => Ok(CitationKind::CourtRule),
            "book" => Ok(CitationKind::Book),
            "article" => Ok(CitationKind::Article),
            "regulation" | "reg" => Ok(CitationKind::Regulation),
            "administrative" | "admin" => Ok(CitationKind::Administrative),
            _ => Err(GrammarError::UnknownKind(s.to_string())),
        }
    }
}

/// A successful rule match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule: &'static str,
    pub fields: Fields,
}

/// One named pattern.
///
/// A rule keeps two compiled forms of its pattern. The anchored form must
/// match from the start of the text (and to the end, for rules that describe
/// a whole citation); it is used to validate and parse a citation. The
/// unanchored form finds every occurrence in running text.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    anchored: Regex,
    unanchored: Regex,
}

impl Rule {
    /// Compiles a rule from a pattern body without anchors. If `whole` is set,
    /// an anchored match must also consume the entire text.
    pub fn new(name: &'static str, body: &str, whole: bool) -> Result<Rule, regex::Error> {
        let anchored = if whole {
            Regex::new(&format!("^(?:{})$", body))?
        } else {
            Regex::new(&format!("^(?:{})", body))?
        };
        let unanchored = Regex::new(body)?;

        Ok(Rule {
            name,
            anchored,
            unanchored,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Match the rule against the start of `text`.
    pub fn apply(&self, text: &str) -> Option<RuleMatch> {
        self.anchored.captures(text).map(|caps| RuleMatch {
            rule: self.name,
            fields: collect_fields(&self.anchored, &caps),
        })
    }

    /// Every non-overlapping occurrence of the rule in `text`.
    pub fn find_all(&self, text: &str) -> Vec<RuleMatch> {
        self.unanchored
            .captures_iter(text)
            .map(|caps| RuleMatch {
                rule: self.name,
                fields: collect_fields(&self.unanchored, &caps),
            })
            .collect()
    }
}

/// Gather the named groups that participated in a match.
fn collect_fields(regex: &Regex, caps: &regex::Captures) -> Fields {
    regex
        .capture_names()
        .flatten()
        .filter_map(|name| {
            caps.name(name)
                .map(|m| (name.to_string(), m.as_str().to_string()))
        })
        .collect()
}

/// A versioned registry of rules per citation kind.
#[derive(Debug, Clone)]
pub struct GrammarTable {
    version: String,
    rules: BTreeMap<CitationKind, Vec<Rule>>,
}

impl GrammarTable {
    /// An empty table.
    pub fn new(version: &str) -> GrammarTable {
        GrammarTable {
            version: version.to_string(),
            rules: BTreeMap::new(),
        }
    }

    /// The built-in table.
    pub fn standard() -> GrammarTable {
        STANDARD.clone()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Append a rule to the alternatives for `kind`.
    pub fn register(&mut self, kind: CitationKind, rule: Rule) {
        self.rules.entry(kind).or_default().push(rule);
    }

    /// The alternatives for `kind`, in the order they are tried.
    pub fn rules(&self, kind: CitationKind) -> &[Rule] {
        self.rules.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First matching alternative for `kind`, if any.
    pub fn parse(&self, kind: CitationKind, text: &str) -> Option<RuleMatch> {
        let found = self.rules(kind).iter().find_map(|rule| rule.apply(text));
        trace!(
            slog_scope::logger(),
            "parse {} {:?}: {:?}",
            kind,
            text,
            found.as_ref().map(|m| m.rule)
        );
        found
    }

    /// Like [`GrammarTable::parse`], but a miss is an error.
    pub fn validate(&self, kind: CitationKind, text: &str) -> Result<RuleMatch, GrammarError> {
        self.parse(kind, text)
            .ok_or(GrammarError::NoRuleMatched { kind })
    }

    /// Every occurrence of every alternative for `kind` in `text`.
    pub fn find_all(&self, kind: CitationKind, text: &str) -> Vec<RuleMatch> {
        self.rules(kind)
            .iter()
            .flat_map(|rule| rule.find_all(text))
            .collect()
    }
}

impl Default for GrammarTable {
    fn default() -> GrammarTable {
        GrammarTable::standard()
    }
}

/// The reporter alternation, longest reporter first.
pub fn reporter_alternation() -> String {
    let mut reporters: Vec<&str> = REPORTERS.to_vec();
    reporters.sort_by_key(|r| Reverse(r.len()));
    reporters
        .iter()
        .map(|r| regex::escape(r))
        .collect::<Vec<String>>()
        .join("|")
}

lazy_static! {
    /// The built-in rules.
    static ref STANDARD: GrammarTable = {
        let reporters = reporter_alternation();
        let mut table = GrammarTable::new("2024.1");

        // Cases
        let case = format!(
            r"(?P<case_name>.+?),?\s+(?P<volume>\d+)\s+(?P<reporter>{reps})\s+(?P<page>\d+)(?:,\s*(?P<pinpoint>\d+(?:-\d+)?))?(?P<parallels>(?:,\s*\d+\s+(?:{reps})\s+\d+)*)\s*\((?P<court>.+?)\s+(?P<year>\d{{4}})\)",
            reps = reporters
        );
        table.register(CitationKind::Case, Rule::new("case", &case, true).unwrap());

        // Statutes
        for (name, body) in [
            (
                "federal_statute",
                r"(?P<code>(?P<title>\d+)\s+U\.S\.C\.+)\s+§\s*(?P<section>[\w()\-/]+)(?:\s*\((?P<extra>.+?)\))?",
            ),
            (
                "state_statute",
                r"(?P<code>\d+\s+[A-Za-z.]+\s+Code)\s+§\s*(?P<section>[\d.\-/]+)(?:,\s*et seq\.)?(?:\s*\((?P<extra>.+)\))?",
            ),
            (
                "code_statute",
                r"(?P<code>\d+\s+[A-Z][A-Za-z.]*)\s+§\s*(?P<section>[\w.\-/()]+)",
            ),
        ] {
            table.register(CitationKind::Statute, Rule::new(name, body, true).unwrap());
        }

        // Court rules
        for (name, body) in [
            (
                "federal_rule",
                r"(?P<rules>Fed\. R\. Civ\. P\.|Fed\. R\. Crim\. P\.)\s+(?P<section>\d+(?:\([^)]+\))?(?:\.\d+)*)",
            ),
            (
                "state_rule",
                r"(?P<rules>[A-Z][a-zA-Z.]+\sR\.\s(?:Civ\. P\.|Crim\. P\.|App\. P\.))\s+(?P<section>\d+(?:\([^)]+\))?(?:\.\d+)*)",
            ),
            (
                "practice_rule",
                r"Practice Book §\s*(?P<section>\d+-\d+)|CPLR\s+(?P<rule>\d+\(\d+\))",
            ),
        ] {
            table.register(CitationKind::CourtRule, Rule::new(name, body, true).unwrap());
        }

        // Books and treatises
        for (name, body) in [
            (
                "treatise",
                r"(?P<volume>\d+)\s+(?P<author>[A-Z][A-Za-z.\s&]*?)(?:,\s*(?P<title>[A-Za-z.\s,&]+?))?\s*§\s*(?P<section>\d+(?:\.\d+)?)(?:,\s*n\.\d+)?\s*\((?P<year>\d{4})\)",
            ),
            (
                "book_edition",
                r"(?P<author>[A-Z].+?),\s*(?P<volume>\d+)\s+(?P<title>[A-Z].+?)ed\.+\s*(?P<year>\d{4})",
            ),
        ] {
            table.register(CitationKind::Book, Rule::new(name, body, true).unwrap());
        }

        // Articles
        for (name, body) in [
            (
                "article",
                r"(?P<author>[A-Z][^,]+),\s+(?P<title>[^,]+),\s+(?P<volume>\d+)\s+(?P<journal>[A-Za-z.'&]+(?:\s+[A-Za-z.'&]+)*)\s+(?P<page>\d+)(?:,\s*(?P<pinpoint>\d+))?\s*\((?P<year>\d{4})\)",
            ),
            (
                "student_note",
                r"(?P<author>[A-Z][^,]+),\s+(?P<note>Note|Comment),\s+(?P<volume>\d+)\s+(?P<journal>[A-Za-z.'&]+(?:\s+[A-Za-z.'&]+)*)\s+(?P<page>\d+)\s*\((?P<year>\d{4})\)",
            ),
        ] {
            table.register(CitationKind::Article, Rule::new(name, body, true).unwrap());
        }

        // Regulations
        for (name, body) in [
            (
                "federal_regulation",
                r"(?P<title>\d+)\s+C\.F\.R\.\s+§\s*(?P<section>[\d.\-]+)",
            ),
            (
                "state_admin_code",
                r"(?i)(?P<state_abbrev>[A-Za-z.]+)\s+Admin\.\s+Code\s+r\.\s*(?P<number>[\d\-\w. ]+?)(?:\s+§\s*(?P<section>[\d.\-()]+))?",
            ),
            (
                "state_admin_rule",
                r"(?i)(?P<state_abbrev>[A-Za-z.]+)\s+Admin\.\s+Code,\s+Rule\s+(?P<number>[\d\-\w.()]+)",
            ),
        ] {
            table.register(CitationKind::Regulation, Rule::new(name, body, true).unwrap());
        }

        // Administrative and executive materials. Most of these only need to
        // match at the start of the citation.
        for (name, body, whole) in [
            ("federal_charge", r"Federal Charge No\.\s*(?P<number>\d{3}-\d{4}-\d{5})", false),
            ("federal_register", r"(?P<volume>\d+)\s+Fed\.\s+Reg\.\s+(?P<page>\d+)", false),
            ("cfr_section", r"(?P<title>\d+)\s+C\.F\.R\.\s+§\s*(?P<section>\d+[.\d]*)", false),
            ("enforcement_guidance", r"(?P<agency>EEOC|OSHA) Enforcement Guidance", false),
            ("enforcement_manual", r"(?P<agency>DOJ|IRS) (?:Enforcement Manuals|Internal Revenue Manual)", false),
            ("opinion_letter", r"(?P<agency>DOL|IRS) (?:Wage and Hour opinion letters|advisory opinions)", false),
            ("no_action_letter", r"(?P<agency>SEC|FTC) no-action letters", false),
            ("revenue_ruling", r"(?P<agency>IRS) (?:Revenue Rulings|Private Letter Rulings)", false),
            ("consent_decree", r"(?P<agency>FTC|SEC) (?:consent decrees|settlement agreements)", false),
            ("agency_order", r"Agency’s formal enforcement complaints|Agency final orders", false),
            ("amicus_brief", r"(?P<agency>DOJ|EEOC) amicus briefs", false),
            ("technical_guidance", r"(?P<agency>CMS|EPA) (?:guidance|technical bulletins)", false),
            ("state_board", r"(?i)\bState\b\s+(?:Admin|Reg)\.?\s+Board\b", false),
            ("admin_body", r"(?i)\b[A-Z][a-z]+ Admin(?:istrative)? (?:Board|Commission|Agency)\b", false),
            ("executive_order", r"(?i)Exec\. Order No\.\s*(?P<number>\d+).*", false),
            ("proclamation", r"(?i)Proclamation No\.\s*(?P<number>\d+).*", false),
            ("agency_adjudication", r"(?i)[A-Za-z].+?,\s*(?P<volume>\d+)\s+\w+\.\s+No\.\s*(?P<number>\d+).*", false),
            ("agency_report", r"(?i)(?P<year>\d{3,4})\s+[A-Z]{2,5}\.\s+Ann\.\s+Rep\.\s+(?P<page>\d+)", false),
            ("ag_opinion", r"(?i)(?P<volume>\d+)\s+Op\.\s+Att'y\s+Gen\.\s+(?P<page>\d+)", false),
            ("arbitration", r"(?i).+?No\.\s*(?P<number>\d+)\s*\(.+?\)\s*\(.+?Arbs\.\)", true),
        ] {
            table.register(CitationKind::Administrative, Rule::new(name, body, whole).unwrap());
        }

        table
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_rule_captures_fields() {
        let table = GrammarTable::standard();
        let m = table
            .parse(CitationKind::Case, "Brown v. Board, 347 U.S. 483 (U.S. 1954)")
            .unwrap();

        assert_eq!(m.rule, "case");
        assert_eq!(m.fields["case_name"], "Brown v. Board");
        assert_eq!(m.fields["volume"], "347");
        assert_eq!(m.fields["reporter"], "U.S.");
        assert_eq!(m.fields["page"], "483");
        assert_eq!(m.fields["court"], "U.S.");
        assert_eq!(m.fields["year"], "1954");
        assert!(!m.fields.contains_key("pinpoint"));
    }

    #[test]
    fn longest_reporter_wins() {
        let table = GrammarTable::standard();
        let m = table
            .parse(
                CitationKind::Case,
                "Smith v. Jones, 100 F. Supp. 2d 200, 205-07 (S.D.N.Y. 2000)",
            )
            .unwrap();

        assert_eq!(m.fields["reporter"], "F. Supp. 2d");
        assert_eq!(m.fields["pinpoint"], "205-07");
    }

    #[test]
    fn second_series_reporter_is_not_split() {
        let table = GrammarTable::standard();
        let m = table
            .parse(CitationKind::Case, "Doe v. Roe, 12 F.2d 34 (2d Cir. 1926)")
            .unwrap();

        assert_eq!(m.fields["reporter"], "F.2d");
    }

    #[test]
    fn case_rule_captures_parallels() {
        let table = GrammarTable::standard();
        let m = table
            .parse(
                CitationKind::Case,
                "Roe v. Wade, 410 U.S. 113, 93 S. Ct. 705 (U.S. 1973)",
            )
            .unwrap();

        assert_eq!(m.fields["parallels"], ", 93 S. Ct. 705");
    }

    #[test]
    fn unknown_reporter_does_not_match() {
        let table = GrammarTable::standard();
        assert!(table
            .parse(CitationKind::Case, "Foo v. Bar, 123 Xyz 456 (U.S. 2000)")
            .is_none());
    }

    #[test]
    fn statutes() {
        let table = GrammarTable::standard();

        let federal = table.parse(CitationKind::Statute, "42 U.S.C. § 1983").unwrap();
        assert_eq!(federal.rule, "federal_statute");
        assert_eq!(federal.fields["code"], "42 U.S.C.");
        assert_eq!(federal.fields["section"], "1983");

        let code = table.parse(CitationKind::Statute, "12 C.S.C. § 3456").unwrap();
        assert_eq!(code.rule, "code_statute");
        assert_eq!(code.fields["code"], "12 C.S.C.");

        assert!(table.validate(CitationKind::Statute, "Not a statute").is_err());
    }

    #[test]
    fn court_rules() {
        let table = GrammarTable::standard();
        assert!(table.parse(CitationKind::CourtRule, "Fed. R. Civ. P. 12(b)").is_some());
        assert!(table.parse(CitationKind::CourtRule, "CPLR 3211(7)").is_some());
        assert!(table.parse(CitationKind::CourtRule, "Civ. P. 12").is_none());
    }

    #[test]
    fn articles_allow_spaced_journals() {
        let table = GrammarTable::standard();
        let m = table
            .parse(
                CitationKind::Article,
                "Jane Doe, Thinking About Law, 99 Harv. L. Rev. 1000, 1010 (2021)",
            )
            .unwrap();

        assert_eq!(m.fields["author"], "Jane Doe");
        assert_eq!(m.fields["journal"], "Harv. L. Rev.");
        assert_eq!(m.fields["pinpoint"], "1010");
    }

    #[test]
    fn regulations_and_administrative() {
        let table = GrammarTable::standard();

        let cfr = table.parse(CitationKind::Regulation, "29 C.F.R. § 1604.11").unwrap();
        assert_eq!(cfr.fields["title"], "29");
        assert_eq!(cfr.fields["section"], "1604.11");

        let order = table
            .parse(CitationKind::Administrative, "Exec. Order No. 13,985, 86 Fed. Reg. 7009")
            .unwrap();
        assert_eq!(order.rule, "executive_order");

        assert!(table
            .parse(CitationKind::Administrative, "EEOC Enforcement Guidance on Harassment")
            .is_some());
    }

    #[test]
    fn find_all_is_unanchored() {
        let table = GrammarTable::standard();
        let found = table.find_all(
            CitationKind::Case,
            "See Alpha v. Beta, 10 U.S. 100 (U.S. 1800) and Gamma v. Delta, 11 U.S. 200 (U.S. 1801)",
        );

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].fields["volume"], "10");
        assert_eq!(found[1].fields["volume"], "11");
    }

    #[test]
    fn kinds_parse_from_strings() {
        assert_eq!("case".parse::<CitationKind>(), Ok(CitationKind::Case));
        assert_eq!("reg".parse::<CitationKind>(), Ok(CitationKind::Regulation));
        assert_eq!(
            "poem".parse::<CitationKind>(),
            Err(GrammarError::UnknownKind("poem".to_string()))
        );
    }

    #[test]
    fn custom_tables_are_independent() {
        let mut table = GrammarTable::new("test");
        table.register(
            CitationKind::Book,
            Rule::new("anything", r"(?P<author>.+)", true).unwrap(),
        );

        assert_eq!(table.version(), "test");
        assert!(table.parse(CitationKind::Book, "Whatever").is_some());
        assert!(table.parse(CitationKind::Case, "Whatever").is_none());
    }
}
