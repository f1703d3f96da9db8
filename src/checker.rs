//! The citation checker: normalizes, validates, parses, and renders
//! citations, and produces short forms for them.
//!
//! A full case citation passes through these stages in order:
//!
//! 1. month and journal abbreviation ([`normalize`])
//! 2. structural checks that report every problem at once ([`structure`])
//! 3. parsing with the grammar table ([`grammar`])
//! 4. reporter and court checks, then the repository for a pincite or quote
//!    ([`semantic`])
//! 5. case-name omissions ([`casename`])
//! 6. rendering with emphasis ([`render`])
//!
//! Short forms come from a [`ShortCiteResolver`] owned by the checker. Since
//! the resolver remembers the last cited work, one checker serves exactly one
//! document. To share a checker between threads, wrap it in a `Mutex`.

pub mod casename;
pub mod grammar;
pub mod normalize;
pub mod record;
pub mod render;
pub mod repair;
pub mod repository;
pub mod semantic;
pub mod shortform;
pub mod structure;
pub mod tables;

use crate::{
    config::Style,
    error::{
        CheckError, CitationError, GrammarError, LookupFailure, RepairFailure, ValidationFailure,
    },
};
use grammar::{CitationKind, GrammarTable};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use normalize::{TextNormalizer, UserJournals};
use record::CitationRecord;
use regex::Regex;
use repository::{CaseRepository, MemoryRepository, RepositoryRecord};
use serde::Serialize;
use shortform::ShortCiteResolver;
use slog::{debug, o, trace};

lazy_static! {
    /// Segments of a document.
    static ref SEGMENT: Regex = Regex::new(r";\s*").unwrap();
}

/// A full citation that passed every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validated {
    pub record: CitationRecord,
    /// The repository's record, when a pincite or quote was checked.
    pub repository_record: Option<RepositoryRecord>,
    pub rendered: String,
}

/// Checks citations for one document.
pub struct CitationChecker {
    grammar: GrammarTable,
    normalizer: TextNormalizer,
    repository: Box<dyn CaseRepository>,
    style: Style,
    resolver: ShortCiteResolver,
    full_citations: IndexMap<String, CitationRecord>,
}

impl Default for CitationChecker {
    fn default() -> CitationChecker {
        CitationChecker {
            grammar: GrammarTable::standard(),
            normalizer: TextNormalizer::default(),
            repository: Box::new(MemoryRepository::new()),
            style: Style::default(),
            resolver: ShortCiteResolver::new(),
            full_citations: IndexMap::new(),
        }
    }
}

impl CitationChecker {
    /// A checker with the built-in grammar and journals, italic emphasis, and
    /// an empty repository.
    pub fn new() -> CitationChecker {
        CitationChecker::default()
    }

    pub fn with_repository<R>(mut self, repository: R) -> CitationChecker
    where
        R: CaseRepository + 'static,
    {
        self.repository = Box::new(repository);
        self
    }

    /// Add user journal abbreviations, which take precedence over the
    /// built-in ones.
    pub fn with_user_journals(
        mut self,
        user_journals: &UserJournals,
    ) -> Result<CitationChecker, String> {
        self.normalizer = TextNormalizer::new(Some(user_journals))?;
        Ok(self)
    }

    pub fn with_style(mut self, style: Style) -> CitationChecker {
        self.style = style;
        self
    }

    pub fn with_grammar(mut self, grammar: GrammarTable) -> CitationChecker {
        self.grammar = grammar;
        self
    }

    pub fn grammar(&self) -> &GrammarTable {
        &self.grammar
    }

    /// The case citations indexed by the last [`CitationChecker::process_document`].
    pub fn full_citations(&self) -> &IndexMap<String, CitationRecord> {
        &self.full_citations
    }

    /// Run a case citation through the whole pipeline.
    ///
    /// The repository is consulted when a pincite or a quote is given. A
    /// citation it does not hold is `CitationNotFound`, and a quote is
    /// compared against the text of the record it returns.
    pub fn validate_full_citation(
        &self,
        citation: &str,
        quote: Option<&str>,
        pincite: Option<&str>,
    ) -> Result<Validated, CheckError> {
        debug!(slog_scope::logger(), "Validating {}...", citation);

        let citation = slog_scope::scope(
            &slog_scope::logger().new(o!("fn" => "normalize()")),
            || self.normalizer.normalize(citation),
        );

        let errors = slog_scope::scope(
            &slog_scope::logger().new(o!("fn" => "structure::check()")),
            || structure::check(&citation, &self.grammar),
        );
        if let Some(failure) = ValidationFailure::new(errors) {
            debug!(slog_scope::logger(), "Structural errors: {}", failure);
            return Err(failure.into());
        }

        let rule_match = match self.grammar.parse(CitationKind::Case, &citation) {
            Some(m) => m,
            None => {
                let error = CitationError::new(
                    format!("Unable to parse citation: {}", citation),
                    0,
                    citation.chars().count(),
                    "parse",
                );
                return Err(ValidationFailure::single(error).into());
            }
        };
        let record = CitationRecord::from_match(CitationKind::Case, rule_match);

        let repository_record = slog_scope::scope(
            &slog_scope::logger().new(o!("fn" => "semantic()")),
            || -> Result<Option<RepositoryRecord>, CheckError> {
                semantic::check_reporter_allowed(record.reporter().unwrap_or(""))?;
                semantic::check_reporter_court(&record)?;

                let quote = quote.filter(|q| !q.is_empty());
                if pincite.is_none() && quote.is_none() {
                    return Ok(None);
                }

                let repository_record =
                    semantic::check_pincite(self.repository.as_ref(), &record, pincite)?;
                if let Some(q) = quote {
                    semantic::check_quote(q, &repository_record.text)?;
                }

                Ok(Some(repository_record))
            },
        )?;

        let raw_name = record.case_name().unwrap_or("").trim_end_matches(',');
        let case_name = casename::normalize(raw_name);
        let record = record.with_case_name(case_name);

        let rendered = slog_scope::scope(&slog_scope::logger().new(o!("fn" => "render()")), || {
            render::render(&record, self.style)
        });

        debug!(slog_scope::logger(), "Validated: {}", rendered);
        Ok(Validated {
            record,
            repository_record,
            rendered,
        })
    }

    /// Whether `text` matches any rule for the citation kind named `kind`.
    pub fn validate(&self, kind: &str, text: &str) -> Result<bool, GrammarError> {
        self.parse(kind.parse()?, text).map(|_| true)
    }

    /// Parse `text` as a citation of `kind`.
    pub fn parse(&self, kind: CitationKind, text: &str) -> Result<CitationRecord, GrammarError> {
        let rule_match = self.grammar.validate(kind, text)?;
        Ok(CitationRecord::from_match(kind, rule_match))
    }

    /// Index every case citation in `text` by `volume_reporter_page`.
    ///
    /// The text is split into `;`-separated segments and each segment is
    /// searched for citations. A later citation with the same key replaces an
    /// earlier one but keeps its place in the index. The previous index is
    /// discarded.
    pub fn process_document(&mut self, text: &str) -> &IndexMap<String, CitationRecord> {
        debug!(slog_scope::logger(), "Processing document...");
        self.full_citations.clear();

        for segment in SEGMENT.split(text) {
            for rule_match in self.grammar.find_all(CitationKind::Case, segment) {
                let record = CitationRecord::from_match(CitationKind::Case, rule_match);
                if let Some(key) = record.composite_key() {
                    trace!(slog_scope::logger(), "indexed {}", key);
                    self.full_citations.insert(key, record);
                }
            }
        }

        debug!(
            slog_scope::logger(),
            "Document processed: {} citation(s)",
            self.full_citations.len()
        );
        &self.full_citations
    }

    /// The first indexed citation whose volume and reporter both appear in
    /// `short`.
    pub fn resolve_short_citation(&self, short: &str) -> Result<&CitationRecord, LookupFailure> {
        self.full_citations
            .values()
            .find(|record| {
                matches!(
                    (record.volume(), record.reporter()),
                    (Some(v), Some(r)) if short.contains(v) && short.contains(r)
                )
            })
            .ok_or_else(|| LookupFailure::NoMatchingFullCitation(short.to_string()))
    }

    /// Check that a short form belongs to `full`: the part of `short` before
    /// its first comma must appear in `full`.
    pub fn validate_short_citation(&self, short: &str, full: &str) -> Result<(), LookupFailure> {
        let name = short.split(',').next().unwrap_or(short).trim();
        if full.contains(name) {
            Ok(())
        } else {
            Err(LookupFailure::NoMatchingFullCitation(short.to_string()))
        }
    }

    /// The short form for `record`, or "Id." if it was the last work cited.
    pub fn short_form(&mut self, record: &CitationRecord) -> Result<String, LookupFailure> {
        slog_scope::scope(
            &slog_scope::logger().new(o!("fn" => "short_form()")),
            || self.resolver.short_form(record),
        )
    }

    /// Forget the last cited work.
    pub fn reset_short_forms(&mut self) {
        self.resolver.reset();
    }

    pub fn format_quote(&self, quote: &str, citation: &str) -> String {
        render::format_quote(quote, citation)
    }

    /// Validate `citation`; on failure, reformat it once and validate again.
    ///
    /// A valid citation is returned unchanged. There is exactly one repair
    /// attempt.
    pub fn auto_fix(
        &self,
        citation: &str,
        quote: Option<&str>,
        pincite: Option<&str>,
    ) -> Result<String, RepairFailure> {
        let original = match self.validate_full_citation(citation, quote, pincite) {
            Ok(_) => return Ok(citation.to_string()),
            Err(e) => e,
        };

        let repaired = slog_scope::scope(
            &slog_scope::logger().new(o!("fn" => "fix_citation_format()")),
            || repair::fix_citation_format(citation),
        );
        if repaired == citation {
            debug!(slog_scope::logger(), "Repair changed nothing");
            return Err(RepairFailure::NoChange {
                citation: citation.to_string(),
                original,
            });
        }

        debug!(slog_scope::logger(), "Trying repair {}...", repaired);
        match self.validate_full_citation(&repaired, quote, pincite) {
            Ok(_) => Ok(repaired),
            Err(repaired_error) => Err(RepairFailure::StillInvalid {
                original,
                repaired,
                repaired_error,
            }),
        }
    }
}
