//! The structures and functions for configuration. Must be accessible to main.

use serde::{Deserialize, Serialize};

/// The overall options.
pub struct CiteConfig<'a> {
    pub command: CiteCommand<'a>,
    pub style: Style,
    pub repository: Option<&'a str>,
    pub user_journals: Option<&'a str>,
}

impl CiteConfig<'_> {
    pub fn new<'a>(
        command: CiteCommand<'a>,
        style: Style,
        repository: Option<&'a str>,
        user_journals: Option<&'a str>,
    ) -> CiteConfig<'a> {
        CiteConfig {
            command,
            style,
            repository,
            user_journals,
        }
    }
}

/// The types of subcommands.
#[derive(Debug, PartialEq, Eq)]
pub enum CiteCommand<'a> {
    /// Validate a full citation, with an optional quote and pincite.
    Check(&'a str, Option<&'a str>, Option<&'a str>),
    /// Validate, and try one repair if that fails.
    Fix(&'a str),
    /// Match text against one citation kind's grammar.
    Kind(&'a str, &'a str),
    /// Index every case citation in a file.
    Document(&'a str),
    /// Index a file, then resolve a short citation against it.
    Resolve(&'a str, &'a str),
    /// Format a quotation followed by its citation.
    Quote(&'a str, &'a str),
    NewUserJournalFile,
}

/// How emphasized text is marked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// `<i>text</i>`
    #[default]
    Italic,
    /// `__text__`
    Underline,
}

impl Style {
    pub fn emphasize(&self, text: &str) -> String {
        match self {
            Style::Italic => format!("<i>{}</i>", text),
            Style::Underline => format!("__{}__", text),
        }
    }
}
