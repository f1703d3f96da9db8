//! Contains the main citecheck function. Determines which command to run.

pub mod checker;
pub mod config;
pub mod error;
mod fs;

pub use checker::{CitationChecker, Validated};

use ansi_term::Color;
use checker::{
    grammar::CitationKind, normalize::load_user_journals, repository::build_repository,
};
use config::{CiteCommand, CiteConfig};
use error::CheckError;
use fs::load_file;
use serde::Serialize;
use slog::{debug, error, o};
use std::path::Path;

/// The main citecheck function.
pub fn citecheck(config: CiteConfig) -> Result<(), String> {
    if config.command == CiteCommand::NewUserJournalFile {
        debug!(slog_scope::logger(), "Creating blank user-journal file");
        return fs::new_user_journals_ron(Path::new("blank-user-journals.ron"));
    }

    let checker = build_checker(&config)?;
    run(checker, config.command)
}

/// Assemble a checker from the configured style, user journals, and
/// repository.
fn build_checker(config: &CiteConfig) -> Result<CitationChecker, String> {
    let mut checker = CitationChecker::new().with_style(config.style);

    // Load the user journals, if any
    if let Some(u) = config.user_journals {
        let user_journals = slog_scope::scope(
            &slog_scope::logger().new(o!("fn" => "load_user_journals()")),
            || load_file(Path::new(u)).and_then(|s| load_user_journals(&s)),
        )
        .map_err(|e| report("User journals load error", e))?;
        checker = checker
            .with_user_journals(&user_journals)
            .map_err(|e| report("User journals error", e))?;
    }

    // Load the case repository, if any
    if let Some(r) = config.repository {
        let repository = slog_scope::scope(
            &slog_scope::logger().new(o!("fn" => "build_repository()")),
            || load_file(Path::new(r)).and_then(|s| build_repository(&s)),
        )
        .map_err(|e| report("Repository load error", e))?;
        eprintln!(
            "{} Loaded {} repository record(s)",
            Color::Green.paint("INFO"),
            repository.len()
        );
        checker = checker.with_repository(repository);
    }

    Ok(checker)
}

fn run(mut checker: CitationChecker, command: CiteCommand) -> Result<(), String> {
    match command {
        CiteCommand::Check(citation, quote, pincite) => {
            match checker.validate_full_citation(citation, quote, pincite) {
                Ok(v) => {
                    println!("{}", v.rendered);
                    Ok(())
                }
                Err(CheckError::Validation(failure)) => {
                    for e in failure.errors() {
                        eprintln!(
                            "{} {} [{}..{}] {}",
                            Color::Red.paint("ERRO"),
                            e.field.as_deref().unwrap_or("-"),
                            e.start,
                            e.end,
                            e.message
                        );
                    }
                    Err(failure.to_string())
                }
                Err(e) => Err(report("Citation error", e.to_string())),
            }
        }
        CiteCommand::Fix(citation) => match checker.auto_fix(citation, None, None) {
            Ok(fixed) => {
                if fixed != citation {
                    eprintln!("{} Citation repaired", Color::Green.paint("INFO"));
                }
                println!("{}", fixed);
                Ok(())
            }
            Err(e) => Err(report("Repair error", e.to_string())),
        },
        CiteCommand::Kind(kind, text) => {
            let kind: CitationKind = kind.parse().map_err(|e| report("Kind error", e))?;
            let record = checker
                .parse(kind, text)
                .map_err(|e| report("Grammar error", e))?;
            print_json(&record)
        }
        CiteCommand::Document(path) => {
            let text = load_file(Path::new(path)).map_err(|e| report("Document load error", e))?;
            let index = slog_scope::scope(
                &slog_scope::logger().new(o!("fn" => "process_document()")),
                || checker.process_document(&text),
            );
            print_json(index)
        }
        CiteCommand::Resolve(path, short) => {
            let text = load_file(Path::new(path)).map_err(|e| report("Document load error", e))?;
            checker.process_document(&text);
            let record = checker
                .resolve_short_citation(short)
                .map_err(|e| report("Lookup error", e))?;
            print_json(record)
        }
        CiteCommand::Quote(quote, citation) => {
            println!("{}", checker.format_quote(quote, citation));
            Ok(())
        }
        CiteCommand::NewUserJournalFile => Ok(()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| report("Serialization error", e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// Log and print an error, handing back its message.
fn report(context: &str, e: impl ToString) -> String {
    let e = e.to_string();
    error!(slog_scope::logger(), "{}: {}", context, e);
    eprintln!("{} {}: {}", Color::Red.paint("ERRO"), context, e);
    e
}
