//! `main.rs` contains the command-line interface for citecheck. It collects
//! the values and options, sets up the logger, assembles the configuration,
//! and passes the configuration to the main function.
#[macro_use]
extern crate slog;

use citecheck::config::{CiteCommand, CiteConfig, Style};
use clap::{crate_version, App, Arg, ArgMatches, SubCommand};
use slog::{debug, Drain, Level};
use std::{fs::OpenOptions, process, sync::Mutex};

fn main() {
    // Get the command-line arguments and options
    let matches = App::new("citecheck")
        .version(crate_version!())
        .about("Validates, repairs, and renders legal citations")
        .subcommand_required(true)
        .arg(
            Arg::with_name("underline")
                .short('u')
                .long("underline")
                .takes_value(false)
                .global(true)
                .help("Emphasize with __underscores__ instead of <i>tags</i>"),
        )
        .arg(
            Arg::with_name("user_journals")
                .short('j')
                .long("user_journals")
                .value_name("JOURNAL FILE")
                .global(true)
                .help("A RON file containing user-provided journal abbreviations"),
        )
        .arg(
            Arg::with_name("repository")
                .short('r')
                .long("repository")
                .value_name("REPOSITORY FILE")
                .global(true)
                .help("A JSON file of decisions used to check pincites and quotes"),
        )
        .arg(
            Arg::with_name("debug")
                .short('d')
                .long("debug")
                .takes_value(false)
                .global(true)
                .help("Outputs debug log to citecheck-log.json")
                .hidden_short_help(true)
                .hidden_long_help(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short('v')
                .long("verbose")
                .value_name("NUMBER")
                .global(true)
                .help("Verbosity level between 0 and 5")
                .hidden_short_help(true)
                .hidden_long_help(true)
                .default_value("1"),
        )
        .subcommand(
            SubCommand::with_name("check")
                .about("Validate and render a full case citation")
                .arg(
                    Arg::with_name("citation")
                        .value_name("CITATION")
                        .index(1)
                        .required(true),
                )
                .arg(
                    Arg::with_name("quote")
                        .short('q')
                        .long("quote")
                        .value_name("QUOTE")
                        .help("A quotation to compare with the decision text"),
                )
                .arg(
                    Arg::with_name("pincite")
                        .short('p')
                        .long("pincite")
                        .value_name("PAGE")
                        .help("A pincite (page or page range) to check"),
                ),
        )
        .subcommand(
            SubCommand::with_name("fix")
                .about("Validate a citation, repairing it once if needed")
                .arg(
                    Arg::with_name("citation")
                        .value_name("CITATION")
                        .index(1)
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("kind")
                .about("Parse text as a citation of the given kind")
                .arg(
                    Arg::with_name("kind")
                        .value_name("KIND")
                        .help("case, statute, rule, book, article, reg, or admin")
                        .index(1)
                        .required(true),
                )
                .arg(
                    Arg::with_name("text")
                        .value_name("TEXT")
                        .index(2)
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("document")
                .about("Index every case citation in a document")
                .arg(
                    Arg::with_name("input")
                        .value_name("INPUT FILE")
                        .index(1)
                        .required(true),
                )
                .arg(
                    Arg::with_name("resolve")
                        .long("resolve")
                        .value_name("SHORT CITATION")
                        .help("Resolve a short citation against the document"),
                ),
        )
        .subcommand(
            SubCommand::with_name("quote")
                .about("Format a quotation followed by its citation")
                .arg(
                    Arg::with_name("quote")
                        .value_name("QUOTE")
                        .index(1)
                        .required(true),
                )
                .arg(
                    Arg::with_name("citation")
                        .value_name("CITATION")
                        .index(2)
                        .required(true),
                ),
        )
        .subcommand(SubCommand::with_name("uj").about("For creating a blank user-journals file"))
        .get_matches();

    // Setup the logger.
    //
    // If the debug flag is set, the log is also output to a file
    // `citecheck-log.json`.
    //
    // Global options may come before or after the subcommand, so look in both
    // places.
    let sub_matches = matches.subcommand().map(|(_, m)| m);
    let is_present = |name: &str| {
        matches.is_present(name) || sub_matches.map_or(false, |m| m.is_present(name))
    };
    let value_of = |name: &str| {
        sub_matches
            .and_then(|m| m.value_of(name))
            .or_else(|| matches.value_of(name))
    };

    let debug = is_present("debug");
    let min_log_level = match value_of("verbose").unwrap_or("1") {
        "0" => Level::Critical,
        "1" => Level::Error,
        "2" => Level::Warning,
        "3" => Level::Info,
        "4" => Level::Debug,
        "5" => Level::Trace,
        _ => Level::Info,
    };

    let term_decorator = slog_term::TermDecorator::new().build();
    let term_drain = slog_term::CompactFormat::new(term_decorator).build().fuse();
    let term_drain = term_drain.filter_level(min_log_level).fuse();

    let _guard: slog_scope::GlobalLoggerGuard = if debug {
        // Setup the file AND terminal loggers
        let log_file = match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open("./citecheck-log.json")
        {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "{} Unable to open citecheck-log.json: {}",
                    ansi_term::Color::Red.paint("ERRO"),
                    e
                );
                process::exit(1);
            }
        };
        let file_drain = slog_json::Json::new(log_file)
            .set_pretty(true)
            .add_default_keys()
            .build()
            .fuse();
        let file_drain = slog_async::Async::new(file_drain.filter_level(Level::Trace).fuse())
            .build()
            .fuse();
        let dual_logger = slog::Logger::root(
            Mutex::new(slog::Duplicate(term_drain, file_drain)).fuse(),
            o!("version" => crate_version!()),
        );
        slog_scope::set_global_logger(dual_logger)
    } else {
        // Setup just the terminal logger
        let term_logger = slog::Logger::root(
            Mutex::new(term_drain).fuse(),
            o!("version" => crate_version!()),
        );
        slog_scope::set_global_logger(term_logger)
    };

    debug!(slog_scope::logger(), "Logger setup");

    // Setup the configuration variables.
    let command = match command(&matches) {
        Some(c) => c,
        None => {
            eprintln!(
                "{} No command given; see --help",
                ansi_term::Color::Red.paint("ERRO")
            );
            process::exit(1);
        }
    };
    let style = if is_present("underline") {
        Style::Underline
    } else {
        Style::Italic
    };
    let config = CiteConfig::new(
        command,
        style,
        value_of("repository"),
        value_of("user_journals"),
    );

    // Run the program.
    if citecheck::citecheck(config).is_err() {
        process::exit(1);
    }
}

/// Read the subcommand and its arguments.
fn command(matches: &ArgMatches) -> Option<CiteCommand<'_>> {
    match matches.subcommand()? {
        ("check", m) => Some(CiteCommand::Check(
            m.value_of("citation")?,
            m.value_of("quote"),
            m.value_of("pincite"),
        )),
        ("fix", m) => Some(CiteCommand::Fix(m.value_of("citation")?)),
        ("kind", m) => Some(CiteCommand::Kind(m.value_of("kind")?, m.value_of("text")?)),
        ("document", m) => {
            let input = m.value_of("input")?;
            Some(match m.value_of("resolve") {
                Some(short) => CiteCommand::Resolve(input, short),
                None => CiteCommand::Document(input),
            })
        }
        ("quote", m) => Some(CiteCommand::Quote(
            m.value_of("quote")?,
            m.value_of("citation")?,
        )),
        ("uj", _) => Some(CiteCommand::NewUserJournalFile),
        _ => None,
    }
}
