//! Functions for interacting with the file system.

use ansi_term::Color;
use slog::debug;
use std::{fs, path::Path};

/// Load a file into a string.
///
/// This function is used to load documents, repository files, and user-journal
/// files into strings, which can then be passed to the checker.
pub fn load_file(path: &Path) -> Result<String, String> {
    debug!(
        slog_scope::logger(),
        "Loading file {}...",
        path.to_string_lossy()
    );

    match fs::read_to_string(path) {
        Ok(r) => {
            debug!(
                slog_scope::logger(),
                "File {} loaded.",
                path.to_string_lossy()
            );
            Ok(r)
        }
        Err(e) => {
            let err_msg = format!("error reading the file {}—{}", path.to_string_lossy(), e);
            Err(err_msg)
        }
    }
}

/// Create a blank user-journals file.
///
/// Creates a blank user-journals file that users can then fill in with their
/// own journals.
pub fn new_user_journals_ron(path: &Path) -> Result<(), String> {
    eprintln!(
        "{} Creating blank user-journal file ({})",
        Color::Green.paint("INFO"),
        Color::Blue.paint(path.to_string_lossy())
    );

    let blank_ron = r#"// Enter your own journal abbreviations into this document.
// All entries must come between the two curly brackets, which start and end the
// file. Each entry should include two quoted strings, separated by a colon. The
// first string is the full journal title. The second string is the
// abbreviation. Put each journal on a separate line, with commas after every
// line. Your abbreviations replace the built-in ones for the same journal.
// Below is an example:
//
// {
//  "Journal of Stuff":"J. Stuff",
//  "Harvard Law Review":"Harv. L. Rev.",
// }

{
    "Full Journal Name":"Abbreviated Name",
}
"#;

    fs::write(path, blank_ron).map_err(|e| {
        format!(
            "error writing the file {}—{}",
            path.to_string_lossy(),
            e
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::normalize::load_user_journals;

    mod test_load_file {
        use super::*;

        #[test]
        fn test_load() {
            let load_result = load_file(Path::new("./Cargo.toml"));
            assert!(load_result.is_ok());
            assert!(load_result.unwrap().contains("citecheck"));
        }

        #[test]
        fn fail_load() {
            let load_result = load_file(Path::new("./does-not-exist.json"));
            assert!(load_result
                .unwrap_err()
                .starts_with("error reading the file"));
        }
    }

    #[test]
    fn blank_user_journals_parse() {
        let path = std::env::temp_dir().join("citecheck-blank-user-journals.ron");
        new_user_journals_ron(&path).unwrap();

        let journals = load_user_journals(&load_file(&path).unwrap()).unwrap();
        assert_eq!(&journals["Full Journal Name"], "Abbreviated Name");

        let _ = fs::remove_file(path);
    }
}
