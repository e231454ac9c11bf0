//! Collision-free output paths: `name.ext`, then `name (1).ext`, `name (2).ext`, …
//!
//! [`next_available_path`] only checks existence, so two writers racing on the
//! same directory can pick the same name. [`create_unique`] closes that window
//! by opening with create-new semantics and moving to the next suffix on `AlreadyExists`.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

fn candidate(dir: &Path, base_name: &str, extension: &str, counter: u32) -> PathBuf {
    if counter == 0 {
        dir.join(format!("{base_name}.{extension}"))
    } else {
        dir.join(format!("{base_name} ({counter}).{extension}"))
    }
}

/// True when anything occupies `path`, including a dangling symlink.
fn is_taken(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// First path in the suffix sequence that does not exist right now.
pub fn next_available_path(base_name: &str, extension: &str, dir: &Path) -> PathBuf {
    let extension = extension.trim_start_matches('.');
    (0..)
        .map(|counter| candidate(dir, base_name, extension, counter))
        .find(|path| !is_taken(path))
        .unwrap_or_else(|| candidate(dir, base_name, extension, u32::MAX))
}

/// Creates and opens the first free path in the suffix sequence. A name taken
/// between the check and the open is skipped and the counter moves on.
pub fn create_unique(base_name: &str, extension: &str, dir: &Path) -> io::Result<(PathBuf, File)> {
    let extension = extension.trim_start_matches('.');
    for counter in 0..=u32::MAX {
        let path = candidate(dir, base_name, extension, counter);
        if is_taken(&path) {
            continue;
        }
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free file name for '{base_name}.{extension}'"),
    ))
}

/// `"<prefix> - <short name> (<YYYY-MM-DD>) - <locale>"`
pub fn output_base_name(prefix: &str, short_name: &str, date: chrono::NaiveDate, locale: &str) -> String {
    format!("{prefix} - {short_name} ({}) - {locale}", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    #[test]
    fn test_first_candidate_when_free() {
        let dir = tempfile::tempdir().unwrap();
        let path = next_available_path("CV", "pdf", dir.path());
        assert_eq!(path, dir.path().join("CV.pdf"));
    }

    #[test]
    fn test_leading_dot_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = next_available_path("CV", ".docx", dir.path());
        assert_eq!(path, dir.path().join("CV.docx"));
    }

    #[test]
    fn test_sequential_writes_get_distinct_numbered_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mut seen = Vec::new();
        for _ in 0..4 {
            let path = next_available_path("CV - Ana Souza", "pdf", dir.path());
            assert!(!path.exists());
            fs::write(&path, b"x").unwrap();
            seen.push(path.file_name().unwrap().to_string_lossy().into_owned());
        }
        assert_eq!(
            seen,
            vec![
                "CV - Ana Souza.pdf",
                "CV - Ana Souza (1).pdf",
                "CV - Ana Souza (2).pdf",
                "CV - Ana Souza (3).pdf",
            ]
        );
    }

    #[test]
    fn test_fills_first_gap() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CV.pdf"), b"x").unwrap();
        fs::write(dir.path().join("CV (2).pdf"), b"x").unwrap();
        assert_eq!(
            next_available_path("CV", "pdf", dir.path()),
            dir.path().join("CV (1).pdf")
        );
    }

    #[test]
    fn test_create_unique_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CV.docx"), b"original").unwrap();
        let (path, _file) = create_unique("CV", "docx", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("CV (1).docx"));
        assert_eq!(fs::read(dir.path().join("CV.docx")).unwrap(), b"original");
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_counts_as_taken() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.pdf"), dir.path().join("CV.pdf")).unwrap();

        assert_eq!(
            next_available_path("CV", "pdf", dir.path()),
            dir.path().join("CV (1).pdf")
        );
        let (path, _file) = create_unique("CV", "pdf", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("CV (1).pdf"));
    }

    #[test]
    fn test_create_unique_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(create_unique("CV", "pdf", &missing).is_err());
    }

    #[test]
    fn test_output_base_name_pattern() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 22).unwrap();
        assert_eq!(
            output_base_name("CV", "Ed Costa", date, "pt-BR"),
            "CV - Ed Costa (2026-01-22) - pt-BR"
        );
    }
}
