//! Target file naming and collision avoidance
//!
//! Files are named `{date}-{stub}.md`, falling back to `{date}-{stub}-{n}.md`
//! when the plain name is taken. Without a date prefix the name is just
//! `{stub}.md` / `{stub}-{n}.md`.

use std::fmt::Write;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::{Result, SaveError};

const EXTENSION: &str = "md";

/// Filename without increment or extension, e.g. `2024-05-01-notes`
///
/// Fails with a configuration error if chrono cannot render `date_format`.
pub fn file_stem(stub: &str, date_format: Option<&str>, now: &DateTime<Local>) -> Result<String> {
    let format = match date_format {
        Some(format) if !format.is_empty() => format,
        _ => return Ok(stub.to_string()),
    };

    let mut stem = String::new();
    write!(stem, "{}-{}", now.format(format), stub).map_err(|_| {
        SaveError::configuration(format!("date format {:?} cannot be rendered", format))
    })?;
    Ok(stem)
}

/// Filename for a given increment; 0 is the unmodified name
pub fn candidate_name(stem: &str, increment: u32) -> String {
    if increment == 0 {
        format!("{}.{}", stem, EXTENSION)
    } else {
        format!("{}-{}.{}", stem, increment, EXTENSION)
    }
}

/// Create the first free `stem[-n].md` in `dir`, never touching an existing file
///
/// Existence is checked first, and the file is then opened with
/// create-new semantics so a file that appears in between is skipped too.
pub fn create_target(dir: &Path, stem: &str) -> Result<(PathBuf, File)> {
    let mut increment = 0;
    loop {
        let path = dir.join(candidate_name(stem, increment));
        if path.exists() {
            increment += 1;
            continue;
        }

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                debug!(increment, "created {}", path.display());
                return Ok((path, file));
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!("{} appeared before create, trying next name", path.display());
                increment += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use std::fs;
    use tempfile::TempDir;

    fn fixed_now() -> DateTime<Local> {
        let naive = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        Local.from_local_datetime(&naive).earliest().unwrap()
    }

    #[test]
    fn test_file_stem_with_date() {
        let stem = file_stem("notes", Some("%Y-%m-%d"), &fixed_now()).unwrap();
        assert_eq!(stem, "2024-05-01-notes");
    }

    #[test]
    fn test_file_stem_keeps_stub_verbatim() {
        let stem = file_stem(" my notes ", None, &fixed_now()).unwrap();
        assert_eq!(stem, " my notes ");
    }

    #[test]
    fn test_file_stem_bad_format() {
        let err = file_stem("notes", Some("%Y-%Q"), &fixed_now()).unwrap_err();
        assert!(matches!(err, SaveError::Configuration { .. }));
    }

    #[test]
    fn test_file_stem_without_date() {
        assert_eq!(file_stem("notes", None, &fixed_now()).unwrap(), "notes");
        assert_eq!(file_stem("notes", Some(""), &fixed_now()).unwrap(), "notes");
    }

    #[test]
    fn test_candidate_name() {
        assert_eq!(candidate_name("2024-05-01-notes", 0), "2024-05-01-notes.md");
        assert_eq!(candidate_name("2024-05-01-notes", 1), "2024-05-01-notes-1.md");
        assert_eq!(candidate_name("notes", 12), "notes-12.md");
    }

    #[test]
    fn test_create_target_plain_name_first() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        let (path, _file) = create_target(dir, "notes").unwrap();
        assert_eq!(path, dir.join("notes.md"));
    }

    #[test]
    fn test_create_target_skips_existing() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("notes.md"), "first").unwrap();
        fs::write(dir.join("notes-1.md"), "second").unwrap();

        let (path, _file) = create_target(dir, "notes").unwrap();

        assert_eq!(path, dir.join("notes-2.md"));
        assert_eq!(fs::read_to_string(dir.join("notes.md")).unwrap(), "first");
        assert_eq!(fs::read_to_string(dir.join("notes-1.md")).unwrap(), "second");
    }

    #[test]
    fn test_create_target_reuses_plain_name() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        // notes.md is free even though notes-1.md exists
        fs::write(dir.join("notes-1.md"), "x").unwrap();
        let (path, _file) = create_target(dir, "notes").unwrap();
        assert_eq!(path, dir.join("notes.md"));
    }

    #[cfg(unix)]
    #[test]
    fn test_create_target_skips_dangling_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        std::os::unix::fs::symlink(dir.join("gone"), dir.join("notes.md")).unwrap();

        let (path, _file) = create_target(dir, "notes").unwrap();
        assert_eq!(path, dir.join("notes-1.md"));
    }
}
