// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Backing up of existing output files.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::info;

use crate::errors::WriteTrajError;

/// Get the name of the `version`th backup of a file with the given stem and extension.
fn backup_name(stem: &str, extension: Option<&str>, version: u64) -> String {
    match extension {
        Some(ext) => format!("#{}.{}.{}#", stem, version, ext),
        None => format!("#{}.{}#", stem, version),
    }
}

/// Construct a regular expression matching all backups of a file with the given stem and extension.
fn backup_regex(stem: &str, extension: Option<&str>) -> Regex {
    let pattern = match extension {
        Some(ext) => format!(
            r"^#{}\.(\d+)\.{}#$",
            regex::escape(stem),
            regex::escape(ext)
        ),
        None => format!(r"^#{}\.(\d+)#$", regex::escape(stem)),
    };

    Regex::new(&pattern).expect(
        "FATAL VENUS_GMX ERROR | backup::backup_regex | Could not construct regular expression.",
    )
}

/// Find the highest version of backups present in `directory`. Returns 0 if there is no backup.
fn highest_version(directory: &Path, regex: &Regex) -> Result<u64, WriteTrajError> {
    let entries = fs::read_dir(directory)
        .map_err(|_| WriteTrajError::CouldNotListDir(Box::from(directory)))?;

    Ok(entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_str()?;
            regex.captures(name)?.get(1)?.as_str().parse::<u64>().ok()
        })
        .max()
        .unwrap_or(0))
}

/// Move an existing file out of the way by renaming it to `#name.N.ext#`.
///
/// The backup is placed into the same directory as the file. `N` is one larger
/// than the highest version of any backup of the same file in that directory,
/// so no existing backup is ever overwritten.
///
/// ## Returns
/// - `Ok(None)` if the file does not exist and nothing had to be done.
/// - `Ok(Some(path))` with the path to the backup if the file has been backed up.
/// - `WriteTrajError` if the directory could not be listed or the file could not be renamed.
///
/// ## Example
/// ```no_run
/// use venus_gmx::io::backup::backup_file;
///
/// // `traj_1.g96` is renamed to `#traj_1.1.g96#`
/// let backup = backup_file("traj_1.g96").unwrap();
/// ```
pub fn backup_file(filename: impl AsRef<Path>) -> Result<Option<PathBuf>, WriteTrajError> {
    let path = filename.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let stem = path
        .file_stem()
        .and_then(|x| x.to_str())
        .ok_or_else(|| WriteTrajError::InvalidPath(Box::from(path)))?;
    let extension = path.extension().and_then(|x| x.to_str());

    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let version = highest_version(directory, &backup_regex(stem, extension))? + 1;
    let backup = path.with_file_name(backup_name(stem, extension, version));

    fs::rename(path, &backup).map_err(|_| WriteTrajError::CouldNotBackup(Box::from(path)))?;

    info!("Backed up '{}' to '{}'.", path.display(), backup.display());
    Ok(Some(backup))
}

/******************************/
/*         UNIT TESTS         */
/******************************/
