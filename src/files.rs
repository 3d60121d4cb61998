// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Enum capturing output file types supported by `venus_gmx`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Types of trajectory files that can be written by `venus_gmx`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Unknown,
    G96,
    GRO,
}

impl FileType {
    /// Identify file type from the name of the file (based on file extension).
    pub fn from_name(filename: impl AsRef<Path>) -> FileType {
        let extension = match filename.as_ref().extension() {
            Some(x) => x,
            None => return FileType::Unknown,
        };

        match extension.to_str() {
            Some("g96") => FileType::G96,
            Some("gro") => FileType::GRO,
            Some(_) | None => FileType::Unknown,
        }
    }

    /// Get the file extension associated with the file type.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            FileType::G96 => Some("g96"),
            FileType::GRO => Some("gro"),
            FileType::Unknown => None,
        }
    }
}
