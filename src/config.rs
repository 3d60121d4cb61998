// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Options controlling the conversion of VENUS output into GROMACS trajectories.

use std::fs;
use std::path::{Path, PathBuf};

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::files::FileType;

fn default_split() -> bool {
    true
}

/// Options of a single conversion.
///
/// Constructed either using `ConvertOptions::new` and the `with_%PARAMETER()` methods
/// or by reading a YAML file using `ConvertOptions::from_yaml_file`.
///
/// ## Example of a YAML file
/// ```yaml
/// venus: venus.out
/// output: traj.gro
/// template: template.gro
/// reorder: reorder.dat
/// split: false
/// ```
///
/// Only `venus` and `output` are required. Relative paths are interpreted
/// relative to the current working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, CopyGetters)]
#[serde(deny_unknown_fields)]
pub struct ConvertOptions {
    /// Path to the VENUS output file.
    #[getset(get = "pub")]
    venus: PathBuf,
    /// Path to the output trajectory file.
    #[getset(get = "pub")]
    output: PathBuf,
    /// Format of the output. If not provided, it is guessed from the extension of `output`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[getset(get_copy = "pub")]
    format: Option<FileType>,
    /// Path to the file with reorder map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[getset(get = "pub")]
    reorder: Option<PathBuf>,
    /// Path to the gro template. Required for gro output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[getset(get = "pub")]
    template: Option<PathBuf>,
    /// Write each trajectory into a separate file. Default: true.
    #[serde(default = "default_split")]
    #[getset(get_copy = "pub")]
    split: bool,
    /// Print progress of parsing. Default: false.
    #[serde(default)]
    #[getset(get_copy = "pub")]
    progress: bool,
}

impl ConvertOptions {
    /// Create new options for converting `venus` into `output`.
    /// Trajectories are split, not reordered, and progress is not printed.
    pub fn new(venus: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        ConvertOptions {
            venus: venus.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            format: None,
            reorder: None,
            template: None,
            split: default_split(),
            progress: false,
        }
    }

    /// Set the output format explicitly.
    pub fn with_format(mut self, format: FileType) -> Self {
        self.format = Some(format);
        self
    }

    /// Reorder atoms using the map from the provided file.
    pub fn with_reorder(mut self, reorder: impl AsRef<Path>) -> Self {
        self.reorder = Some(reorder.as_ref().to_path_buf());
        self
    }

    /// Use the provided gro file as a template.
    pub fn with_template(mut self, template: impl AsRef<Path>) -> Self {
        self.template = Some(template.as_ref().to_path_buf());
        self
    }

    /// Set whether the trajectories should be written into separate files.
    pub fn with_split(mut self, split: bool) -> Self {
        self.split = split;
        self
    }

    /// Set whether the progress of parsing should be printed.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Read options from a YAML file.
    pub fn from_yaml_file(filename: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = filename.as_ref();
        let content =
            fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound(Box::from(path)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseErr(Box::from(path), e.to_string()))
    }

    /// Get the format of the output: the explicitly set format or the format guessed from the output path.
    pub fn output_type(&self) -> FileType {
        self.format
            .unwrap_or_else(|| FileType::from_name(&self.output))
    }

    /// Check that the options describe a conversion that can be performed.
    ///
    /// ## Returns
    /// Format of the output if the options are valid. Otherwise `ConfigError`.
    pub fn validate(&self) -> Result<FileType, ConfigError> {
        match self.output_type() {
            FileType::Unknown => Err(ConfigError::UnknownFormat(Box::from(self.output.as_path()))),
            FileType::GRO if self.template.is_none() => Err(ConfigError::MissingTemplate),
            format => Ok(format),
        }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
