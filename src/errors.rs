// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Implementation of errors that can occur in the `venus_gmx` library.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur when scanning and parsing VENUS output.
/// Line numbers are 1-based.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseVenusError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("Could not read file `{0}`.")]
    CouldNotRead(Box<Path>),
    #[error("Could not parse number of atoms from line {0}: `{1}`.")]
    ParseAtomCountErr(usize, String),
    #[error("Number of atoms declared on line {line} (`{found}`) differs from the previously declared number of atoms (`{expected}`).")]
    AtomCountRedeclared {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Number of atoms in VENUS output (`{declared}`) does not match the number of atoms in the gro template (`{template}`).")]
    TemplateMismatch { declared: usize, template: usize },
    #[error("Number of atoms in VENUS output (`{declared}`) does not match the length of the reorder map (`{map}`).")]
    ReorderMismatch { declared: usize, map: usize },
    #[error("Could not parse masses from line {0}: `{1}`.")]
    ParseMassesErr(usize, String),
    #[error("Masses on line {line} list `{found}` atoms but `{expected}` atoms are declared.")]
    MassCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Could not parse trajectory number from line {0}: `{1}`.")]
    ParseTrajectoryErr(usize, String),
    #[error("Could not parse cycle count or time from line {0}: `{1}`.")]
    ParseCycleErr(usize, String),
    #[error("Could not parse line {0} as atom: `{1}`.")]
    ParseAtomLineErr(usize, String),
    #[error("Frame starting on line {0} precedes the declaration of the number of atoms.")]
    AtomCountUnknown(usize),
    #[error("Frame starting on line {0} precedes the masses of atoms.")]
    MassesUnknown(usize),
    #[error("Frame starting on line {0} does not belong to any trajectory.")]
    NoActiveTrajectory(usize),
    #[error("Input ended unexpectedly inside a block starting on line {0}.")]
    UnexpectedEnd(usize),
}

/// Errors that can occur when reading and parsing gro template file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseTemplateError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("File `{0}` ended unexpectedly.")]
    LineNotFound(Box<Path>),
    #[error("Could not parse line `{0}`.")]
    ParseLineErr(String),
    #[error("Could not parse line `{0}` as atom.")]
    ParseAtomLineErr(String),
    #[error("Could not parse line `{0}` as box dimensions.")]
    ParseBoxLineErr(String),
}

/// Errors that can occur when reading or validating a reorder map.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReorderError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("Could not parse `{0}` as an atom index.")]
    ParseIndexErr(String),
    #[error("Reorder map is empty.")]
    Empty,
    #[error("Atom index `{index}` is out of range (expected 1 to {n_atoms}).")]
    OutOfRange { index: i64, n_atoms: usize },
    #[error("Atom index `{0}` occurs multiple times in the reorder map.")]
    Duplicate(usize),
}

/// Errors that can occur when writing trajectory files.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WriteTrajError {
    #[error("File `{0}` could not be created.")]
    CouldNotCreate(Box<Path>),
    #[error("Could not write line into file `{0}`.")]
    CouldNotWrite(Box<Path>),
    #[error("Could not back up file `{0}`.")]
    CouldNotBackup(Box<Path>),
    #[error("Could not list directory `{0}`.")]
    CouldNotListDir(Box<Path>),
    #[error("Output path `{0}` has no file name.")]
    InvalidPath(Box<Path>),
    #[error("Position of atom `{atom}` in frame with cycle `{cycle}` is too large for the gro format.")]
    CoordinateTooLarge { atom: usize, cycle: u64 },
    #[error("Frame with cycle `{cycle}` contains `{frame}` atoms but the gro template contains `{template}` atoms.")]
    AtomsNumberMismatch {
        cycle: u64,
        frame: usize,
        template: usize,
    },
}

/// Errors that can occur when constructing or loading conversion options.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("Could not parse configuration file `{0}`: {1}")]
    ParseErr(Box<Path>, String),
    #[error("Output format of `{0}` is unknown (expected `g96` or `gro`).")]
    UnknownFormat(Box<Path>),
    #[error("Conversion to gro requires a gro template file.")]
    MissingTemplate,
}

/// Kind of input file required by a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Venus,
    Template,
    Reorder,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Venus => write!(f, "VENUS output"),
            InputKind::Template => write!(f, "Template gro"),
            InputKind::Reorder => write!(f, "Reorder map"),
        }
    }
}

/// Broad category of a conversion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A required input file does not exist.
    MissingInput,
    /// Declared sizes of the inputs do not agree with each other.
    SchemaViolation,
    /// A field could not be interpreted or a block appears before the state it requires.
    Parse,
    /// The reorder map is not a valid permutation.
    Permutation,
    /// Invalid conversion options.
    Config,
    /// Reading or writing a file failed.
    Io,
}

/// Errors that can occur during a complete conversion.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConvertError {
    #[error("{0} file `{1}` does not exist.")]
    MissingInput(InputKind, Box<Path>),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Could not convert VENUS output `{0}`: {1}")]
    Venus(Box<Path>, #[source] ParseVenusError),
    #[error("Could not read gro template: {0}")]
    Template(#[from] ParseTemplateError),
    #[error("Could not read reorder map `{0}`: {1}")]
    Reorder(Box<Path>, #[source] ReorderError),
    #[error(transparent)]
    Write(#[from] WriteTrajError),
}

impl ConvertError {
    /// Get the category of the error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::MissingInput(_, _) => ErrorCategory::MissingInput,
            ConvertError::Config(_) => ErrorCategory::Config,
            ConvertError::Venus(_, e) => match e {
                ParseVenusError::FileNotFound(_) => ErrorCategory::MissingInput,
                ParseVenusError::CouldNotRead(_) => ErrorCategory::Io,
                ParseVenusError::AtomCountRedeclared { .. }
                | ParseVenusError::TemplateMismatch { .. }
                | ParseVenusError::ReorderMismatch { .. }
                | ParseVenusError::MassCountMismatch { .. } => ErrorCategory::SchemaViolation,
                _ => ErrorCategory::Parse,
            },
            ConvertError::Template(e) => match e {
                ParseTemplateError::FileNotFound(_) => ErrorCategory::MissingInput,
                _ => ErrorCategory::Parse,
            },
            ConvertError::Reorder(_, e) => match e {
                ReorderError::FileNotFound(_) => ErrorCategory::MissingInput,
                ReorderError::ParseIndexErr(_) => ErrorCategory::Parse,
                _ => ErrorCategory::Permutation,
            },
            ConvertError::Write(_) => ErrorCategory::Io,
        }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
