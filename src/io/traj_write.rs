// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Traits and functions for writing trajectory files.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::WriteTrajError;
use crate::files::FileType;
use crate::io::backup::backup_file;
use crate::io::g96_io::G96Writer;
use crate::io::gro_io::{check_gro_coordinates, check_template_atoms, GroWriter};
use crate::structures::{frame::Frame, template::GroTemplate, trajectory_set::TrajectorySet};

/// Any structure implementing the `TrajWrite` trait can be used as a trajectory writer.
pub trait TrajWrite {
    /// Write a single frame into the trajectory file.
    fn write_frame(&mut self, frame: &Frame) -> Result<(), WriteTrajError>;

    /// Write all buffered data into the trajectory file.
    fn flush(&mut self) -> Result<(), WriteTrajError>;
}

/// Format of the output trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat<'a> {
    /// g96 format with reduced positions and velocities.
    G96,
    /// gro format. Atom naming and box dimensions are taken from the template.
    Gro(&'a GroTemplate),
}

impl<'a> OutputFormat<'a> {
    /// Get the file type corresponding to the format.
    pub fn file_type(&self) -> FileType {
        match self {
            OutputFormat::G96 => FileType::G96,
            OutputFormat::Gro(_) => FileType::GRO,
        }
    }

    /// Create a new file and open a trajectory writer for it.
    pub fn open(&self, filename: impl AsRef<Path>) -> Result<Box<dyn TrajWrite + 'a>, WriteTrajError> {
        match *self {
            OutputFormat::G96 => Ok(Box::new(G96Writer::new(filename)?)),
            OutputFormat::Gro(template) => Ok(Box::new(GroWriter::new(filename, template)?)),
        }
    }

    /// Check that all frames of the set can be written in this format.
    pub fn check(&self, set: &TrajectorySet) -> Result<(), WriteTrajError> {
        match self {
            OutputFormat::G96 => Ok(()),
            OutputFormat::Gro(template) => {
                for frame in set.frames_iter() {
                    check_template_atoms(template, frame)?;
                }

                check_gro_coordinates(set.frames_iter())
            }
        }
    }
}

/// Get the path for the trajectory with the given index: `<stem>_<index>.<extension>`.
///
/// ## Example
/// ```
/// use std::path::{Path, PathBuf};
/// use venus_gmx::io::traj_write::split_path;
///
/// assert_eq!(split_path(Path::new("out/traj.g96"), 3), PathBuf::from("out/traj_3.g96"));
/// ```
pub fn split_path(output: &Path, index: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|x| x.to_string_lossy().into_owned())
        .unwrap_or_default();

    match output.extension() {
        Some(ext) => output.with_file_name(format!("{}_{}.{}", stem, index, ext.to_string_lossy())),
        None => output.with_file_name(format!("{}_{}", stem, index)),
    }
}

/// Write a sequence of frames into a single file, backing up the file if it already exists.
fn write_file<'f>(
    format: &OutputFormat,
    filename: &Path,
    frames: impl IntoIterator<Item = &'f Frame>,
) -> Result<(), WriteTrajError> {
    backup_file(filename)?;

    let mut writer = format.open(filename)?;
    let mut n_frames = 0;
    for frame in frames {
        writer.write_frame(frame)?;
        n_frames += 1;
    }
    writer.flush()?;

    info!("Written {} frame(s) into '{}'.", n_frames, filename.display());
    Ok(())
}

/// Write all trajectories of a `TrajectorySet` into output files.
///
/// ## Parameters
/// - `set`: trajectories to write.
/// - `format`: format of the output files.
/// - `output`: path to the output file.
/// - `split`: if `true`, each trajectory is written into its own file named `<stem>_<n>.<extension>`
///   where `n` is the 1-based position of the trajectory in `set`. If `false`,
///   all trajectories are concatenated in order and written into `output`.
///
/// ## Returns
/// Paths to all written files in the order in which they were written.
/// Empty vector if `set` contains no trajectory. Otherwise `WriteTrajError`.
///
/// ## Example
/// ```no_run
/// use std::path::Path;
/// use venus_gmx::prelude::*;
///
/// let trajectories = read_venus("venus.out").unwrap();
/// let files = write_trajectories(&trajectories, OutputFormat::G96, Path::new("traj.g96"), true).unwrap();
/// ```
///
/// ## Notes
/// - Existing files are backed up before being overwritten (see [`backup_file`](crate::io::backup::backup_file)).
/// - All frames are checked before any file is touched. If the frames can not be written in the
///   requested format, no file is created, backed up, or modified.
pub fn write_trajectories(
    set: &TrajectorySet,
    format: OutputFormat,
    output: &Path,
    split: bool,
) -> Result<Vec<PathBuf>, WriteTrajError> {
    if set.is_empty() {
        warn!("No trajectories to write. No output file has been created.");
        return Ok(Vec::new());
    }

    if output.file_name().is_none() {
        return Err(WriteTrajError::InvalidPath(Box::from(output)));
    }

    format.check(set)?;

    if split {
        let mut written = Vec::with_capacity(set.n_trajectories());
        for (position, (_, frames)) in set.iter().enumerate() {
            let path = split_path(output, position + 1);
            write_file(&format, &path, frames)?;
            written.push(path);
        }

        Ok(written)
    } else {
        write_file(&format, output, set.frames_iter())?;
        Ok(vec![output.to_path_buf()])
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
