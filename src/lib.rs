// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! # venus_gmx: VENUS96 trajectories for Gromacs
//!
//! Rust library for converting trajectories from the text output of the VENUS96
//! classical dynamics program into Gromacs trajectory files (g96 or gro).
//!
//! ## Usage
//!
//! Run
//!
//! ```bash
//! $ cargo add venus_gmx
//! ```
//!
//! Import the crate in your Rust code:
//! ```
//! use venus_gmx::prelude::*;
//! ```
//!
//! ## Examples
//!
//! #### Converting VENUS output into g96 files
//!
//! Every trajectory found in the VENUS output is written into its own file
//! (`traj_1.g96`, `traj_2.g96`, ...).
//!
//! ```no_run
//! use venus_gmx::prelude::*;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let options = ConvertOptions::new("venus.out", "traj.g96");
//!     let files = convert(&options)?;
//!
//!     for file in files {
//!         println!("{}", file.display());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! #### Converting VENUS output into a single gro file
//!
//! Gro files need atom and residue names which are not present in VENUS output.
//! These are taken from a template gro file. Atoms of VENUS output can be reordered
//! to match the order of atoms in the template.
//!
//! ```no_run
//! use venus_gmx::prelude::*;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let options = ConvertOptions::new("venus.out", "traj.gro")
//!         .with_template("template.gro")
//!         .with_reorder("reorder.dat")
//!         .with_split(false);
//!
//!     convert(&options)?;
//!     Ok(())
//! }
//! ```
//!
//! #### Working with the trajectories directly
//!
//! ```no_run
//! use venus_gmx::prelude::*;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let trajectories = VenusParser::new()
//!         .with_progress(ProgressPrinter::new().with_print_freq(100))
//!         .parse_file("venus.out")?;
//!
//!     for (index, frames) in trajectories.iter() {
//!         if let Some(last) = frames.last() {
//!             println!("Trajectory {} ends at {} ps.", index, last.time());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Units
//! VENUS output uses Angstroms, amu * Angstrom / 10 fs for momenta, and 10 fs for time.
//! Positions are converted to nm, momenta to velocities in nm/ps, and time to ps.
//!
//! ## Error handling
//! The individual error types provided by `venus_gmx` are not exported into the `prelude` module.
//! If you want to work with a specific error type, include it explicitly from the `errors` module:
//! ```
//! use venus_gmx::errors::ParseVenusError;
//! ```
//!
//! ## License
//! This library is released under the MIT License.

/// Current version of the `venus_gmx` library.
pub const VENUS_GMX_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) mod auxiliary;
pub mod config;
pub mod convert;
pub mod errors;
pub mod files;
pub mod io;
pub mod progress;
pub mod structures;
pub mod units;

#[cfg(test)]
mod test_utilities;

/// Reexported basic `venus_gmx` structures, traits and functions.
pub mod prelude {
    pub use crate::config::ConvertOptions;
    pub use crate::convert::convert;
    pub use crate::files::FileType;
    pub use crate::io::backup::backup_file;
    pub use crate::io::g96_io::G96Writer;
    pub use crate::io::gro_io::{read_gro_template, GroWriter};
    pub use crate::io::traj_write::{write_trajectories, OutputFormat, TrajWrite};
    pub use crate::io::venus_io::{read_venus, VenusParser, VenusScanner};
    pub use crate::progress::{ProgressPrinter, ProgressStatus};
    pub use crate::structures::frame::Frame;
    pub use crate::structures::reorder::ReorderMap;
    pub use crate::structures::template::{GroTemplate, TemplateAtom};
    pub use crate::structures::trajectory_set::TrajectorySet;
    pub use crate::structures::vector3d::Vector3D;
}
