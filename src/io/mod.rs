// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Implementation of functions for reading VENUS output and gro templates and for writing trajectory files.

pub mod backup;
pub mod g96_io;
pub mod gro_io;
pub mod traj_write;
pub mod venus_io;
