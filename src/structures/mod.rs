// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Implementation of various structures used in the `venus_gmx` library.

pub mod frame;
pub mod reorder;
pub mod template;
pub mod trajectory_set;
pub mod vector3d;
