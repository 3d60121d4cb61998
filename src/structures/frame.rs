// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Implementation of the Frame structure.

use getset::{CopyGetters, Getters};

use crate::structures::vector3d::Vector3D;

/// A single simulation snapshot converted into Gromacs units.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Frame {
    /// Index of the trajectory this frame belongs to, as declared in the VENUS output (1-based).
    #[getset(get_copy = "pub")]
    trajectory_index: usize,
    /// Cycle count of the frame.
    #[getset(get_copy = "pub")]
    cycle: u64,
    /// Simulation time in ps.
    #[getset(get_copy = "pub")]
    time: f64,
    /// Positions of atoms in nm.
    #[getset(get = "pub")]
    positions: Vec<Vector3D>,
    /// Velocities of atoms in nm/ps.
    #[getset(get = "pub")]
    velocities: Vec<Vector3D>,
    /// Box dimensions in nm.
    #[getset(get = "pub")]
    simbox: Vector3D,
}

impl Frame {
    /// Create a new `Frame`. VENUS output carries no box, so the box is set to zero.
    ///
    /// ## Panics
    /// Panics if `positions` and `velocities` differ in length.
    pub fn new(
        trajectory_index: usize,
        cycle: u64,
        time: f64,
        positions: Vec<Vector3D>,
        velocities: Vec<Vector3D>,
    ) -> Self {
        if positions.len() != velocities.len() {
            panic!("FATAL VENUS_GMX ERROR | Frame::new | Number of positions and velocities differ.");
        }

        Frame {
            trajectory_index,
            cycle,
            time,
            positions,
            velocities,
            simbox: Vector3D::zero(),
        }
    }

    /// Get the number of atoms in the frame.
    #[inline(always)]
    pub fn n_atoms(&self) -> usize {
        self.positions.len()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
