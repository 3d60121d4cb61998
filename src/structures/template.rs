// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Implementation of the GroTemplate structure providing atom naming for gro output.

use getset::{CopyGetters, Getters};

use crate::structures::vector3d::Vector3D;

/// Naming and numbering of a single atom taken from a gro template.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct TemplateAtom {
    #[getset(get_copy = "pub")]
    residue_number: usize,
    /// Residue name with trailing whitespace removed. Leading whitespace is kept.
    #[getset(get = "pub")]
    residue_name: String,
    /// Atom name with trailing whitespace removed. Leading whitespace is kept.
    #[getset(get = "pub")]
    atom_name: String,
    #[getset(get_copy = "pub")]
    atom_number: usize,
}

impl TemplateAtom {
    /// Create a new `TemplateAtom`.
    pub fn new(residue_number: usize, residue_name: &str, atom_name: &str, atom_number: usize) -> Self {
        TemplateAtom {
            residue_number,
            residue_name: residue_name.to_owned(),
            atom_name: atom_name.to_owned(),
            atom_number,
        }
    }
}

/// Static topology information that VENUS output does not carry.
/// Shared by all frames of all trajectories written into gro files.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct GroTemplate {
    #[getset(get = "pub")]
    title: String,
    #[getset(get = "pub")]
    atoms: Vec<TemplateAtom>,
    /// Box dimensions in nm.
    #[getset(get = "pub")]
    simbox: Vector3D,
}

impl GroTemplate {
    /// Create a new `GroTemplate`.
    pub fn new(title: &str, atoms: Vec<TemplateAtom>, simbox: Vector3D) -> Self {
        GroTemplate {
            title: title.to_owned(),
            atoms,
            simbox,
        }
    }

    /// Get the number of atoms in the template.
    #[inline(always)]
    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }
}
