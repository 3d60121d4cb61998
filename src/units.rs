// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Conversion of VENUS units into Gromacs units.
//!
//! VENUS reports coordinates in Å, momenta in amu·Å/(10⁻¹⁴ s), and time in units of 10⁻¹⁴ s.
//! Gromacs expects nm, nm/ps, and ps.

use crate::structures::vector3d::Vector3D;

/// Å -> nm.
pub const LENGTH_SCALE: f64 = 0.1;

/// amu·Å/(10⁻¹⁴ s) -> (g/mol)·(nm/ps). Dividing by the mass then yields nm/ps.
pub const VELOCITY_SCALE: f64 = 10.0;

/// 10⁻¹⁴ s -> ps.
pub const TIME_SCALE: f64 = 1.0e-2;

/// Convert a single coordinate from Å to nm.
#[inline(always)]
pub fn length(raw: f64) -> f64 {
    LENGTH_SCALE * raw
}

/// Convert a single momentum component of an atom with the given mass (in amu) to velocity in nm/ps.
#[inline(always)]
pub fn velocity(momentum: f64, mass: f64) -> f64 {
    VELOCITY_SCALE * momentum / mass
}

/// Convert time from 10⁻¹⁴ s to ps.
#[inline(always)]
pub fn time(raw: f64) -> f64 {
    raw * TIME_SCALE
}

/// Convert raw VENUS coordinates of an atom into a position in nm.
#[inline]
pub fn position_vector(raw: [f64; 3]) -> Vector3D {
    Vector3D::new(length(raw[0]), length(raw[1]), length(raw[2]))
}

/// Convert raw VENUS momenta of an atom into a velocity in nm/ps.
#[inline]
pub fn velocity_vector(momentum: [f64; 3], mass: f64) -> Vector3D {
    Vector3D::new(
        velocity(momentum[0], mass),
        velocity(momentum[1], mass),
        velocity(momentum[2], mass),
    )
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn length_scale() {
        assert_approx_eq!(f64, length(12.345), 1.2345);
        assert_eq!(length(12.345), 0.1 * 12.345);
        assert_eq!(length(0.0), 0.0);
        assert_approx_eq!(f64, length(-3.0), -0.3);
    }

    #[test]
    fn velocity_formula() {
        assert_eq!(velocity(5.0, 2.0), 25.0);
        assert_eq!(velocity(0.0, 12.011), 0.0);
        assert_eq!(velocity(-1.5, 3.0), -5.0);
        assert_eq!(velocity(0.7, 1.008), 10.0 * 0.7 / 1.008);
    }

    #[test]
    fn time_scale() {
        assert_approx_eq!(f64, time(50.0), 0.5);
        assert_eq!(time(50.0), 50.0 * 1.0e-2);
        assert_approx_eq!(f64, time(12345.0), 123.45);
    }

    #[test]
    fn vectors() {
        let position = position_vector([1.0, 2.0, 3.0]);
        assert_eq!(position, Vector3D::new(0.1, 0.2, 0.1 * 3.0));

        let velocity = velocity_vector([2.0, 0.0, -4.0], 2.0);
        assert_eq!(velocity, Vector3D::new(10.0, 0.0, -20.0));
    }
}
