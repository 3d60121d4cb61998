// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Implementation of a three-dimensional vector used for positions, velocities, and box sizes.

use std::ops::{Deref, DerefMut};

use nalgebra::base::Vector3;

/// Describes a position of a point in space, a velocity, or the dimensions of a box.
/// Implemented using `nalgebra`'s Vector3 with double precision.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Vector3D(pub(crate) Vector3<f64>);

impl From<[f64; 3]> for Vector3D {
    #[inline]
    fn from(arr: [f64; 3]) -> Self {
        Vector3D(Vector3::new(arr[0], arr[1], arr[2]))
    }
}

impl From<Vector3D> for [f64; 3] {
    #[inline]
    fn from(vec: Vector3D) -> Self {
        [vec.0.x, vec.0.y, vec.0.z]
    }
}

/// Allows accessing fields of `Vector3D` as `.x`, `.y`, and `.z`.
#[repr(C)]
pub struct Vector3Raw {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Deref for Vector3D {
    type Target = Vector3Raw;

    #[inline]
    fn deref(&self) -> &Self::Target {
        // `Vector3<f64>` is stored as three contiguous `f64` values
        unsafe { &*(self.0.as_ptr() as *const Vector3Raw) }
    }
}

impl DerefMut for Vector3D {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *(self.0.as_mut_ptr() as *mut Vector3Raw) }
    }
}

impl Vector3D {
    /// Create a new `Vector3D` structure.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3D(Vector3::new(x, y, z))
    }

    /// Create a new zero vector.
    ///
    /// Every call constructs an independent value, so two frames never share a box.
    #[inline]
    pub fn zero() -> Self {
        Vector3D(Vector3::zeros())
    }

    /// Returns `true` if all the fields of the vector are exactly zero.
    /// Otherwise, returns `false`.
    pub fn is_zero(&self) -> bool {
        self.0.x == 0.0 && self.0.y == 0.0 && self.0.z == 0.0
    }

    /// Get the largest and the smallest component of the vector.
    pub fn min_max(&self) -> (f64, f64) {
        (self.0.min(), self.0.max())
    }
}

impl Default for Vector3D {
    /// Create a zero vector.
    fn default() -> Self {
        Vector3D::zero()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields() {
        let mut vec = Vector3D::new(1.5, -2.0, 3.25);
        assert_eq!(vec.x, 1.5);
        assert_eq!(vec.y, -2.0);
        assert_eq!(vec.z, 3.25);

        vec.y = 4.0;
        assert_eq!(vec, Vector3D::new(1.5, 4.0, 3.25));
    }

    #[test]
    fn array_conversions() {
        let vec: Vector3D = [0.1, 0.2, 0.3].into();
        let arr: [f64; 3] = vec.into();
        assert_eq!(arr, [0.1, 0.2, 0.3]);
    }

    #[test]
    fn zero_is_fresh() {
        let mut first = Vector3D::zero();
        let second = Vector3D::default();

        first.x = 3.0;

        assert!(!first.is_zero());
        assert!(second.is_zero());
    }

    #[test]
    fn min_max() {
        let vec = Vector3D::new(4.3, -5.6, 1.2);
        assert_eq!(vec.min_max(), (-5.6, 4.3));
    }
}
