// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Small functions for testing purposes.

#[cfg(test)]
pub(crate) mod utilities {
    use crate::structures::{frame::Frame, vector3d::Vector3D};
    use float_cmp::assert_approx_eq;

    pub(crate) fn compare_vectors(vec1: &Vector3D, vec2: &Vector3D) {
        assert_approx_eq!(f64, vec1.x, vec2.x);
        assert_approx_eq!(f64, vec1.y, vec2.y);
        assert_approx_eq!(f64, vec1.z, vec2.z);
    }

    pub(crate) fn compare_frames(frame1: &Frame, frame2: &Frame) {
        assert_eq!(frame1.trajectory_index(), frame2.trajectory_index());
        assert_eq!(frame1.cycle(), frame2.cycle());
        assert_approx_eq!(f64, frame1.time(), frame2.time());
        assert_eq!(frame1.n_atoms(), frame2.n_atoms());

        for (pos1, pos2) in frame1.positions().iter().zip(frame2.positions()) {
            compare_vectors(pos1, pos2);
        }

        for (vel1, vel2) in frame1.velocities().iter().zip(frame2.velocities()) {
            compare_vectors(vel1, vel2);
        }

        compare_vectors(frame1.simbox(), frame2.simbox());
    }
}
