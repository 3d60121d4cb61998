// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Implementation of the TrajectorySet structure: frames grouped by trajectory.

use crate::structures::frame::Frame;

/// Ordered collection of trajectories extracted from a single VENUS output.
///
/// Trajectories are kept in the order in which they were started,
/// frames inside each trajectory are kept in temporal order.
/// A trajectory is identified by its 1-based position in the set. The index declared
/// in the VENUS output is stored alongside, but it does not have to be unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectorySet {
    /// Declared index of the trajectory at its start and its frames.
    trajectories: Vec<(usize, Vec<Frame>)>,
    /// Most recently declared trajectory index.
    declared: Option<usize>,
}

impl TrajectorySet {
    /// Create an empty `TrajectorySet`.
    pub fn new() -> Self {
        TrajectorySet::default()
    }

    /// Register a trajectory index declared in the VENUS output.
    ///
    /// A new trajectory is started only if `index` is larger than the number of trajectories
    /// already in the set. Otherwise, frames keep being added to the last trajectory.
    /// Returns `true` if a new trajectory was started.
    pub fn declare_trajectory(&mut self, index: usize) -> bool {
        self.declared = Some(index);

        if index > self.trajectories.len() {
            self.trajectories.push((index, Vec::new()));
            true
        } else {
            false
        }
    }

    /// Get the most recently declared trajectory index.
    pub fn declared_index(&self) -> Option<usize> {
        self.declared
    }

    /// Append a frame to the last trajectory.
    /// Returns the frame back if no trajectory has been started yet.
    pub fn push_frame(&mut self, frame: Frame) -> Result<(), Frame> {
        match self.trajectories.last_mut() {
            Some((_, frames)) => {
                frames.push(frame);
                Ok(())
            }
            None => Err(frame),
        }
    }

    /// Get frames of the trajectory at the given 1-based position.
    pub fn get(&self, position: usize) -> Option<&[Frame]> {
        position
            .checked_sub(1)
            .and_then(|i| self.trajectories.get(i))
            .map(|(_, frames)| frames.as_slice())
    }

    /// Get the number of trajectories.
    pub fn n_trajectories(&self) -> usize {
        self.trajectories.len()
    }

    /// Get the total number of frames in all trajectories.
    pub fn n_frames(&self) -> usize {
        self.trajectories.iter().map(|(_, frames)| frames.len()).sum()
    }

    /// Returns `true` if the set contains no trajectory.
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// Iterate over the trajectories in order, yielding `(declared index, frames)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Frame])> {
        self.trajectories
            .iter()
            .map(|(index, frames)| (*index, frames.as_slice()))
    }

    /// Iterate over all frames of all trajectories, trajectory after trajectory.
    pub fn frames_iter(&self) -> impl Iterator<Item = &Frame> {
        self.trajectories.iter().flat_map(|(_, frames)| frames)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
