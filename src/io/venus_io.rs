// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Implementation of functions for reading VENUS output files.
//!
//! VENUS output is free-form text in which structured data regions are marked by anchors.
//! The text is read in two layers:
//! - [`VenusScanner`] is a finite-state machine walking through the lines and
//!   emitting a [`ScanEvent`] for every recognized piece of data,
//! - [`VenusParser`] consumes the events, converts units, applies the reorder map,
//!   and collects the frames into a [`TrajectorySet`].

use std::fs;
use std::iter::Enumerate;
use std::path::Path;
use std::str::Lines;

use tracing::{debug, info, warn};

use crate::auxiliary::{nth_token, parse_float};
use crate::errors::ParseVenusError;
use crate::progress::{ProgressPrinter, ProgressStatus};
use crate::structures::{
    frame::Frame, reorder::ReorderMap, template::GroTemplate, trajectory_set::TrajectorySet,
    vector3d::Vector3D,
};
use crate::units;

/// Anchor of the line declaring the number of atoms (after `=`).
pub const ANCHOR_NUM_ATOMS: &str = "NUMBER OF ATOMS";
/// Anchor of the masses block.
pub const ANCHOR_MASSES: &str = "MASSES OF ATOMS";
/// Anchor of the line declaring the index of the trajectory.
pub const ANCHOR_TRAJECTORY: &str = "TRAJECTORY NUMBER";
/// Anchor of the line starting a frame.
pub const ANCHOR_CYCLE: &str = "THE CYCLE COUNT IS";

/// Number of lines between the masses anchor and the line with masses.
const MASSES_SKIP: usize = 1;
/// Number of lines between the cycle anchor and the first atom line.
const CYCLE_HEADER_SKIP: usize = 4;

const TRAJECTORY_TOKEN: usize = 3;
const CYCLE_TOKEN: usize = 4;
const TIME_TOKEN: usize = 6;

/// Number of numeric fields on an atom line: 3 coordinates and 3 momenta.
const ATOM_LINE_FIELDS: usize = 6;

/******************************/
/*          SCANNER           */
/******************************/

/// State of the [`VenusScanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for anchors.
    ExpectHeader,
    /// Skipping `skip` more lines before the line with masses.
    ExpectMasses { skip: usize },
    /// Skipping `skip` more lines before the first atom line.
    ExpectCycleHeader { skip: usize },
    /// Expecting the atom line with the given 0-based index.
    ExpectAtomLine(usize),
    /// All atom lines of a frame have been read.
    FrameComplete,
}

/// Piece of structured data recognized in VENUS output.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// Number of atoms in the system.
    AtomCount(usize),
    /// Masses of all atoms in amu.
    Masses(Vec<f64>),
    /// Index of the trajectory declared in the output.
    Trajectory(usize),
    /// Start of a frame. Time is in VENUS units.
    CycleStart { cycle: u64, raw_time: f64 },
    /// Coordinates and momenta of a single atom in VENUS units.
    AtomLine {
        index: usize,
        coordinates: [f64; 3],
        momenta: [f64; 3],
    },
    /// End of the frame.
    FrameEnd,
}

/// Finite-state scanner over the lines of VENUS output.
///
/// Yields `(line number, event)` pairs. Line numbers are 1-based; `FrameEnd` carries
/// the line number of the corresponding cycle anchor. Anchors are only recognized
/// in the `ExpectHeader` state, so skipped lines and atom lines are never interpreted.
/// When a line contains several anchors, the first one in the order
/// number of atoms, masses, trajectory, cycle is used.
///
/// The scanner stops after returning the first error.
#[derive(Debug)]
pub struct VenusScanner<'a> {
    lines: Enumerate<Lines<'a>>,
    state: ScanState,
    n_atoms: Option<usize>,
    /// Line number at which the currently read block started.
    block_start: usize,
    finished: bool,
}

impl<'a> VenusScanner<'a> {
    /// Create a new scanner over the provided text.
    pub fn new(content: &'a str) -> Self {
        VenusScanner {
            lines: content.lines().enumerate(),
            state: ScanState::ExpectHeader,
            n_atoms: None,
            block_start: 0,
            finished: false,
        }
    }

    /// Get the current state of the scanner.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Get the number of atoms, if already declared.
    pub fn n_atoms(&self) -> Option<usize> {
        self.n_atoms
    }

    /// Look for anchors in a line. Returns `None` if the line produces no event.
    fn scan_header(
        &mut self,
        line_number: usize,
        line: &str,
    ) -> Option<Result<ScanEvent, ParseVenusError>> {
        if line.contains(ANCHOR_NUM_ATOMS) {
            return Some(self.read_atom_count(line_number, line));
        }

        if line.contains(ANCHOR_MASSES) {
            self.block_start = line_number;
            self.state = ScanState::ExpectMasses { skip: MASSES_SKIP };
            return None;
        }

        if line.contains(ANCHOR_TRAJECTORY) {
            return Some(
                nth_token(line, TRAJECTORY_TOKEN)
                    .and_then(|token| token.parse::<usize>().ok())
                    .map(ScanEvent::Trajectory)
                    .ok_or_else(|| {
                        ParseVenusError::ParseTrajectoryErr(line_number, line.to_owned())
                    }),
            );
        }

        if line.contains(ANCHOR_CYCLE) {
            return Some(self.read_cycle(line_number, line));
        }

        None
    }

    fn read_atom_count(&mut self, line_number: usize, line: &str) -> Result<ScanEvent, ParseVenusError> {
        let n_atoms = line
            .rsplit('=')
            .next()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .ok_or_else(|| ParseVenusError::ParseAtomCountErr(line_number, line.to_owned()))?;

        match self.n_atoms {
            Some(expected) if expected != n_atoms => Err(ParseVenusError::AtomCountRedeclared {
                line: line_number,
                expected,
                found: n_atoms,
            }),
            _ => {
                self.n_atoms = Some(n_atoms);
                Ok(ScanEvent::AtomCount(n_atoms))
            }
        }
    }

    fn read_cycle(&mut self, line_number: usize, line: &str) -> Result<ScanEvent, ParseVenusError> {
        if self.n_atoms.is_none() {
            return Err(ParseVenusError::AtomCountUnknown(line_number));
        }

        let cycle = nth_token(line, CYCLE_TOKEN).and_then(|token| token.parse::<u64>().ok());
        let raw_time = nth_token(line, TIME_TOKEN).and_then(parse_float);

        match (cycle, raw_time) {
            (Some(cycle), Some(raw_time)) => {
                self.block_start = line_number;
                self.state = ScanState::ExpectCycleHeader {
                    skip: CYCLE_HEADER_SKIP,
                };
                Ok(ScanEvent::CycleStart { cycle, raw_time })
            }
            _ => Err(ParseVenusError::ParseCycleErr(line_number, line.to_owned())),
        }
    }

    /// State following the cycle header.
    fn first_atom_state(&self) -> ScanState {
        match self.n_atoms {
            Some(0) => ScanState::FrameComplete,
            _ => ScanState::ExpectAtomLine(0),
        }
    }

    fn read_atom_line(
        &mut self,
        index: usize,
        line_number: usize,
        line: &str,
    ) -> Result<ScanEvent, ParseVenusError> {
        let fields = line
            .split_whitespace()
            .map(parse_float)
            .collect::<Option<Vec<f64>>>()
            .filter(|fields| fields.len() == ATOM_LINE_FIELDS)
            .ok_or_else(|| ParseVenusError::ParseAtomLineErr(line_number, line.to_owned()))?;

        self.state = if Some(index + 1) == self.n_atoms {
            ScanState::FrameComplete
        } else {
            ScanState::ExpectAtomLine(index + 1)
        };

        Ok(ScanEvent::AtomLine {
            index,
            coordinates: [fields[0], fields[1], fields[2]],
            momenta: [fields[3], fields[4], fields[5]],
        })
    }

    fn next_event(&mut self) -> Option<Result<(usize, ScanEvent), ParseVenusError>> {
        loop {
            if self.state == ScanState::FrameComplete {
                self.state = ScanState::ExpectHeader;
                return Some(Ok((self.block_start, ScanEvent::FrameEnd)));
            }

            let (index, line) = match self.lines.next() {
                Some(x) => x,
                None => {
                    return match self.state {
                        ScanState::ExpectHeader => None,
                        _ => Some(Err(ParseVenusError::UnexpectedEnd(self.block_start))),
                    }
                }
            };
            let line_number = index + 1;

            match self.state {
                ScanState::ExpectHeader => {
                    if let Some(result) = self.scan_header(line_number, line) {
                        return Some(result.map(|event| (line_number, event)));
                    }
                }

                ScanState::ExpectMasses { skip: 0 } => {
                    self.state = ScanState::ExpectHeader;
                    let masses = line
                        .split_whitespace()
                        .map(parse_float)
                        .collect::<Option<Vec<f64>>>()
                        .ok_or_else(|| {
                            ParseVenusError::ParseMassesErr(line_number, line.to_owned())
                        });

                    return Some(masses.map(|masses| (line_number, ScanEvent::Masses(masses))));
                }

                ScanState::ExpectMasses { skip } => {
                    self.state = ScanState::ExpectMasses { skip: skip - 1 };
                }

                ScanState::ExpectCycleHeader { skip } => {
                    self.state = if skip > 1 {
                        ScanState::ExpectCycleHeader { skip: skip - 1 }
                    } else {
                        self.first_atom_state()
                    };
                }

                ScanState::ExpectAtomLine(atom) => {
                    return Some(
                        self.read_atom_line(atom, line_number, line)
                            .map(|event| (line_number, event)),
                    );
                }

                ScanState::FrameComplete => unreachable!(
                    "FATAL VENUS_GMX ERROR | VenusScanner::next_event | Completed frame should have been closed."
                ),
            }
        }
    }
}

impl Iterator for VenusScanner<'_> {
    type Item = Result<(usize, ScanEvent), ParseVenusError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = self.next_event();
        match item {
            None | Some(Err(_)) => self.finished = true,
            Some(Ok(_)) => (),
        }

        item
    }
}

/******************************/
/*           PARSER           */
/******************************/

/// Frame for which not all atom lines have been read yet.
#[derive(Debug)]
struct PartialFrame {
    cycle: u64,
    time: f64,
    positions: Vec<Vector3D>,
    velocities: Vec<Vector3D>,
}

/// Parser of VENUS output constructing a [`TrajectorySet`].
///
/// ## Example
/// ```no_run
/// use venus_gmx::prelude::*;
///
/// let reorder = ReorderMap::from_file("reorder.dat").unwrap();
/// let trajectories = VenusParser::new()
///     .with_reorder(&reorder)
///     .parse_file("venus.out")
///     .unwrap();
///
/// println!("Read {} frames.", trajectories.n_frames());
/// ```
#[derive(Default)]
pub struct VenusParser<'a> {
    reorder: Option<&'a ReorderMap>,
    template_atoms: Option<usize>,
    progress: Option<ProgressPrinter>,
}

impl<'a> VenusParser<'a> {
    /// Create a new parser which does not reorder atoms, does not check atom count against
    /// any template and does not print progress.
    pub fn new() -> Self {
        VenusParser::default()
    }

    /// Reorder atoms of every frame using the provided map.
    pub fn with_reorder(mut self, reorder: &'a ReorderMap) -> Self {
        self.reorder = Some(reorder);
        self
    }

    /// Require the number of atoms declared in VENUS output to match the number of atoms in the template.
    pub fn with_template(mut self, template: &GroTemplate) -> Self {
        self.template_atoms = Some(template.n_atoms());
        self
    }

    /// Print parsing progress using the provided printer.
    pub fn with_progress(mut self, printer: ProgressPrinter) -> Self {
        self.progress = Some(printer);
        self
    }

    /// Read and parse a VENUS output file.
    pub fn parse_file(self, filename: impl AsRef<Path>) -> Result<TrajectorySet, ParseVenusError> {
        let path = filename.as_ref();
        if !path.exists() {
            return Err(ParseVenusError::FileNotFound(Box::from(path)));
        }

        let content =
            fs::read_to_string(path).map_err(|_| ParseVenusError::CouldNotRead(Box::from(path)))?;

        self.parse_str(&content)
    }

    /// Parse VENUS output provided as a string.
    pub fn parse_str(self, content: &str) -> Result<TrajectorySet, ParseVenusError> {
        let mut builder = FrameBuilder::new(self.reorder, self.template_atoms, self.progress);

        for item in VenusScanner::new(content) {
            let result = item.and_then(|(line_number, event)| builder.consume(line_number, event));

            if let Err(e) = result {
                builder.finish_progress(ProgressStatus::Failed);
                return Err(e);
            }
        }

        builder.finish_progress(ProgressStatus::Completed);

        let trajectories = builder.trajectories;
        if trajectories.n_frames() == 0 {
            warn!("No frames were found in the VENUS output.");
        }

        Ok(trajectories)
    }
}

/// Consumer of scan events.
struct FrameBuilder<'a> {
    reorder: Option<&'a ReorderMap>,
    template_atoms: Option<usize>,
    progress: Option<ProgressPrinter>,
    n_atoms: Option<usize>,
    /// Masses and the line they were read from.
    masses: Option<(usize, Vec<f64>)>,
    current: Option<PartialFrame>,
    trajectories: TrajectorySet,
}

impl<'a> FrameBuilder<'a> {
    fn new(
        reorder: Option<&'a ReorderMap>,
        template_atoms: Option<usize>,
        progress: Option<ProgressPrinter>,
    ) -> Self {
        FrameBuilder {
            reorder,
            template_atoms,
            progress,
            n_atoms: None,
            masses: None,
            current: None,
            trajectories: TrajectorySet::new(),
        }
    }

    fn consume(&mut self, line_number: usize, event: ScanEvent) -> Result<(), ParseVenusError> {
        match event {
            ScanEvent::AtomCount(n_atoms) => self.set_atom_count(n_atoms),
            ScanEvent::Masses(masses) => self.set_masses(line_number, masses),
            ScanEvent::Trajectory(index) => {
                self.declare_trajectory(index);
                Ok(())
            }
            ScanEvent::CycleStart { cycle, raw_time } => {
                self.start_frame(line_number, cycle, raw_time)
            }
            ScanEvent::AtomLine {
                index,
                coordinates,
                momenta,
            } => {
                self.add_atom(index, coordinates, momenta);
                Ok(())
            }
            ScanEvent::FrameEnd => self.finish_frame(line_number),
        }
    }

    fn set_atom_count(&mut self, n_atoms: usize) -> Result<(), ParseVenusError> {
        if let Some(template) = self.template_atoms {
            if template != n_atoms {
                return Err(ParseVenusError::TemplateMismatch {
                    declared: n_atoms,
                    template,
                });
            }
        }

        if let Some(reorder) = self.reorder {
            if reorder.len() != n_atoms {
                return Err(ParseVenusError::ReorderMismatch {
                    declared: n_atoms,
                    map: reorder.len(),
                });
            }
        }

        if let Some((line, masses)) = &self.masses {
            if masses.len() != n_atoms {
                return Err(ParseVenusError::MassCountMismatch {
                    line: *line,
                    expected: n_atoms,
                    found: masses.len(),
                });
            }
        }

        debug!("Number of atoms: {}", n_atoms);
        self.n_atoms = Some(n_atoms);
        Ok(())
    }

    fn set_masses(&mut self, line_number: usize, masses: Vec<f64>) -> Result<(), ParseVenusError> {
        if let Some(n_atoms) = self.n_atoms {
            if masses.len() != n_atoms {
                return Err(ParseVenusError::MassCountMismatch {
                    line: line_number,
                    expected: n_atoms,
                    found: masses.len(),
                });
            }
        }

        debug!("Masses of {} atoms read from line {}.", masses.len(), line_number);
        self.masses = Some((line_number, masses));
        Ok(())
    }

    fn declare_trajectory(&mut self, index: usize) {
        let previous = self.trajectories.declared_index();

        if self.trajectories.declare_trajectory(index) {
            info!("Trajectory: {}", index);
            return;
        }

        match previous {
            Some(previous) if index < previous => warn!(
                "Trajectory number {} is lower than the previously declared number {}. Frames will be added to trajectory {} of the output.",
                index,
                previous,
                self.trajectories.n_trajectories()
            ),
            _ => (),
        }
    }

    fn start_frame(&mut self, line_number: usize, cycle: u64, raw_time: f64) -> Result<(), ParseVenusError> {
        let n_atoms = self
            .n_atoms
            .ok_or(ParseVenusError::AtomCountUnknown(line_number))?;

        if self.masses.is_none() {
            return Err(ParseVenusError::MassesUnknown(line_number));
        }

        if self.trajectories.is_empty() {
            return Err(ParseVenusError::NoActiveTrajectory(line_number));
        }

        self.current = Some(PartialFrame {
            cycle,
            time: units::time(raw_time),
            positions: Vec::with_capacity(n_atoms),
            velocities: Vec::with_capacity(n_atoms),
        });

        Ok(())
    }

    fn add_atom(&mut self, index: usize, coordinates: [f64; 3], momenta: [f64; 3]) {
        let (frame, masses) = match (self.current.as_mut(), self.masses.as_ref()) {
            (Some(frame), Some((_, masses))) => (frame, masses),
            _ => panic!(
                "FATAL VENUS_GMX ERROR | FrameBuilder::add_atom | Atom line outside of a frame."
            ),
        };

        frame.positions.push(units::position_vector(coordinates));
        frame
            .velocities
            .push(units::velocity_vector(momenta, masses[index]));
    }

    fn finish_frame(&mut self, line_number: usize) -> Result<(), ParseVenusError> {
        let partial = match self.current.take() {
            Some(x) => x,
            None => panic!(
                "FATAL VENUS_GMX ERROR | FrameBuilder::finish_frame | No frame to finish."
            ),
        };

        let (positions, velocities) = match self.reorder {
            Some(map) => (map.permute(&partial.positions), map.permute(&partial.velocities)),
            None => (partial.positions, partial.velocities),
        };

        let trajectory = self
            .trajectories
            .declared_index()
            .ok_or(ParseVenusError::NoActiveTrajectory(line_number))?;

        debug!("Cycle: {} Time: {:.3} ps", partial.cycle, partial.time);

        let frame_number = self.trajectories.n_frames();
        if let Some(printer) = self.progress.as_mut() {
            printer.print(frame_number, trajectory, partial.cycle, partial.time);
        }

        self.trajectories
            .push_frame(Frame::new(
                trajectory,
                partial.cycle,
                partial.time,
                positions,
                velocities,
            ))
            .map_err(|_| ParseVenusError::NoActiveTrajectory(line_number))
    }

    /// Print the final progress message.
    fn finish_progress(&mut self, status: ProgressStatus) {
        let last = self
            .trajectories
            .frames_iter()
            .last()
            .map(|frame| (frame.trajectory_index(), frame.cycle(), frame.time()))
            .unwrap_or((0, 0, 0.0));
        let n_frames = self.trajectories.n_frames();

        if let Some(printer) = self.progress.as_mut() {
            printer.set_status(status);
            printer.print(n_frames, last.0, last.1, last.2);
        }
    }
}

/// Read a VENUS output file with default parser settings.
pub fn read_venus(filename: impl AsRef<Path>) -> Result<TrajectorySet, ParseVenusError> {
    VenusParser::new().parse_file(filename)
}

/******************************/
/*         UNIT TESTS         */
/******************************/
