// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Implementation of ProgressPrinter structure for printing the progress of VENUS output parsing.

use colored::{ColoredString, Colorize};
use std::io::Write;
use tracing::debug;

/// Progress of parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressStatus {
    /// Parsing is in progress.
    Running,
    /// VENUS output has been read completely.
    Completed,
    /// Parsing failed.
    Failed,
}

/// String that can be used inside `ProgressPrinter`.
#[derive(Debug, Clone, PartialEq)]
struct ProgressMessage {
    msg: ColoredString,
}

impl ProgressMessage {
    /// Create new `ProgressMessage`.
    ///
    /// ## Panics
    /// Panics if the string is longer than 9 characters.
    fn new(string: ColoredString) -> Self {
        if string.chars().count() > 9 {
            panic!("FATAL VENUS_GMX ERROR | ProgressMessage::new | `ProgressMessage` can not be longer than 9 characters.");
        }

        ProgressMessage { msg: string }
    }

    /// Write formatted `ProgressMessage`.
    fn print(&self, out: &mut dyn Write, colored: bool) -> std::io::Result<()> {
        if colored {
            write!(out, "[{: ^9}]   ", self.msg)
        } else {
            write!(out, "[{: ^9}]   ", self.msg.as_ref() as &str)
        }
    }
}

/// Structure handling printing of progress of reading a VENUS output.
/// Constructed using `ProgressPrinter::new()` and associated with the parser
/// using `VenusParser::with_progress()`.
pub struct ProgressPrinter {
    /// Stream to write the progress info to.
    output: Box<dyn Write>,
    /// Current status of reading. Default: ProgressStatus::Running.
    status: ProgressStatus,
    /// Frequency of printing. Print every `print_freq`th frame. Default: 1 frame.
    print_freq: usize,
    /// If true, the output will be colored. Default: true.
    colored: bool,
    /// Default: "Traj".bright_blue().
    trajectory_msg: ColoredString,
    /// Default: "Cycle".cyan().
    cycle_msg: ColoredString,
    /// Default: "Time".bright_purple().
    time_msg: ColoredString,
    /// Default: "RUNNING".yellow().
    running_msg: ProgressMessage,
    /// Default: "COMPLETED".green().
    completed_msg: ProgressMessage,
    /// Default: "FAILED!".red().
    failed_msg: ProgressMessage,
    /// String terminating the progress message. Default: `\r` (carriage return).
    terminating: String,
}

impl ProgressPrinter {
    /// Create an instance of `ProgressPrinter` with default parameters.
    ///
    /// Progress is written into `std::io::stdout()` for every frame, colored,
    /// and terminated with a carriage return. Use the `with_%PARAMETER()`
    /// methods to change the defaults.
    ///
    /// ## Example
    /// ```no_run
    /// use venus_gmx::prelude::*;
    ///
    /// let printer = ProgressPrinter::new()
    ///     .with_print_freq(50)
    ///     .with_terminating("\n");
    ///
    /// let trajectories = VenusParser::new()
    ///     .with_progress(printer)
    ///     .parse_file("venus.out")
    ///     .unwrap();
    /// ```
    pub fn new() -> Self {
        ProgressPrinter {
            output: Box::from(std::io::stdout()),
            status: ProgressStatus::Running,
            print_freq: 1,
            colored: true,
            trajectory_msg: "Traj".bright_blue(),
            cycle_msg: "Cycle".cyan(),
            time_msg: "Time".bright_purple(),
            running_msg: ProgressMessage::new("RUNNING".yellow()),
            completed_msg: ProgressMessage::new("COMPLETED".green()),
            failed_msg: ProgressMessage::new("FAILED!".red()),
            terminating: String::from("\r"),
        }
    }

    /// Create new `ProgressPrinter` with specific `output` stream.
    pub fn with_output(mut self, stream: Box<dyn Write>) -> Self {
        self.output = stream;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `print_freq`.
    ///
    /// ## Panics
    /// Panics if `print_freq` is zero.
    pub fn with_print_freq(mut self, print_freq: usize) -> Self {
        if print_freq == 0 {
            panic!("FATAL VENUS_GMX ERROR | ProgressPrinter::with_print_freq | Print frequency can not be zero.");
        }

        self.print_freq = print_freq;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `colored`.
    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Create new `ProgressPrinter` with specific value for `terminating`.
    pub fn with_terminating(mut self, string: &str) -> Self {
        self.terminating = string.to_string();
        self
    }

    /// Set new status to an already constructed `ProgressPrinter`.
    pub fn set_status(&mut self, status: ProgressStatus) {
        self.status = status;
    }

    /// Print progress info about parsing.
    /// Progress is printed every `print_freq`th frame and always when parsing is not running.
    ///
    /// Failure to write into the output stream does not stop parsing. It is only logged.
    pub fn print(&mut self, frame_number: usize, trajectory: usize, cycle: u64, time: f64) {
        if self.status == ProgressStatus::Running && frame_number % self.print_freq != 0 {
            return;
        }

        if let Err(e) = self.write_progress(trajectory, cycle, time) {
            debug!("Could not write progress of frame {}: {}", frame_number, e);
        }
    }

    fn write_progress(&mut self, trajectory: usize, cycle: u64, time: f64) -> std::io::Result<()> {
        match self.status {
            ProgressStatus::Running => self.running_msg.print(&mut self.output, self.colored)?,
            ProgressStatus::Completed => self.completed_msg.print(&mut self.output, self.colored)?,
            ProgressStatus::Failed => self.failed_msg.print(&mut self.output, self.colored)?,
        }

        if self.colored {
            write!(
                self.output,
                "{} {:4} | {} {:12} | {} {:12.3} ps{}",
                self.trajectory_msg,
                trajectory,
                self.cycle_msg,
                cycle,
                self.time_msg,
                time,
                self.terminating
            )?;
        } else {
            write!(
                self.output,
                "{} {:4} | {} {:12} | {} {:12.3} ps{}",
                self.trajectory_msg.as_ref() as &str,
                trajectory,
                self.cycle_msg.as_ref() as &str,
                cycle,
                self.time_msg.as_ref() as &str,
                time,
                self.terminating
            )?;
        }

        match self.status {
            ProgressStatus::Running => (),
            ProgressStatus::Completed | ProgressStatus::Failed => writeln!(self.output)?,
        }

        self.output.flush()
    }
}

impl Default for ProgressPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
