// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Implementation of functions for writing g96 trajectories.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::WriteTrajError;
use crate::io::traj_write::TrajWrite;
use crate::structures::{frame::Frame, vector3d::Vector3D};

/// Writer of g96 trajectories with reduced positions and velocities.
///
/// Every frame is a complete g96 structure (`TITLE`, `TIMESTEP`, `POSITIONRED`,
/// `VELOCITYRED`, and `BOX` blocks). The title of every frame is empty.
pub struct G96Writer {
    g96: BufWriter<File>,
    filename: Box<Path>,
}

impl G96Writer {
    /// Create a new g96 file.
    pub fn new(filename: impl AsRef<Path>) -> Result<Self, WriteTrajError> {
        let output = File::create(&filename)
            .map_err(|_| WriteTrajError::CouldNotCreate(Box::from(filename.as_ref())))?;

        Ok(G96Writer {
            g96: BufWriter::new(output),
            filename: Box::from(filename.as_ref()),
        })
    }
}

impl TrajWrite for G96Writer {
    fn write_frame(&mut self, frame: &Frame) -> Result<(), WriteTrajError> {
        write_g96_frame(&mut self.g96, frame)
            .map_err(|_| WriteTrajError::CouldNotWrite(self.filename.clone()))
    }

    fn flush(&mut self) -> Result<(), WriteTrajError> {
        self.g96
            .flush()
            .map_err(|_| WriteTrajError::CouldNotWrite(self.filename.clone()))
    }
}

/// Write a line of three reduced coordinates.
#[inline(always)]
fn write_vector(writer: &mut impl Write, vector: &Vector3D) -> std::io::Result<()> {
    writeln!(writer, "{:15.9}{:15.9}{:15.9}", vector.x, vector.y, vector.z)
}

/// Write a single g96 frame into an open stream.
fn write_g96_frame(writer: &mut impl Write, frame: &Frame) -> std::io::Result<()> {
    writeln!(writer, "TITLE\n\nEND")?;

    writeln!(writer, "TIMESTEP")?;
    writeln!(writer, "{:15}{:15.6}", frame.cycle(), frame.time())?;
    writeln!(writer, "END")?;

    writeln!(writer, "POSITIONRED")?;
    for position in frame.positions() {
        write_vector(writer, position)?;
    }
    writeln!(writer, "END")?;

    writeln!(writer, "VELOCITYRED")?;
    for velocity in frame.velocities() {
        write_vector(writer, velocity)?;
    }
    writeln!(writer, "END")?;

    writeln!(writer, "BOX")?;
    write_vector(writer, frame.simbox())?;
    writeln!(writer, "END")
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use file_diff::diff_files;
    use tempfile::NamedTempFile;

    #[test]
    fn frame_format() {
        let frame = Frame::new(
            1,
            100,
            0.5,
            vec![Vector3D::new(0.1, 0.2, 0.3), Vector3D::new(0.4, 0.5, 0.6)],
            vec![Vector3D::new(0.0, 0.0, 0.0), Vector3D::new(10.0, 0.0, -0.25)],
        );

        let mut output = Vec::new();
        write_g96_frame(&mut output, &frame).unwrap();

        let expected = "\
TITLE

END
TIMESTEP
            100       0.500000
END
POSITIONRED
    0.100000000    0.200000000    0.300000000
    0.400000000    0.500000000    0.600000000
END
VELOCITYRED
    0.000000000    0.000000000    0.000000000
   10.000000000    0.000000000   -0.250000000
END
BOX
    0.000000000    0.000000000    0.000000000
END
";
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn write_matches_expected() {
        let set = crate::io::venus_io::read_venus("test_files/venus_short.out").unwrap();

        let output = NamedTempFile::new().unwrap();
        let path_to_output = output.path();

        let mut writer = G96Writer::new(path_to_output).unwrap();
        for frame in set.get(1).unwrap() {
            writer.write_frame(frame).unwrap();
        }
        writer.flush().unwrap();

        let mut result = File::open(path_to_output).unwrap();
        let mut expected = File::open("test_files/expected_traj_1.g96").unwrap();

        assert!(diff_files(&mut result, &mut expected));
    }

    #[test]
    fn create_in_nonexistent_directory() {
        match G96Writer::new("test_files/nonexistent/traj.g96") {
            Err(WriteTrajError::CouldNotCreate(path)) => assert_eq!(
                path,
                Box::from(Path::new("test_files/nonexistent/traj.g96"))
            ),
            Ok(_) => panic!("Creating should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }
}
