// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Implementation of functions for reading gro templates and writing gro trajectories.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::auxiliary::{GRO_MAX_COORDINATE, GRO_MIN_COORDINATE};
use crate::errors::{ParseTemplateError, WriteTrajError};
use crate::io::traj_write::TrajWrite;
use crate::structures::{
    frame::Frame,
    template::{GroTemplate, TemplateAtom},
    vector3d::Vector3D,
};

/**************************/
/*   READING GRO TEMPLATE  */
/**************************/

/// Read a gro file and construct a `GroTemplate` from it.
///
/// Only the title, the atom and residue naming, and the box dimensions are used.
/// Positions and velocities of the template atoms are ignored.
///
/// ## Example
/// ```no_run
/// use venus_gmx::prelude::*;
///
/// let template = read_gro_template("template.gro").unwrap();
/// println!("Template `{}` contains {} atoms.", template.title(), template.n_atoms());
/// ```
///
/// ## Notes
/// - Trailing whitespace is removed from the title, residue names and atom names.
///   Leading whitespace is kept so that the names are written back exactly as they were read.
/// - Off-diagonal components of a triclinic box are ignored. Only the first three values of the box line are used.
pub fn read_gro_template(filename: impl AsRef<Path>) -> Result<GroTemplate, ParseTemplateError> {
    let file = match File::open(filename.as_ref()) {
        Ok(x) => x,
        Err(_) => {
            return Err(ParseTemplateError::FileNotFound(Box::from(
                filename.as_ref(),
            )))
        }
    };

    let mut buffer = BufReader::new(file);

    let title = get_title(&mut buffer, filename.as_ref())?;
    let n_atoms = get_natoms(&mut buffer, filename.as_ref())?;

    let mut atoms = Vec::with_capacity(n_atoms);
    for _ in 0..n_atoms {
        let line = read_line(&mut buffer, filename.as_ref())?;
        atoms.push(line_as_template_atom(&line)?);
    }

    let line = read_line(&mut buffer, filename.as_ref())?;
    let simbox = line_as_box(&line)?;

    Ok(GroTemplate::new(&title, atoms, simbox))
}

/// Read the next line in the provided buffer. Newline characters are removed.
fn read_line(
    buffer: &mut BufReader<File>,
    filename: impl AsRef<Path>,
) -> Result<String, ParseTemplateError> {
    let mut line = String::new();
    match buffer.read_line(&mut line) {
        Ok(0) | Err(_) => Err(ParseTemplateError::LineNotFound(Box::from(
            filename.as_ref(),
        ))),
        Ok(_) => Ok(line.trim_end_matches(['\n', '\r']).to_owned()),
    }
}

/// Read the next line in the provided buffer and parse it as a title.
fn get_title(
    buffer: &mut BufReader<File>,
    filename: impl AsRef<Path>,
) -> Result<String, ParseTemplateError> {
    read_line(buffer, filename).map(|title| title.trim_end().to_owned())
}

/// Read the next line in the provided buffer and parse it as the number of atoms.
fn get_natoms(
    buffer: &mut BufReader<File>,
    filename: impl AsRef<Path>,
) -> Result<usize, ParseTemplateError> {
    let line = read_line(buffer, filename)?;
    line.trim()
        .parse::<usize>()
        .map_err(|_| ParseTemplateError::ParseLineErr(line.trim().to_owned()))
}

/// Parse a line as a template atom.
fn line_as_template_atom(line: &str) -> Result<TemplateAtom, ParseTemplateError> {
    let error = || ParseTemplateError::ParseAtomLineErr(line.to_owned());
    let column = |start: usize, end: usize| line.get(start..end).ok_or_else(error);

    let resid = column(0, 5)?
        .trim()
        .parse::<usize>()
        .map_err(|_| error())?;

    let resname = column(5, 10)?.trim_end();
    if resname.is_empty() {
        return Err(error());
    }

    let atomname = column(10, 15)?.trim_end();
    if atomname.is_empty() {
        return Err(error());
    }

    let atomid = column(15, 20)?
        .trim()
        .parse::<usize>()
        .map_err(|_| error())?;

    Ok(TemplateAtom::new(resid, resname, atomname, atomid))
}

/// Parse a line as simulation box dimensions.
fn line_as_box(line: &str) -> Result<Vector3D, ParseTemplateError> {
    let values = line
        .split_whitespace()
        .map(|token| token.parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| ParseTemplateError::ParseBoxLineErr(line.to_owned()))?;

    if values.len() != 3 && values.len() != 9 {
        return Err(ParseTemplateError::ParseBoxLineErr(line.to_owned()));
    }

    if values.iter().skip(3).any(|&x| x != 0.0) {
        warn!(
            "Box of the template is not orthogonal. Only box-x, box-y and box-z will be written."
        );
    }

    Ok(Vector3D::new(values[0], values[1], values[2]))
}

/**************************/
/*       WRITING GRO      */
/**************************/

/// Check that all positions of all frames can be written into a gro file.
///
/// ## Returns
/// `Ok` if all coordinates fit. Otherwise `WriteTrajError::CoordinateTooLarge`
/// identifying the first offending atom (1-based) and the cycle of its frame.
pub fn check_gro_coordinates<'a>(
    frames: impl IntoIterator<Item = &'a Frame>,
) -> Result<(), WriteTrajError> {
    for frame in frames {
        for (i, position) in frame.positions().iter().enumerate() {
            let (min, max) = position.min_max();
            if min < GRO_MIN_COORDINATE || max > GRO_MAX_COORDINATE {
                return Err(WriteTrajError::CoordinateTooLarge {
                    atom: i + 1,
                    cycle: frame.cycle(),
                });
            }
        }
    }

    Ok(())
}

/// Check that the frame contains the same number of atoms as the template.
pub(crate) fn check_template_atoms(template: &GroTemplate, frame: &Frame) -> Result<(), WriteTrajError> {
    if frame.n_atoms() != template.n_atoms() {
        return Err(WriteTrajError::AtomsNumberMismatch {
            cycle: frame.cycle(),
            frame: frame.n_atoms(),
            template: template.n_atoms(),
        });
    }

    Ok(())
}

/// Writer of gro trajectories. Naming of atoms and the box are taken from a `GroTemplate`.
pub struct GroWriter<'a> {
    gro: BufWriter<File>,
    filename: Box<Path>,
    template: &'a GroTemplate,
}

impl<'a> GroWriter<'a> {
    /// Create a new gro file and associate it with a template.
    pub fn new(filename: impl AsRef<Path>, template: &'a GroTemplate) -> Result<Self, WriteTrajError> {
        let output = File::create(&filename)
            .map_err(|_| WriteTrajError::CouldNotCreate(Box::from(filename.as_ref())))?;

        Ok(GroWriter {
            gro: BufWriter::new(output),
            filename: Box::from(filename.as_ref()),
            template,
        })
    }

    fn write_error(&self) -> WriteTrajError {
        WriteTrajError::CouldNotWrite(self.filename.clone())
    }
}

impl TrajWrite for GroWriter<'_> {
    fn write_frame(&mut self, frame: &Frame) -> Result<(), WriteTrajError> {
        check_template_atoms(self.template, frame)?;

        write_gro_frame(&mut self.gro, self.template, frame).map_err(|_| self.write_error())
    }

    fn flush(&mut self) -> Result<(), WriteTrajError> {
        self.gro.flush().map_err(|_| self.write_error())
    }
}

/// Write a single gro frame into an open stream.
fn write_gro_frame(
    writer: &mut impl Write,
    template: &GroTemplate,
    frame: &Frame,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "{} Traj {}, t= {:.4} ps",
        template.title(),
        frame.trajectory_index(),
        frame.time()
    )?;
    writeln!(writer, "{}", template.n_atoms())?;

    for ((atom, pos), vel) in template
        .atoms()
        .iter()
        .zip(frame.positions())
        .zip(frame.velocities())
    {
        writeln!(
            writer,
            "{:>5}{:<5}{:<5}{:>5}{:8.3}{:8.3}{:8.3}{:8.4}{:8.4}{:8.4}",
            atom.residue_number(),
            atom.residue_name(),
            atom.atom_name(),
            atom.atom_number(),
            pos.x,
            pos.y,
            pos.z,
            vel.x,
            vel.y,
            vel.z
        )?;
    }

    let simbox = template.simbox();
    writeln!(writer, "{:10.6}{:10.6}{:10.6}", simbox.x, simbox.y, simbox.z)
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests_read {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn read() {
        let template = read_gro_template("test_files/template.gro").unwrap();

        assert_eq!(template.title(), "Water molecule");
        assert_eq!(template.n_atoms(), 3);

        let atoms = template.atoms();
        assert_eq!(atoms[0], TemplateAtom::new(1, "SOL", "   OW", 1));
        assert_eq!(atoms[1], TemplateAtom::new(1, "SOL", "  HW1", 2));
        assert_eq!(atoms[2], TemplateAtom::new(1, "SOL", "  HW2", 3));

        assert_approx_eq!(f64, template.simbox().x, 3.0);
        assert_approx_eq!(f64, template.simbox().y, 3.5);
        assert_approx_eq!(f64, template.simbox().z, 4.25);
    }

    #[test]
    fn read_triclinic_zero() {
        let template = read_gro_template("test_files/template_9box.gro").unwrap();
        assert_eq!(template.n_atoms(), 3);
        assert_approx_eq!(f64, template.simbox().x, 3.0);
        assert_approx_eq!(f64, template.simbox().z, 4.25);
    }

    #[test]
    fn read_triclinic() {
        let template = read_gro_template("test_files/template_triclinic.gro").unwrap();
        assert_eq!(template.n_atoms(), 3);
        assert_approx_eq!(f64, template.simbox().x, 3.0);
        assert_approx_eq!(f64, template.simbox().y, 3.5);
        assert_approx_eq!(f64, template.simbox().z, 4.25);
    }

    #[test]
    fn box_line_triclinic() {
        let simbox = line_as_box("   3.0   3.5   4.25   0.0   0.0   1.0   0.0   0.5   0.0").unwrap();
        assert_eq!(simbox, Vector3D::new(3.0, 3.5, 4.25));
    }

    #[test]
    fn read_nonexistent() {
        match read_gro_template("test_files/nonexistent.gro") {
            Err(ParseTemplateError::FileNotFound(e)) => {
                assert_eq!(e, Box::from(Path::new("test_files/nonexistent.gro")))
            }
            Ok(_) => panic!("Parsing should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    macro_rules! read_fails {
        ($name:ident, $file:expr, $variant:path) => {
            #[test]
            fn $name() {
                match read_gro_template($file) {
                    Err($variant(_)) => (),
                    Ok(_) => panic!("Parsing should have failed, but it succeeded."),
                    Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
                }
            }
        };
    }

    read_fails!(
        read_missing_box,
        "test_files/template_nobox.gro",
        ParseTemplateError::LineNotFound
    );
    read_fails!(
        read_invalid_atoms,
        "test_files/template_invalid_natoms.gro",
        ParseTemplateError::ParseLineErr
    );
    read_fails!(
        read_invalid_atom_line,
        "test_files/template_invalid_line.gro",
        ParseTemplateError::ParseAtomLineErr
    );

    #[test]
    fn atom_line() {
        let atom = line_as_template_atom("  105LYS     CA 1652   1.234   2.345   3.456").unwrap();
        assert_eq!(atom, TemplateAtom::new(105, "LYS", "   CA", 1652));
    }

    #[test]
    fn atom_line_short() {
        assert_eq!(
            line_as_template_atom("    1SOL     OW"),
            Err(ParseTemplateError::ParseAtomLineErr(
                "    1SOL     OW".to_owned()
            ))
        );
    }

    #[test]
    fn box_line_invalid() {
        assert_eq!(
            line_as_box("   3.0   3.0"),
            Err(ParseTemplateError::ParseBoxLineErr("   3.0   3.0".to_owned()))
        );
        assert_eq!(
            line_as_box("   3.0   x   3.0"),
            Err(ParseTemplateError::ParseBoxLineErr(
                "   3.0   x   3.0".to_owned()
            ))
        );
    }
}
