// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Complete conversion of VENUS output into GROMACS trajectory files.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ConvertOptions;
use crate::errors::{ConvertError, InputKind};
use crate::files::FileType;
use crate::io::gro_io::read_gro_template;
use crate::io::traj_write::{write_trajectories, OutputFormat};
use crate::io::venus_io::VenusParser;
use crate::progress::ProgressPrinter;
use crate::structures::reorder::ReorderMap;

/// Check that an input file exists.
fn require_input(kind: InputKind, path: &Path) -> Result<(), ConvertError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ConvertError::MissingInput(kind, Box::from(path)))
    }
}

/// Convert VENUS output into g96 or gro trajectory files.
///
/// ## Returns
/// Paths to all written files. Otherwise `ConvertError`.
///
/// ## Example
/// ```no_run
/// use venus_gmx::prelude::*;
///
/// let options = ConvertOptions::new("venus.out", "traj.gro")
///     .with_template("template.gro")
///     .with_reorder("reorder.dat");
///
/// match convert(&options) {
///     Ok(files) => println!("Written {} files.", files.len()),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
///
/// ## Notes
/// - All inputs are read and checked before any output file is backed up or written.
///   If an error occurs, the file system is left untouched.
/// - Existence of all input files is checked before any of them is read.
pub fn convert(options: &ConvertOptions) -> Result<Vec<PathBuf>, ConvertError> {
    let format = options.validate()?;

    require_input(InputKind::Venus, options.venus())?;
    if let Some(path) = options.reorder() {
        require_input(InputKind::Reorder, path)?;
    }
    if format == FileType::GRO {
        if let Some(path) = options.template() {
            require_input(InputKind::Template, path)?;
        }
    }

    let reorder = match options.reorder() {
        Some(path) => Some(
            ReorderMap::from_file(path)
                .map_err(|e| ConvertError::Reorder(Box::from(path.as_path()), e))?,
        ),
        None => None,
    };

    let template = match (format, options.template()) {
        (FileType::GRO, Some(path)) => Some(read_gro_template(path)?),
        _ => None,
    };

    let mut parser = VenusParser::new();
    if let Some(map) = reorder.as_ref() {
        parser = parser.with_reorder(map);
    }
    if let Some(template) = template.as_ref() {
        parser = parser.with_template(template);
    }
    if options.progress() {
        parser = parser.with_progress(ProgressPrinter::new());
    }

    let trajectories = parser
        .parse_file(options.venus())
        .map_err(|e| ConvertError::Venus(Box::from(options.venus().as_path()), e))?;

    info!(
        "Read {} frame(s) in {} trajectory(ies) from '{}'.",
        trajectories.n_frames(),
        trajectories.n_trajectories(),
        options.venus().display()
    );

    let output_format = match template.as_ref() {
        Some(template) => OutputFormat::Gro(template),
        None => OutputFormat::G96,
    };

    Ok(write_trajectories(
        &trajectories,
        output_format,
        options.output(),
        options.split(),
    )?)
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ConfigError, ErrorCategory, ParseVenusError};
    use file_diff::diff_files;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn assert_same_files(result: impl AsRef<Path>, expected: impl AsRef<Path>) {
        let mut result = File::open(result).unwrap();
        let mut expected = File::open(expected).unwrap();
        assert!(diff_files(&mut result, &mut expected));
    }

    #[test]
    fn convert_g96() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("traj.g96");

        let options = ConvertOptions::new("test_files/venus_short.out", &output);
        let files = convert(&options).unwrap();

        assert_eq!(files.len(), 2);
        assert_same_files(&files[0], "test_files/expected_traj_1.g96");
        assert_same_files(&files[1], "test_files/expected_traj_2.g96");
    }

    #[test]
    fn convert_gro_nosplit() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("traj.gro");

        let options = ConvertOptions::new("test_files/venus_short.out", &output)
            .with_template("test_files/template.gro")
            .with_split(false);
        let files = convert(&options).unwrap();

        assert_eq!(files, vec![output.clone()]);
        assert_same_files(&output, "test_files/expected_all.gro");
    }

    #[test]
    fn convert_reordered() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("traj.g96");

        let options = ConvertOptions::new("test_files/venus_short.out", &output)
            .with_reorder("test_files/reorder.dat")
            .with_split(false);
        convert(&options).unwrap();

        assert_same_files(&output, "test_files/expected_reordered.g96");
    }

    #[test]
    fn convert_from_yaml() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("traj.gro");

        let options = ConvertOptions::from_yaml_file("test_files/convert.yaml").unwrap();
        let options = ConvertOptions::new(options.venus(), &output)
            .with_template(options.template().as_ref().unwrap())
            .with_split(options.split());

        let files = convert(&options).unwrap();
        assert_eq!(files, vec![output]);
    }

    #[test]
    fn missing_venus() {
        let dir = TempDir::new().unwrap();
        let options = ConvertOptions::new("test_files/nonexistent.out", dir.path().join("traj.g96"));

        let error = convert(&options).unwrap_err();
        assert_eq!(
            error,
            ConvertError::MissingInput(
                InputKind::Venus,
                Box::from(Path::new("test_files/nonexistent.out"))
            )
        );
        assert_eq!(error.category(), ErrorCategory::MissingInput);
    }

    #[test]
    fn missing_template() {
        let dir = TempDir::new().unwrap();
        let options = ConvertOptions::new("test_files/venus_short.out", dir.path().join("traj.gro"))
            .with_template("test_files/nonexistent.gro");

        assert_eq!(
            convert(&options),
            Err(ConvertError::MissingInput(
                InputKind::Template,
                Box::from(Path::new("test_files/nonexistent.gro"))
            ))
        );
    }

    #[test]
    fn missing_reorder() {
        let dir = TempDir::new().unwrap();
        let options = ConvertOptions::new("test_files/venus_short.out", dir.path().join("traj.g96"))
            .with_reorder("test_files/nonexistent.dat");

        assert_eq!(
            convert(&options),
            Err(ConvertError::MissingInput(
                InputKind::Reorder,
                Box::from(Path::new("test_files/nonexistent.dat"))
            ))
        );
    }

    #[test]
    fn gro_without_template() {
        let options = ConvertOptions::new("test_files/venus_short.out", "traj.gro");
        let error = convert(&options).unwrap_err();

        assert_eq!(error, ConvertError::Config(ConfigError::MissingTemplate));
        assert_eq!(error.category(), ErrorCategory::Config);
    }

    #[test]
    fn template_mismatch_before_any_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("traj.gro");
        let existing = dir.path().join("traj_1.gro");
        fs::write(&existing, "previous").unwrap();

        let options = ConvertOptions::new("test_files/venus_short.out", &output)
            .with_template("test_files/template_4atoms.gro");

        let error = convert(&options).unwrap_err();
        assert_eq!(
            error,
            ConvertError::Venus(
                Box::from(Path::new("test_files/venus_short.out")),
                ParseVenusError::TemplateMismatch {
                    declared: 3,
                    template: 4
                }
            )
        );
        assert_eq!(error.category(), ErrorCategory::SchemaViolation);

        assert_eq!(fs::read_to_string(&existing).unwrap(), "previous");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn invalid_reorder_map() {
        let dir = TempDir::new().unwrap();
        let options = ConvertOptions::new("test_files/venus_short.out", dir.path().join("traj.g96"))
            .with_reorder("test_files/reorder_duplicate.dat");

        let error = convert(&options).unwrap_err();
        assert_eq!(error.category(), ErrorCategory::Permutation);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn reorder_length_mismatch() {
        let dir = TempDir::new().unwrap();
        let options = ConvertOptions::new("test_files/venus_short.out", dir.path().join("traj.g96"))
            .with_reorder("test_files/reorder_short.dat");

        let error = convert(&options).unwrap_err();
        assert_eq!(
            error,
            ConvertError::Venus(
                Box::from(Path::new("test_files/venus_short.out")),
                ParseVenusError::ReorderMismatch {
                    declared: 3,
                    map: 2
                }
            )
        );
        assert_eq!(error.category(), ErrorCategory::SchemaViolation);
    }
}
