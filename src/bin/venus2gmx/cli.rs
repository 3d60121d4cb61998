// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use venus_gmx::config::ConvertOptions;
use venus_gmx::files::FileType;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Convert trajectories from VENUS96 output into Gromacs g96 or gro files with coordinates and velocities."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert VENUS96 output into g96 file(s).
    G96(G96Args),
    /// Convert VENUS96 output into gro file(s) using a template gro file.
    Gro(GroArgs),
    /// Convert VENUS96 output using options from a YAML file.
    Config(ConfigArgs),
}

/// Arguments shared by the `g96` and `gro` subcommands.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// VENUS96 output file
    #[arg(short = 'i', long, required = true, value_name = "PATH")]
    pub venus: PathBuf,

    /// Reorder map: whitespace-separated 1-based atom indices
    #[arg(short, long, value_name = "PATH")]
    pub reorder: Option<PathBuf>,

    /// Write all trajectories into a single file
    #[arg(long)]
    pub no_split: bool,

    /// Print progress of reading the VENUS96 output
    #[arg(short, long)]
    pub progress: bool,
}

#[derive(Args, Debug)]
pub struct G96Args {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output g96 file (trajectories are written into <stem>_<n>.g96 unless --no-split is used)
    #[arg(short, long, default_value = "traj.g96", value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct GroArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Template gro file providing atom names, residue names, and box dimensions
    #[arg(short, long, required = true, value_name = "PATH")]
    pub gro: PathBuf,

    /// Output gro file (trajectories are written into <stem>_<n>.gro unless --no-split is used)
    #[arg(short, long, default_value = "traj.gro", value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// YAML file with conversion options
    #[arg(value_name = "PATH")]
    pub file: PathBuf,
}

impl CommonArgs {
    fn apply(&self, options: ConvertOptions) -> ConvertOptions {
        let options = options
            .with_split(!self.no_split)
            .with_progress(self.progress);

        match &self.reorder {
            Some(path) => options.with_reorder(path),
            None => options,
        }
    }
}

impl G96Args {
    /// Convert the arguments into conversion options.
    pub fn to_options(&self) -> ConvertOptions {
        self.common.apply(
            ConvertOptions::new(&self.common.venus, &self.output).with_format(FileType::G96),
        )
    }
}

impl GroArgs {
    /// Convert the arguments into conversion options.
    pub fn to_options(&self) -> ConvertOptions {
        self.common.apply(
            ConvertOptions::new(&self.common.venus, &self.output)
                .with_format(FileType::GRO)
                .with_template(&self.gro),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_g96() {
        let cli = Cli::parse_from(["venus2gmx", "-v", "g96", "-i", "venus.out", "--no-split"]);
        assert_eq!(cli.verbose, 1);

        match cli.command {
            Commands::G96(args) => {
                let options = args.to_options();
                assert_eq!(options.venus(), Path::new("venus.out"));
                assert_eq!(options.output(), Path::new("traj.g96"));
                assert_eq!(options.format(), Some(FileType::G96));
                assert!(!options.split());
                assert_eq!(options.reorder(), &None);
            }
            _ => panic!("Incorrect subcommand parsed."),
        }
    }

    #[test]
    fn parse_gro() {
        let cli = Cli::parse_from([
            "venus2gmx",
            "gro",
            "--venus",
            "venus.out",
            "--gro",
            "template.gro",
            "-o",
            "out.gro",
            "-r",
            "map.dat",
            "-q",
        ]);
        assert!(cli.quiet);

        match cli.command {
            Commands::Gro(args) => {
                let options = args.to_options();
                assert_eq!(options.output(), Path::new("out.gro"));
                assert_eq!(options.template(), &Some(PathBuf::from("template.gro")));
                assert_eq!(options.reorder(), &Some(PathBuf::from("map.dat")));
                assert!(options.split());
                assert_eq!(options.validate(), Ok(FileType::GRO));
            }
            _ => panic!("Incorrect subcommand parsed."),
        }
    }

    #[test]
    fn gro_requires_template() {
        assert!(Cli::try_parse_from(["venus2gmx", "gro", "-i", "venus.out"]).is_err());
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["venus2gmx", "-v", "-q", "g96", "-i", "venus.out"]).is_err());
    }
}
