// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};
use venus_gmx::config::ConvertOptions;
use venus_gmx::convert::convert;
use venus_gmx::errors::ConvertError;

use crate::cli::{Cli, Commands};

fn run(cli: &Cli) -> Result<(), ConvertError> {
    let options = match &cli.command {
        Commands::G96(args) => args.to_options(),
        Commands::Gro(args) => args.to_options(),
        Commands::Config(args) => ConvertOptions::from_yaml_file(&args.file)?,
    };
    debug!("Conversion options: {:?}", options);

    for file in convert(&options)? {
        println!("{}", file.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet);

    info!("venus2gmx v{} starting up.", venus_gmx::VENUS_GMX_VERSION);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Conversion failed ({:?}).", e.category());
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
