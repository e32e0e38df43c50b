mod detect;
mod export;
mod mask;
mod utils;

use crate::cli::{Cli, Commands};
use splinegen::SplineResult;

/// The main function to run the command based on CLI input.
pub fn run(cli: Cli) -> SplineResult<()> {
    dispatch(cli.command)
}

/// Dispatch the command to the appropriate handler.
fn dispatch(command: Commands) -> SplineResult<()> {
    match command {
        Commands::Detect(cmd) => detect::run(cmd),
        Commands::Mask(cmd) => mask::run(cmd),
        Commands::Export(cmd) => export::run(cmd),
    }
}
