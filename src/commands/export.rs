use splinegen::{CsvOptions, SplineResult};

use crate::cli::ExportCommand;

use super::utils::{build_generator, derive_variant_path};

/// The main function to run the export command.
pub fn run(cmd: ExportCommand) -> SplineResult<()> {
    let mut generator = build_generator(&cmd.preprocess)
        .with_csv_options(CsvOptions::default().with_precision(cmd.precision));
    let count = generator.load_image(&cmd.input)?.len();
    let output_path = cmd
        .output
        .clone()
        .unwrap_or_else(|| derive_variant_path(&cmd.input, "spline", "csv"));

    generator.export(&output_path)?;
    println!(
        "Largest of {count} contours saved to {}",
        output_path.display()
    );

    Ok(())
}
