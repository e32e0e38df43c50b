use splinegen::SplineResult;

use crate::cli::MaskCommand;

use super::utils::{build_generator, derive_variant_path};

/// The main function to run the mask command.
pub fn run(cmd: MaskCommand) -> SplineResult<()> {
    let mut generator = build_generator(&cmd.preprocess);
    generator.load_image(&cmd.input)?;
    let output_path = cmd
        .output
        .clone()
        .unwrap_or_else(|| derive_variant_path(&cmd.input, "mask", "png"));

    let mask = generator.image()?.mask(generator.params())?;
    mask.save(&output_path)?;
    println!("Binary mask PNG saved to {}", output_path.display());

    Ok(())
}
