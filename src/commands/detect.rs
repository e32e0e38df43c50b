use splinegen::{SplineError, SplineResult};

use crate::cli::DetectCommand;

use super::utils::build_generator;

/// The main function to run the detect command.
pub fn run(cmd: DetectCommand) -> SplineResult<()> {
    let mut generator = build_generator(&cmd.preprocess);
    let count = generator.load_image(&cmd.input)?.len();
    println!("Current Contours Detected: {count}");

    match generator.largest_contour() {
        Ok(largest) => println!(
            "Largest contour: {} points, area {:.1}",
            largest.len(),
            largest.area()
        ),
        Err(SplineError::NoContours) => {}
        Err(err) => return Err(err),
    }
    Ok(())
}
