use splinegen::SplineError;

pub fn report_error(err: &SplineError) {
    match err {
        SplineError::NoContours => {
            eprintln!("{err}");
            eprintln!();
            eprintln!("Nothing to export. Try adjusting the preprocessing settings:");
            eprintln!("  - Toggle --invert if the shape is lighter than its background");
            eprintln!("  - Raise --block-step (or --block-size) for larger shapes");
            eprintln!("  - Lower --constant-step (or --constant) to pick up faint edges");
        }
        SplineError::ImageDecode { .. } => {
            eprintln!("{err}");
            eprintln!("Supported formats: PNG, JPEG, BMP.");
        }
        _ => {
            eprintln!("{err}");
        }
    }
}
