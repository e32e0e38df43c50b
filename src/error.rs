use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with [`SplineError`].
pub type SplineResult<T> = std::result::Result<T, SplineError>;

/// Error types that can occur while turning an image into spline points.
///
/// Every variant is recoverable: callers are expected to surface it to the user
/// and let them pick another file or adjust the preprocessing settings.
#[derive(Debug, Error)]
pub enum SplineError {
    /// The selected file could not be read or decoded as an image.
    #[error("Could not read image file {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },
    /// Image encoding error (saving a mask).
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),
    /// File system I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Internal buffer shape mismatch.
    #[error("Invalid buffer shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
    /// Extraction or export was requested before any image was loaded.
    #[error("No image loaded")]
    NoImageLoaded,
    /// No contour was detected, so there is nothing to export.
    #[error("No contours were detected in the image")]
    NoContours,
    /// A contour without points reached the serializer.
    #[error("Contour has no points")]
    EmptyContour,
    /// Adaptive threshold block size must be odd and within `3..=KERNEL_SIZE_MAX`.
    #[error(
        "Invalid adaptive block size {0}: expected an odd value from 3 to {max}",
        max = crate::config::KERNEL_SIZE_MAX
    )]
    InvalidBlockSize(u32),
}
