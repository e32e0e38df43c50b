use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{GrayImage, RgbImage};

use crate::config::PreprocessParams;
use crate::mask::binary_mask;
use crate::{SplineError, SplineResult};

/// A decoded 3-channel raster and the file it came from.
///
/// Cloning shares the pixel buffer.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: Arc<RgbImage>,
    source: Option<PathBuf>,
}

impl RasterImage {
    pub fn new(pixels: RgbImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
            source: None,
        }
    }

    /// Decode an image file. Grayscale and alpha sources are expanded/flattened to RGB.
    pub fn open(path: impl AsRef<Path>) -> SplineResult<Self> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| SplineError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            pixels: Arc::new(decoded.to_rgb8()),
            source: Some(path.to_path_buf()),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Always 3: every source is stored as RGB.
    pub fn channels(&self) -> u8 {
        3
    }

    pub fn pixels(&self) -> &RgbImage {
        self.pixels.as_ref()
    }

    /// Path the image was decoded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Binary mask produced by the preprocessing pipeline.
    pub fn mask(&self, params: &PreprocessParams) -> SplineResult<GrayImage> {
        binary_mask(self.pixels.as_ref(), params)
    }
}

/// Holds the currently loaded image. A new load replaces it wholesale; a failed load
/// leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    current: Option<RasterImage>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `path` and make it the current image.
    pub fn load(&mut self, path: impl AsRef<Path>) -> SplineResult<&RasterImage> {
        let path = path.as_ref();
        let image = match RasterImage::open(path) {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    kept_previous = self.current.is_some(),
                    "image load rejected"
                );
                return Err(err);
            }
        };

        let (width, height) = image.dimensions();
        tracing::info!(path = %path.display(), width, height, "image loaded");
        let image: &RasterImage = self.current.insert(image);
        Ok(image)
    }

    /// Make an already decoded image current.
    pub fn replace(&mut self, image: RasterImage) {
        self.current = Some(image);
    }

    pub fn current(&self) -> SplineResult<&RasterImage> {
        self.current.as_ref().ok_or(SplineError::NoImageLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }
}
