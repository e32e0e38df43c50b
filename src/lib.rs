pub mod config;
pub mod contour;
pub mod error;
pub mod filter;
pub mod mask;
pub mod spline;
pub mod store;
pub mod vectorizer;

pub use config::{CsvOptions, PreprocessParams, SliderSettings};
pub use contour::{Contour, ContourSet, select_largest};
pub use error::{SplineError, SplineResult};
pub use spline::{SplinePoint, serialize, spline_points};
pub use store::{ImageStore, RasterImage};
pub use vectorizer::MaskVectorizer;
pub use vectorizer::border::{ChainApproximation, ExternalBorderTracer};

use std::path::Path;

/// Run the full pipeline on `image`: grayscale, optional invert and blur, adaptive
/// threshold, then external border tracing.
///
/// Returns an empty set when nothing is in the foreground.
pub fn extract_contours(
    image: &RasterImage,
    params: &PreprocessParams,
    chain: ChainApproximation,
) -> SplineResult<ContourSet> {
    let mask = image.mask(params)?;
    ExternalBorderTracer.vectorize(&mask, &chain)
}

/// Session object tying a loaded image to the current parameters and the contours they produce.
///
/// Every change of image or parameters re-runs extraction; the last result is cached for
/// selection and export.
#[derive(Debug, Clone, Default)]
pub struct SplineGenerator {
    store: ImageStore,
    params: PreprocessParams,
    chain: ChainApproximation,
    csv: CsvOptions,
    contours: Option<ContourSet>,
}

impl SplineGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preprocessing parameters used for the first extraction.
    pub fn with_params(mut self, params: PreprocessParams) -> Self {
        self.params = params;
        self
    }

    /// Set how traced boundaries are stored.
    pub fn with_chain_approximation(mut self, chain: ChainApproximation) -> Self {
        self.chain = chain;
        self
    }

    /// Set the CSV formatting options used on export.
    pub fn with_csv_options(mut self, csv: CsvOptions) -> Self {
        self.csv = csv;
        self
    }

    pub fn params(&self) -> &PreprocessParams {
        &self.params
    }

    /// The currently loaded image.
    pub fn image(&self) -> SplineResult<&RasterImage> {
        self.store.current()
    }

    /// Contours from the last extraction, if any extraction has run.
    pub fn contours(&self) -> Option<&ContourSet> {
        self.contours.as_ref()
    }

    /// Number of contours from the last extraction, zero before any.
    pub fn contour_count(&self) -> usize {
        self.contours.as_ref().map_or(0, ContourSet::len)
    }

    /// Load an image file and extract its contours with the current parameters.
    ///
    /// On a decode error the previous image and its contours stay current.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> SplineResult<&ContourSet> {
        self.store.load(path)?;
        self.contours = None;
        self.refresh()
    }

    /// Use an already decoded image and extract its contours.
    pub fn set_image(&mut self, image: RasterImage) -> SplineResult<&ContourSet> {
        self.store.replace(image);
        self.contours = None;
        self.refresh()
    }

    /// Change the preprocessing parameters and re-extract.
    ///
    /// The new parameters are kept only if extraction succeeds. Without an image they are
    /// stored for the next load.
    pub fn set_params(&mut self, params: PreprocessParams) -> SplineResult<()> {
        if !self.store.is_loaded() {
            self.params = params;
            return Ok(());
        }
        let contours = extract_contours(self.store.current()?, &params, self.chain)?;
        self.params = params;
        self.contours = Some(contours);
        Ok(())
    }

    /// Re-run extraction on the current image with the current parameters.
    pub fn refresh(&mut self) -> SplineResult<&ContourSet> {
        let image = self.store.current()?;
        let contours = extract_contours(image, &self.params, self.chain)?;
        tracing::info!(
            contours = contours.len(),
            block_size = self.params.block_size,
            constant = self.params.constant,
            "contours detected"
        );
        let contours: &ContourSet = self.contours.insert(contours);
        Ok(contours)
    }

    /// The contour with the largest area from the last extraction.
    pub fn largest_contour(&self) -> SplineResult<&Contour> {
        self.store.current()?;
        match &self.contours {
            Some(contours) => contours.largest(),
            None => Err(SplineError::NoContours),
        }
    }

    /// CSV text for the largest contour.
    pub fn spline_csv(&self) -> SplineResult<String> {
        serialize(self.largest_contour()?, &self.csv)
    }

    /// Write the largest contour's CSV to `path`.
    pub fn export(&self, path: impl AsRef<Path>) -> SplineResult<()> {
        let path = path.as_ref();
        let csv = self.spline_csv()?;
        spline::write_csv(path, &csv)?;
        tracing::info!(path = %path.display(), "spline exported");
        Ok(())
    }
}
