use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::config::{CONSTANT_LIMIT, KERNEL_SIZE_MAX, PreprocessParams};
use crate::filter::{GaussianKernel, gaussian_blur, weighted_sums};
use crate::{SplineError, SplineResult};

/// Value written for foreground pixels of a binary mask.
pub const FOREGROUND: u8 = 255;

/// A single transformation step applied to a grayscale image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskOperation {
    Invert,
    Blur { kernel_size: u32 },
    AdaptiveThreshold { block_size: u32, constant: i32 },
}

impl MaskOperation {
    pub fn apply(&self, input: &GrayImage) -> SplineResult<GrayImage> {
        match self {
            MaskOperation::Invert => Ok(invert(input)),
            MaskOperation::Blur { kernel_size } => Ok(gaussian_blur(input, *kernel_size)),
            MaskOperation::AdaptiveThreshold {
                block_size,
                constant,
            } => adaptive_threshold(input, *block_size, *constant),
        }
    }
}

/// Run a list of operations against the provided source image, returning the transformed image.
pub fn apply_operations(
    source: &GrayImage,
    operations: &[MaskOperation],
) -> SplineResult<GrayImage> {
    let mut current = source.clone();
    for op in operations {
        tracing::debug!(?op, "applying mask operation");
        current = op.apply(&current)?;
    }
    Ok(current)
}

/// Produce the operation sequence for the given preprocessing parameters.
///
/// The adaptive threshold always runs last, so the result is a binary mask.
pub fn operations_from_params(params: &PreprocessParams) -> Vec<MaskOperation> {
    let mut operations = Vec::new();
    if params.invert {
        operations.push(MaskOperation::Invert);
    }
    if params.blur {
        operations.push(MaskOperation::Blur {
            kernel_size: params.blur_kernel(),
        });
    }
    operations.push(MaskOperation::AdaptiveThreshold {
        block_size: params.block_size,
        constant: params.constant,
    });
    operations
}

/// Convert an RGB image to grayscale and run the full preprocessing pipeline.
pub fn binary_mask(rgb: &RgbImage, params: &PreprocessParams) -> SplineResult<GrayImage> {
    let gray = to_grayscale(rgb);
    apply_operations(&gray, &operations_from_params(params))
}

/// BT.601 luminance in 14-bit fixed point, rounded.
fn luminance(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    ((u32::from(r) * 4899 + u32::from(g) * 9617 + u32::from(b) * 1868 + 8192) >> 14) as u8
}

/// Convert an RGB image to single-channel grayscale.
pub fn to_grayscale(rgb: &RgbImage) -> GrayImage {
    let (w, h) = rgb.dimensions();
    let mut gray = GrayImage::new(w, h);
    for (rgb_px, gray_px) in rgb.pixels().zip(gray.pixels_mut()) {
        *gray_px = Luma([luminance(*rgb_px)]);
    }
    gray
}

/// Invert intensities (`255 - v`).
pub fn invert(gray: &GrayImage) -> GrayImage {
    let mut out = gray.clone();
    image::imageops::invert(&mut out);
    out
}

/// Gaussian adaptive threshold.
///
/// A pixel becomes foreground when it is strictly brighter than the Gaussian-weighted mean of
/// its `block_size` x `block_size` neighbourhood minus `constant`. The comparison is carried
/// out on exact fixed-point sums, so the mean is never rounded before thresholding.
///
/// `block_size` must be odd and within `3..=KERNEL_SIZE_MAX`. Constants outside
/// `-255..=255` behave like the nearest bound.
pub fn adaptive_threshold(
    gray: &GrayImage,
    block_size: u32,
    constant: i32,
) -> SplineResult<GrayImage> {
    if !(3..=KERNEL_SIZE_MAX).contains(&block_size) || block_size % 2 == 0 {
        return Err(SplineError::InvalidBlockSize(block_size));
    }

    let kernel = GaussianKernel::new(block_size);
    let sums = weighted_sums(gray, &kernel)?;
    let scale = kernel.scale() as i64;
    let offset = i64::from(constant.clamp(-CONSTANT_LIMIT, CONSTANT_LIMIT)) * scale;

    let (w, h) = gray.dimensions();
    let mut out = GrayImage::new(w, h);
    for ((x, y, out_px), src_px) in out.enumerate_pixels_mut().zip(gray.pixels()) {
        let mean = sums[[y as usize, x as usize]] as i64;
        let value = i64::from(src_px[0]) * scale;
        let v = if value + offset > mean { FOREGROUND } else { 0 };
        *out_px = Luma([v]);
    }
    Ok(out)
}
