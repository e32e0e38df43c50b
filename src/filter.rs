use image::{GrayImage, ImageBuffer, Luma};
use imageproc::filter::separable_filter_equal;
use ndarray::Array2;

use crate::SplineResult;
use crate::config::{KERNEL_SIZE_MAX, odd_kernel_size};

/// Fixed-point scale of sampled kernel weights.
const KERNEL_SCALE: f64 = 65536.0;

/// Integer kernels used for sizes 1, 3, 5 and 7 when sigma is derived from the size.
const SMALL_KERNELS: [&[u32]; 4] = [
    &[1],
    &[1, 2, 1],
    &[1, 4, 6, 4, 1],
    &[2, 7, 14, 18, 14, 7, 2],
];

/// Sigma derived from a kernel size when none is given explicitly.
pub fn auto_sigma(size: u32) -> f64 {
    0.3 * ((f64::from(size) - 1.0) * 0.5 - 1.0) + 0.8
}

/// A 1D Gaussian kernel with positive integer weights.
///
/// The kernel is applied separably, so a 2D weighted sum is expressed in units of
/// `total()^2` (see [`GaussianKernel::scale`]). Keeping the weights integral makes
/// the sums exact: a uniform neighbourhood of value `v` always sums to `v * scale`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaussianKernel {
    weights: Vec<u32>,
    total: u32,
}

impl GaussianKernel {
    /// Build the kernel for `size`, rounded up to odd and capped at [`KERNEL_SIZE_MAX`].
    pub fn new(size: u32) -> Self {
        let size = odd_kernel_size(size.min(KERNEL_SIZE_MAX));
        let weights = match SMALL_KERNELS.get((size / 2) as usize) {
            Some(table) => table.to_vec(),
            None => sampled_weights(size),
        };
        let total = weights.iter().sum();
        Self { weights, total }
    }

    pub fn size(&self) -> usize {
        self.weights.len()
    }

    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Divisor turning a 2D weighted sum back into an intensity.
    pub fn scale(&self) -> u64 {
        u64::from(self.total) * u64::from(self.total)
    }

    /// Weights divided by their total, summing to 1.
    pub fn normalized(&self) -> Vec<f32> {
        let total = self.total as f32;
        self.weights.iter().map(|&w| w as f32 / total).collect()
    }
}

fn sampled_weights(size: u32) -> Vec<u32> {
    let sigma = auto_sigma(size);
    let radius = i64::from(size / 2);
    let denom = 2.0 * sigma * sigma;
    let raw: Vec<f64> = (-radius..=radius)
        .map(|d| (-((d * d) as f64) / denom).exp())
        .collect();
    let sum: f64 = raw.iter().sum();
    // tails must keep a non-zero weight
    raw.iter()
        .map(|g| ((g / sum * KERNEL_SCALE).round() as u32).max(1))
        .collect()
}

/// Map a possibly out-of-range coordinate onto `0..len` by clamping to the edge.
fn replicate(i: i64, len: usize) -> usize {
    i.clamp(0, len as i64 - 1) as usize
}

/// Exact separable weighted sums of `kernel` around every pixel, indexed `[y, x]`.
///
/// Samples outside the image repeat the nearest edge pixel.
pub fn weighted_sums(image: &GrayImage, kernel: &GaussianKernel) -> SplineResult<Array2<u64>> {
    let (w, h) = image.dimensions();
    let (w, h) = (w as usize, h as usize);
    let raw = image.as_raw();
    let r = kernel.radius() as i64;

    let mut horizontal = Vec::with_capacity(w * h);
    for row in raw.chunks_exact(w.max(1)).take(h) {
        for x in 0..w {
            let acc: u64 = kernel
                .weights()
                .iter()
                .enumerate()
                .map(|(k, &weight)| {
                    let sx = replicate(x as i64 + k as i64 - r, w);
                    u64::from(weight) * u64::from(row[sx])
                })
                .sum();
            horizontal.push(acc);
        }
    }
    let horizontal = Array2::from_shape_vec((h, w), horizontal)?;

    let mut sums = Array2::<u64>::zeros((h, w));
    for ((y, x), out) in sums.indexed_iter_mut() {
        *out = kernel
            .weights()
            .iter()
            .enumerate()
            .map(|(k, &weight)| {
                let sy = replicate(y as i64 + k as i64 - r, h);
                u64::from(weight) * horizontal[[sy, x]]
            })
            .sum();
    }
    Ok(sums)
}

/// Gaussian blur with a square kernel of `kernel_size` (rounded up to odd) and auto sigma.
///
/// Filtering runs in `f32` and the result is rounded back to 8 bits.
pub fn gaussian_blur(image: &GrayImage, kernel_size: u32) -> GrayImage {
    let kernel = GaussianKernel::new(kernel_size);
    if kernel.size() == 1 {
        return image.clone();
    }

    let (w, h) = image.dimensions();
    let input: ImageBuffer<Luma<f32>, Vec<f32>> =
        ImageBuffer::from_fn(w, h, |x, y| Luma([f32::from(image.get_pixel(x, y)[0])]));
    let blurred = separable_filter_equal(&input, &kernel.normalized());
    GrayImage::from_fn(w, h, |x, y| {
        Luma([blurred.get_pixel(x, y)[0].round().clamp(0.0, 255.0) as u8])
    })
}
