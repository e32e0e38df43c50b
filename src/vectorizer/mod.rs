use image::GrayImage;

use crate::SplineResult;

/// A trait representing an algorithm that can turn a binary mask into a vector representation.
pub trait MaskVectorizer {
    type Options;
    type Output;

    fn vectorize(&self, mask: &GrayImage, options: &Self::Options) -> SplineResult<Self::Output>;
}

pub mod border;
