use image::GrayImage;
use image::imageops::replace;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;

use crate::SplineResult;
use crate::contour::{Contour, ContourSet, simplify_chain};

use super::MaskVectorizer;

/// How traced boundary chains are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainApproximation {
    /// Every boundary pixel.
    None,
    /// Only the end points of straight runs.
    #[default]
    Simple,
}

/// Border-following vectorizer that keeps only the outermost boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalBorderTracer;

impl MaskVectorizer for ExternalBorderTracer {
    type Options = ChainApproximation;
    type Output = ContourSet;

    fn vectorize(&self, mask: &GrayImage, options: &Self::Options) -> SplineResult<Self::Output> {
        Ok(trace_external_contours(mask, *options))
    }
}

/// Trace the outer borders of foreground (non-zero) regions that are not enclosed by any
/// other border. Holes, and regions sitting inside holes, are skipped.
pub fn trace_external_contours(mask: &GrayImage, chain: ChainApproximation) -> ContourSet {
    // border following only starts outer borders after a background pixel on the left,
    // so regions touching the image edge need a background frame
    let (width, height) = mask.dimensions();
    let mut framed = GrayImage::new(width + 2, height + 2);
    replace(&mut framed, mask, 1, 1);

    let contours: Vec<Contour> = find_contours::<i32>(&framed)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter(|c| !c.points.is_empty())
        .map(|c| {
            let points: Vec<Point<i32>> = c
                .points
                .iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect();
            match chain {
                ChainApproximation::None => Contour::new(points),
                ChainApproximation::Simple => Contour::new(simplify_chain(&points)),
            }
        })
        .collect();

    tracing::debug!(count = contours.len(), ?chain, "traced external contours");
    ContourSet::new(contours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn fill_rect(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, value: u8) {
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, Luma([value]));
            }
        }
    }

    fn sorted(points: &[Point<i32>]) -> Vec<(i32, i32)> {
        let mut coords: Vec<(i32, i32)> = points.iter().map(|p| (p.x, p.y)).collect();
        coords.sort();
        coords
    }

    mod unit {
        use super::*;

        #[test]
        fn zero_sized_mask_has_no_contours() {
            let img = GrayImage::new(0, 0);
            assert!(trace_external_contours(&img, ChainApproximation::Simple).is_empty());
        }

        #[test]
        fn whole_image_foreground_is_one_contour() {
            let img = GrayImage::from_pixel(6, 4, Luma([255]));

            let result = trace_external_contours(&img, ChainApproximation::Simple);

            assert_eq!(result.len(), 1);
            assert_eq!(
                sorted(result.as_slice()[0].points()),
                vec![(0, 0), (0, 3), (5, 0), (5, 3)]
            );
        }

        #[test]
        fn region_on_left_edge_is_found() {
            let mut img = GrayImage::new(10, 10);
            fill_rect(&mut img, 0, 3, 4, 7, 255);

            let result = trace_external_contours(&img, ChainApproximation::Simple);

            assert_eq!(result.len(), 1);
            assert_eq!(result.as_slice()[0].points()[0], Point::new(0, 3));
            assert_eq!(
                sorted(result.as_slice()[0].points()),
                vec![(0, 3), (0, 6), (3, 3), (3, 6)]
            );
        }

        #[test]
        fn frame_with_hole_on_edges_is_one_contour() {
            let mut img = GrayImage::from_pixel(12, 12, Luma([255]));
            fill_rect(&mut img, 3, 3, 9, 9, 0);
            fill_rect(&mut img, 5, 5, 7, 7, 255);

            let result = trace_external_contours(&img, ChainApproximation::Simple);

            assert_eq!(result.len(), 1);
            assert_eq!(result.as_slice()[0].points()[0], Point::new(0, 0));
        }

        #[test]
        fn empty_mask_has_no_contours() {
            let img = GrayImage::new(10, 10);
            let result = trace_external_contours(&img, ChainApproximation::Simple);
            assert!(result.is_empty());
        }

        #[test]
        fn filled_rectangle_gives_four_corners() {
            let mut img = GrayImage::new(20, 20);
            fill_rect(&mut img, 5, 5, 15, 15, 255);

            let result = trace_external_contours(&img, ChainApproximation::Simple);

            assert_eq!(result.len(), 1);
            assert_eq!(
                sorted(result.as_slice()[0].points()),
                vec![(5, 5), (5, 14), (14, 5), (14, 14)]
            );
        }

        #[test]
        fn no_approximation_keeps_every_boundary_pixel() {
            let mut img = GrayImage::new(20, 20);
            fill_rect(&mut img, 5, 5, 15, 15, 255);

            let result = trace_external_contours(&img, ChainApproximation::None);

            assert_eq!(result.len(), 1);
            assert_eq!(result.as_slice()[0].len(), 36);
        }

        #[test]
        fn holes_are_not_reported() {
            let mut img = GrayImage::new(30, 30);
            fill_rect(&mut img, 2, 2, 28, 28, 255);
            fill_rect(&mut img, 8, 8, 22, 22, 0);

            let result = trace_external_contours(&img, ChainApproximation::Simple);

            assert_eq!(result.len(), 1);
            assert_eq!(
                sorted(result.as_slice()[0].points()),
                vec![(2, 2), (2, 27), (27, 2), (27, 27)]
            );
        }

        #[test]
        fn regions_inside_holes_are_not_reported() {
            let mut img = GrayImage::new(30, 30);
            fill_rect(&mut img, 2, 2, 28, 28, 255);
            fill_rect(&mut img, 8, 8, 22, 22, 0);
            fill_rect(&mut img, 12, 12, 18, 18, 255);

            let result = trace_external_contours(&img, ChainApproximation::Simple);

            assert_eq!(result.len(), 1);
            assert_eq!(result.as_slice()[0].points()[0], Point::new(2, 2));
        }

        #[test]
        fn separate_regions_in_raster_order() {
            let mut img = GrayImage::new(30, 30);
            fill_rect(&mut img, 20, 3, 25, 8, 255);
            fill_rect(&mut img, 2, 10, 6, 14, 255);

            let result = trace_external_contours(&img, ChainApproximation::Simple);

            assert_eq!(result.len(), 2);
            assert_eq!(result.as_slice()[0].points()[0], Point::new(20, 3));
            assert_eq!(result.as_slice()[1].points()[0], Point::new(2, 10));
        }

        #[test]
        fn single_pixel_region_is_one_point() {
            let mut img = GrayImage::new(5, 5);
            img.put_pixel(2, 2, Luma([255]));

            let result = trace_external_contours(&img, ChainApproximation::Simple);

            assert_eq!(result.len(), 1);
            assert_eq!(result.as_slice()[0].points(), &[Point::new(2, 2)]);
        }

        #[test]
        fn vectorizer_trait_matches_free_function() {
            let mut img = GrayImage::new(12, 12);
            fill_rect(&mut img, 1, 2, 9, 7, 255);

            let via_trait = ExternalBorderTracer
                .vectorize(&img, &ChainApproximation::Simple)
                .unwrap();
            let direct = trace_external_contours(&img, ChainApproximation::Simple);
            assert_eq!(via_trait, direct);
        }
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// trace_external_contours: every reported contour is non-empty and the simple
            /// chain never has more points than the full chain
            #[test]
            fn simple_chain_is_a_subset(
                pixels in proptest::collection::vec(prop_oneof![Just(0u8), Just(255u8)], 64)
            ) {
                let img = GrayImage::from_raw(8, 8, pixels).unwrap();
                let full = trace_external_contours(&img, ChainApproximation::None);
                let simple = trace_external_contours(&img, ChainApproximation::Simple);

                prop_assert_eq!(full.len(), simple.len());
                for (f, s) in full.iter().zip(simple.iter()) {
                    prop_assert!(!s.is_empty());
                    prop_assert!(s.len() <= f.len());
                    prop_assert!(s.points().iter().all(|p| f.points().contains(p)));
                }
            }
        }
    }
}
