use imageproc::point::Point;

use crate::{SplineError, SplineResult};

/// A closed polygon boundary in pixel coordinates.
///
/// The last point connects back to the first; the first point is not repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    /// Build a contour from `(x, y)` pairs.
    pub fn from_coords(coords: &[(i32, i32)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    pub fn points(&self) -> &[Point<i32>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed area of the polygon.
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }
}

/// Absolute shoelace area. Zero for fewer than three points.
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: i64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y)
        })
        .sum();
    (twice as f64 / 2.0).abs()
}

/// Pick the contour with the largest enclosed area. On ties the earliest contour wins.
pub fn select_largest(contours: &[Contour]) -> SplineResult<&Contour> {
    let mut iter = contours.iter();
    let first = iter.next().ok_or(SplineError::NoContours)?;
    let (largest, _) = iter.fold((first, first.area()), |(best, best_area), contour| {
        let area = contour.area();
        if area > best_area {
            (contour, area)
        } else {
            (best, best_area)
        }
    });
    Ok(largest)
}

/// Drop points lying inside straight runs of a closed chain.
///
/// A point is kept only when the step arriving at it differs from the step leaving it,
/// wrapping around the end of the chain.
pub fn simplify_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |a: Point<i32>, b: Point<i32>| ((b.x - a.x).signum(), (b.y - a.y).signum());
    let kept: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();

    if kept.is_empty() {
        vec![points[0]]
    } else {
        kept
    }
}

/// The contours found by one extraction run, in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContourSet {
    contours: Vec<Contour>,
}

impl ContourSet {
    pub fn new(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn as_slice(&self) -> &[Contour] {
        &self.contours
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contour> {
        self.contours.iter()
    }

    /// The contour with the largest area, see [`select_largest`].
    pub fn largest(&self) -> SplineResult<&Contour> {
        select_largest(&self.contours)
    }
}

impl<'a> IntoIterator for &'a ContourSet {
    type Item = &'a Contour;
    type IntoIter = std::slice::Iter<'a, Contour>;

    fn into_iter(self) -> Self::IntoIter {
        self.contours.iter()
    }
}
