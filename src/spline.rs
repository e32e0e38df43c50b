use std::fs;
use std::path::Path;

use crate::config::CsvOptions;
use crate::contour::Contour;
use crate::{SplineError, SplineResult};

/// Maximum per-coordinate distance at which the last point counts as already closing the loop.
pub const CLOSE_TOLERANCE: f64 = 1e-6;
/// First line of every exported CSV.
pub const CSV_HEADER: &str = "Index,X,Y,Z";

/// A spline control point. `z` is always 0 for traced contours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplinePoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

fn closes_loop(first: (f64, f64), last: (f64, f64)) -> bool {
    (first.0 - last.0).abs() <= CLOSE_TOLERANCE && (first.1 - last.1).abs() <= CLOSE_TOLERANCE
}

/// Convert a contour into a closed, indexed point sequence.
///
/// The first point is appended when the contour does not already end on it. A single
/// point is treated as open and yields two rows.
pub fn spline_points(contour: &Contour) -> SplineResult<Vec<SplinePoint>> {
    let mut coords: Vec<(f64, f64)> = contour
        .points()
        .iter()
        .map(|p| (f64::from(p.x), f64::from(p.y)))
        .collect();

    let (first, last) = match (coords.first(), coords.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Err(SplineError::EmptyContour),
    };
    if coords.len() < 2 || !closes_loop(first, last) {
        coords.push(first);
    }

    Ok(coords
        .into_iter()
        .enumerate()
        .map(|(index, (x, y))| SplinePoint { index, x, y, z: 0.0 })
        .collect())
}

/// Render points as CSV text, header included, every line newline-terminated.
pub fn to_csv(points: &[SplinePoint], options: &CsvOptions) -> String {
    let prec = options.precision;
    let mut csv = format!("{CSV_HEADER}\n");
    csv.extend(points.iter().map(|p| {
        format!(
            "{},{:.prec$},{:.prec$},{:.prec$}\n",
            p.index, p.x, p.y, p.z
        )
    }));
    csv
}

/// Close the contour and render it as CSV.
pub fn serialize(contour: &Contour, options: &CsvOptions) -> SplineResult<String> {
    let points = spline_points(contour)?;
    tracing::debug!(rows = points.len(), "serialized spline points");
    Ok(to_csv(&points, options))
}

/// Write CSV text to `path`, replacing any existing file.
pub fn write_csv(path: impl AsRef<Path>, csv: &str) -> SplineResult<()> {
    fs::write(path, csv)?;
    Ok(())
}
