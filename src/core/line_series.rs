use serde::{Deserialize, Serialize};

use crate::core::{PricePoint, PriceScale, SeriesKind, TimeScale};

/// Projected line segment in plot-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Vertices of one series, in date order, restricted to present samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePath {
    pub kind: SeriesKind,
    pub vertices: Vec<(f64, f64)>,
}

impl LinePath {
    /// A single vertex cannot form a visible segment.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.vertices.len() >= 2
    }

    #[must_use]
    pub fn segments(&self) -> Vec<LineSegment> {
        self.vertices
            .windows(2)
            .map(|pair| LineSegment {
                x1: pair[0].0,
                y1: pair[0].1,
                x2: pair[1].0,
                y2: pair[1].1,
            })
            .collect()
    }
}

/// Projects one series of date-sorted points into plot pixels.
///
/// Points whose value for `kind` is absent are skipped, so gaps are bridged by
/// the neighbouring present samples instead of dropping to zero.
#[must_use]
pub fn project_series_path(
    points: &[PricePoint],
    kind: SeriesKind,
    time_scale: TimeScale,
    price_scale: PriceScale,
) -> LinePath {
    let vertices = points
        .iter()
        .filter_map(|point| {
            point.value(kind).map(|value| {
                (
                    time_scale.time_to_pixel(point.time()),
                    price_scale.price_to_pixel(value),
                )
            })
        })
        .collect();
    LinePath { kind, vertices }
}

/// Whether at least one point carries a value for `kind`.
#[must_use]
pub fn series_has_values(points: &[PricePoint], kind: SeriesKind) -> bool {
    points.iter().any(|point| point.value(kind).is_some())
}
