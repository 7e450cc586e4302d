use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::primitives::date_to_unix_seconds;
use crate::core::ticks::{TimeTick, time_ticks};
use crate::core::{LinearScale, PricePoint};
use crate::error::{ChartError, ChartResult};

/// Date axis: `[first date, last date]` mapped onto `[0, plot width]`.
///
/// The domain is fixed by the series; only the output width changes when the
/// host container is resized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    start: NaiveDate,
    end: NaiveDate,
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start: NaiveDate, end: NaiveDate, plot_width: f64) -> ChartResult<Self> {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let linear = LinearScale::new(
            (date_to_unix_seconds(start), date_to_unix_seconds(end)),
            (0.0, validate_width(plot_width)?),
        )?;
        Ok(Self { start, end, linear })
    }

    /// Fits the domain to the date extent of `points`.
    ///
    /// Returns `Ok(None)` for an empty series.
    pub fn from_series(points: &[PricePoint], plot_width: f64) -> ChartResult<Option<Self>> {
        let first = points.iter().map(|point| point.date).min();
        let last = points.iter().map(|point| point.date).max();
        match (first, last) {
            (Some(start), Some(end)) => Self::new(start, end, plot_width).map(Some),
            _ => Ok(None),
        }
    }

    #[must_use]
    pub fn date_extent(self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.linear.range().1
    }

    /// Restages the output range; the date domain is untouched.
    pub fn set_width(&mut self, plot_width: f64) -> ChartResult<()> {
        self.linear.set_range(0.0, validate_width(plot_width)?)
    }

    #[must_use]
    pub fn time_to_pixel(self, time: f64) -> f64 {
        self.linear.map(time)
    }

    #[must_use]
    pub fn date_to_pixel(self, date: NaiveDate) -> f64 {
        self.time_to_pixel(date_to_unix_seconds(date))
    }

    /// Inverts a plot-local x coordinate into unix seconds.
    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    #[must_use]
    pub fn ticks(self, max_count: usize) -> Vec<TimeTick> {
        time_ticks(self.start, self.end, max_count)
    }
}

fn validate_width(plot_width: f64) -> ChartResult<f64> {
    if !plot_width.is_finite() || plot_width < 0.0 {
        return Err(ChartError::InvalidData(
            "plot width must be finite and >= 0".to_owned(),
        ));
    }
    Ok(plot_width)
}
