use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::ticks::nice_ticks;
use crate::core::{LinearScale, PricePoint, SeriesKind};
use crate::error::{ChartError, ChartResult};

/// Multiplicative slack applied to both ends of the value domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScaleTuning {
    pub lower_factor: f64,
    pub upper_factor: f64,
}

impl Default for PriceScaleTuning {
    fn default() -> Self {
        Self {
            lower_factor: 0.98,
            upper_factor: 1.02,
        }
    }
}

impl PriceScaleTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.lower_factor.is_finite() || !self.upper_factor.is_finite() {
            return Err(ChartError::InvalidData(
                "price scale padding factors must be finite".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Price axis mapped to an inverted Y pixel axis (`[plot height, 0]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    linear: LinearScale,
}

impl PriceScale {
    pub fn new(price_min: f64, price_max: f64, plot_height: f64) -> ChartResult<Self> {
        if !plot_height.is_finite() || plot_height < 0.0 {
            return Err(ChartError::InvalidData(
                "plot height must be finite and >= 0".to_owned(),
            ));
        }
        let linear = LinearScale::new((price_min, price_max), (plot_height, 0.0))?;
        Ok(Self { linear })
    }

    /// Builds the padded domain from every present close, ma20 and ma50 value.
    ///
    /// Returns `Ok(None)` when no point carries a usable value.
    pub fn from_series(
        points: &[PricePoint],
        plot_height: f64,
        tuning: PriceScaleTuning,
    ) -> ChartResult<Option<Self>> {
        let tuning = tuning.validate()?;
        let values = || {
            points.iter().flat_map(|point| {
                SeriesKind::ALL
                    .into_iter()
                    .filter_map(move |kind| point.value(kind))
                    .map(OrderedFloat)
            })
        };

        let (Some(min), Some(max)) = (values().min(), values().max()) else {
            return Ok(None);
        };
        Self::new(
            min.0 * tuning.lower_factor,
            max.0 * tuning.upper_factor,
            plot_height,
        )
        .map(Some)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.linear.range().0
    }

    #[must_use]
    pub fn price_to_pixel(self, price: f64) -> f64 {
        self.linear.map(price)
    }

    #[must_use]
    pub fn pixel_to_price(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    #[must_use]
    pub fn ticks(self, max_count: usize) -> Vec<f64> {
        let (min, max) = self.domain();
        nice_ticks(min, max, max_count)
    }
}
