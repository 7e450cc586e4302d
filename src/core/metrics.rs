use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{PricePoint, SeriesKind, sorted_by_date};

/// Summary-card statistics over one fetched price window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesMetrics {
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub average_volume: u64,
    pub positive_days: usize,
    pub total_days: usize,
    pub latest_close: Option<f64>,
    pub latest_volume: Option<u64>,
    pub latest_ma20: Option<f64>,
    pub latest_ma50: Option<f64>,
}

impl SeriesMetrics {
    /// Computes the statistics in date order regardless of input order.
    ///
    /// Returns `None` for an empty series.
    #[must_use]
    pub fn from_series(series: &[PricePoint]) -> Option<Self> {
        let sorted = sorted_by_date(series);
        let latest = sorted.last()?;

        let closes = || sorted.iter().filter_map(|p| p.value(SeriesKind::Close));
        let high = closes().map(OrderedFloat).max().map(|v| v.0);
        let low = closes().map(OrderedFloat).min().map(|v| v.0);

        let volume_total: u128 = sorted
            .iter()
            .map(|p| u128::from(p.volume.unwrap_or(0)))
            .sum();
        let average_volume = rounded_average(volume_total, sorted.len());

        let positive_days = sorted
            .windows(2)
            .filter(|pair| {
                matches!(
                    (pair[0].value(SeriesKind::Close), pair[1].value(SeriesKind::Close)),
                    (Some(previous), Some(current)) if current > previous
                )
            })
            .count();

        Some(Self {
            high,
            low,
            average_volume,
            positive_days,
            total_days: sorted.len(),
            latest_close: latest.value(SeriesKind::Close),
            latest_volume: latest.volume,
            latest_ma20: latest.value(SeriesKind::Ma20),
            latest_ma50: latest.value(SeriesKind::Ma50),
        })
    }

    /// Latest session change versus the previous close, in percent.
    #[must_use]
    pub fn latest_change_percent(series: &[PricePoint]) -> Option<f64> {
        let sorted = sorted_by_date(series);
        let [.., previous, latest] = sorted.as_slice() else {
            return None;
        };
        let previous = previous.value(SeriesKind::Close)?;
        let latest = latest.value(SeriesKind::Close)?;
        if previous == 0.0 {
            return None;
        }
        Some((latest - previous) / previous * 100.0)
    }
}

fn rounded_average(total: u128, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    let count = count as u128;
    let average = (total + count / 2) / count;
    u64::try_from(average).unwrap_or(u64::MAX)
}
