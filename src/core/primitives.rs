use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn f64_to_decimal(value: f64, field_name: &str) -> ChartResult<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as decimal"))
    })
}

#[must_use]
pub fn date_to_unix_seconds(date: NaiveDate) -> f64 {
    date.and_hms_opt(0, 0, 0)
        .map_or(0.0, |time| time.and_utc().timestamp() as f64)
}

/// Filters out absent and non-finite samples.
#[must_use]
pub fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
