use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{date_to_unix_seconds, present};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Fixed space reserved around the plot area for axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 30.0,
            bottom: 30.0,
            left: 50.0,
        }
    }
}

impl Margins {
    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }
}

/// One trading session: close, volume and the optional moving averages.
///
/// Numeric fields are optional because upstream payloads routinely omit them
/// (moving averages before enough history exists) or carry `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub ma20: Option<f64>,
    #[serde(default)]
    pub ma50: Option<f64>,
}

impl PricePoint {
    #[must_use]
    pub fn new(date: NaiveDate, close: f64, volume: u64) -> Self {
        Self {
            date,
            close: Some(close),
            volume: Some(volume),
            ma20: None,
            ma50: None,
        }
    }

    #[must_use]
    pub fn with_ma20(mut self, ma20: f64) -> Self {
        self.ma20 = Some(ma20);
        self
    }

    #[must_use]
    pub fn with_ma50(mut self, ma50: f64) -> Self {
        self.ma50 = Some(ma50);
        self
    }

    /// Session date as unix seconds at UTC midnight.
    #[must_use]
    pub fn time(&self) -> f64 {
        date_to_unix_seconds(self.date)
    }

    /// Returns the value of `kind` when it is present and finite.
    #[must_use]
    pub fn value(&self, kind: SeriesKind) -> Option<f64> {
        match kind {
            SeriesKind::Close => present(self.close),
            SeriesKind::Ma20 => present(self.ma20),
            SeriesKind::Ma50 => present(self.ma50),
        }
    }
}

/// The three lines a price chart can draw, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    Close,
    Ma20,
    Ma50,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 3] = [SeriesKind::Close, SeriesKind::Ma20, SeriesKind::Ma50];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Close => "Close Price",
            Self::Ma20 => "20-Day MA",
            Self::Ma50 => "50-Day MA",
        }
    }

    /// Close is always drawn; moving averages only when some point has one.
    #[must_use]
    pub const fn is_optional(self) -> bool {
        !matches!(self, Self::Close)
    }
}

/// Returns a copy of `series` sorted ascending by date.
///
/// The sort is stable so duplicate dates keep their input order.
#[must_use]
pub fn sorted_by_date(series: &[PricePoint]) -> Vec<PricePoint> {
    let mut sorted = series.to_vec();
    sorted.sort_by_key(|point| point.date);
    sorted
}
