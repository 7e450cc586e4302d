use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{PricePoint, TickerSymbol};
use crate::error::{ChartError, ChartResult};

/// One session as delivered by the analysis backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub date: String,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    /// Backends occasionally emit volume as a float.
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub ma_20: Option<f64>,
    #[serde(default)]
    pub ma_50: Option<f64>,
}

impl StockRecord {
    /// Converts the record into a chart sample.
    ///
    /// Only the date is mandatory; unusable numbers become absent values.
    pub fn to_price_point(&self) -> ChartResult<PricePoint> {
        Ok(PricePoint {
            date: parse_session_date(&self.date)?,
            close: self.close,
            volume: self.volume.and_then(volume_from_f64),
            ma20: self.ma_20,
            ma50: self.ma_50,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
}

impl Trend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
        }
    }
}

/// Five-day outlook computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub current_price: f64,
    pub predicted_price: f64,
    pub trend: Trend,
    /// Percentage in `[0, 100]`.
    pub confidence: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionPayload {
    Forecast(Forecast),
    Unavailable { error: String },
}

/// Full analysis response for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub symbol: String,
    #[serde(default)]
    pub data: Vec<StockRecord>,
    #[serde(default)]
    pub prediction: Option<PredictionPayload>,
    #[serde(default)]
    pub meta_data: IndexMap<String, Value>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl StockAnalysis {
    /// Decodes a backend response body.
    ///
    /// Error bodies of the form `{"detail": "..."}` are surfaced as
    /// [`ChartError::InvalidData`] carrying the backend message.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ChartError::Json(format!("failed to parse analysis payload: {e}")))?;
        if value.get("symbol").is_none() {
            if let Some(detail) = value.get("detail") {
                let message = detail
                    .as_str()
                    .map_or_else(|| detail.to_string(), str::to_owned);
                return Err(ChartError::InvalidData(message));
            }
        }
        serde_json::from_value(value)
            .map_err(|e| ChartError::Json(format!("failed to decode analysis payload: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Json(format!("failed to serialize analysis payload: {e}")))
    }

    pub fn symbol(&self) -> ChartResult<TickerSymbol> {
        Ok(TickerSymbol::parse(&self.symbol)?)
    }

    /// Chart samples in payload order; the chart sorts its own copy.
    pub fn price_points(&self) -> ChartResult<Vec<PricePoint>> {
        self.data.iter().map(StockRecord::to_price_point).collect()
    }

    #[must_use]
    pub fn forecast(&self) -> Option<&Forecast> {
        match &self.prediction {
            Some(PredictionPayload::Forecast(forecast)) => Some(forecast),
            _ => None,
        }
    }

    #[must_use]
    pub fn prediction_error(&self) -> Option<&str> {
        match &self.prediction {
            Some(PredictionPayload::Unavailable { error }) => Some(error),
            _ => None,
        }
    }
}

/// Accepts `YYYY-MM-DD`, ignoring any trailing time component.
fn parse_session_date(raw: &str) -> ChartResult<NaiveDate> {
    let day = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| ChartError::InvalidData(format!("invalid session date `{raw}`: {e}")))
}

fn volume_from_f64(volume: f64) -> Option<u64> {
    if !volume.is_finite() || volume < 0.0 || volume > u64::MAX as f64 {
        return None;
    }
    Some(volume.round() as u64)
}
