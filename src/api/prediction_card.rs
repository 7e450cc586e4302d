use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::f64_to_decimal;
use crate::error::ChartResult;
use crate::render::Color;

use super::{Forecast, Trend};

/// Action class derived from the recommendation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationTone {
    Buy,
    Sell,
    Hold,
}

impl RecommendationTone {
    /// `BUY` anywhere in the text wins over `SELL`; anything else holds.
    #[must_use]
    pub fn from_recommendation(text: &str) -> Self {
        if text.contains("BUY") {
            Self::Buy
        } else if text.contains("SELL") {
            Self::Sell
        } else {
            Self::Hold
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Buy => Color::rgb8(0x4c, 0xaf, 0x50),
            Self::Sell => Color::rgb8(0xf4, 0x43, 0x36),
            Self::Hold => Color::rgb8(0xff, 0x98, 0x00),
        }
    }
}

/// Display-ready five-day prediction.
///
/// Money values are held as decimals rounded to cents so the card never shows
/// binary floating point artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionCard {
    pub current_price: Decimal,
    pub predicted_price: Decimal,
    pub expected_change: Decimal,
    /// `None` when the current price is zero.
    pub expected_change_percent: Option<Decimal>,
    pub trend: Trend,
    pub confidence: f64,
    pub recommendation: String,
    pub tone: RecommendationTone,
}

impl PredictionCard {
    pub fn from_forecast(forecast: &Forecast) -> ChartResult<Self> {
        let current = f64_to_decimal(forecast.current_price, "current price")?;
        let predicted = f64_to_decimal(forecast.predicted_price, "predicted price")?;
        let change = predicted - current;
        let change_percent = change
            .checked_div(current)
            .map(|ratio| (ratio * Decimal::ONE_HUNDRED).round_dp(2));

        Ok(Self {
            current_price: current.round_dp(2),
            predicted_price: predicted.round_dp(2),
            expected_change: change.round_dp(2),
            expected_change_percent: change_percent,
            trend: forecast.trend,
            confidence: forecast.confidence,
            recommendation: forecast.recommendation.clone(),
            tone: RecommendationTone::from_recommendation(&forecast.recommendation),
        })
    }

    #[must_use]
    pub fn is_gain(&self) -> bool {
        !self.expected_change.is_sign_negative()
    }

    /// e.g. `+2.50 (1.25%)`.
    #[must_use]
    pub fn expected_change_label(&self) -> String {
        let sign = if self.is_gain() { "+" } else { "" };
        let percent = self
            .expected_change_percent
            .map_or_else(|| "N/A".to_owned(), |p| format!("{p:.2}%"));
        format!("{sign}{:.2} ({percent})", self.expected_change)
    }

    #[must_use]
    pub fn trend_label(&self) -> String {
        self.trend.as_str().to_uppercase()
    }

    #[must_use]
    pub fn confidence_label(&self) -> String {
        format!("{}%", self.confidence)
    }
}
