use chrono::NaiveDate;
use ticker_chart::ChartError;
use ticker_chart::api::{PredictionCard, PredictionPayload, RecommendationTone, StockAnalysis, Trend};

const ANALYSIS_JSON: &str = r#"{
  "symbol": "AAPL",
  "data": [
    {"date": "2024-01-03", "open": 101.0, "high": 103.5, "low": 100.2, "close": 103.0, "volume": 1200, "ma_20": 101.5, "ma_50": null},
    {"date": "2024-01-02", "open": 100.0, "high": 102.5, "low": 99.5, "close": 102.0, "volume": 1100, "ma_20": null},
    {"date": "2024-01-01", "close": 100.0, "volume": 1000}
  ],
  "prediction": {
    "current_price": 103.0,
    "predicted_price": 105.06,
    "trend": "bullish",
    "confidence": 64.2,
    "recommendation": "BUY - Strong upward trend detected"
  },
  "meta_data": {"1. Information": "Daily Prices", "2. Symbol": "AAPL"},
  "timestamp": "2024-01-03T16:00:00"
}"#;

#[test]
fn analysis_payload_decodes_into_price_points() {
    let analysis = StockAnalysis::from_json_str(ANALYSIS_JSON).expect("payload");
    assert_eq!(analysis.symbol().expect("symbol").as_str(), "AAPL");
    assert_eq!(analysis.meta_data.len(), 2);
    assert_eq!(analysis.timestamp.as_deref(), Some("2024-01-03T16:00:00"));

    let points = analysis.price_points().expect("points");
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).expect("date"));
    assert_eq!(points[0].ma20, Some(101.5));
    assert_eq!(points[0].ma50, None);
    assert_eq!(points[1].ma20, None);
    assert_eq!(points[2].volume, Some(1_000));
}

#[test]
fn forecast_payload_feeds_the_prediction_card() {
    let analysis = StockAnalysis::from_json_str(ANALYSIS_JSON).expect("payload");
    let forecast = analysis.forecast().expect("forecast");
    assert_eq!(forecast.trend, Trend::Bullish);

    let card = PredictionCard::from_forecast(forecast).expect("card");
    assert_eq!(card.tone, RecommendationTone::Buy);
    assert_eq!(card.expected_change_label(), "+2.06 (2.00%)");
    assert_eq!(card.tone.color().to_hex(), "#4caf50");
}

#[test]
fn prediction_error_object_is_preserved() {
    let analysis = StockAnalysis::from_json_str(
        r#"{"symbol":"MSFT","data":[],"prediction":{"error":"Not enough data for prediction"}}"#,
    )
    .expect("payload");
    assert!(analysis.forecast().is_none());
    assert_eq!(
        analysis.prediction_error(),
        Some("Not enough data for prediction")
    );
    assert!(matches!(
        analysis.prediction,
        Some(PredictionPayload::Unavailable { .. })
    ));
}

#[test]
fn backend_error_detail_is_surfaced() {
    let err = StockAnalysis::from_json_str(r#"{"detail":"Insufficient data for analysis"}"#)
        .expect_err("error body");
    match err {
        ChartError::InvalidData(message) => assert_eq!(message, "Insufficient data for analysis"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_payloads_are_rejected() {
    assert!(matches!(
        StockAnalysis::from_json_str("{not json"),
        Err(ChartError::Json(_))
    ));
    assert!(matches!(
        StockAnalysis::from_json_str(r#"{"data":[]}"#),
        Err(ChartError::Json(_))
    ));

    let bad_date = StockAnalysis::from_json_str(
        r#"{"symbol":"AAPL","data":[{"date":"01/02/2024","close":1.0}]}"#,
    )
    .expect("payload decodes");
    assert!(matches!(
        bad_date.price_points(),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn invalid_symbol_in_payload_is_reported() {
    let analysis =
        StockAnalysis::from_json_str(r#"{"symbol":"TOOLONG","data":[]}"#).expect("payload");
    let err = analysis.symbol().expect_err("too long");
    assert_eq!(
        err.to_string(),
        "invalid ticker symbol: Symbol must be 5 characters or less"
    );
}

#[test]
fn payload_round_trips_through_pretty_json() {
    let analysis = StockAnalysis::from_json_str(ANALYSIS_JSON).expect("payload");
    let json = analysis.to_json_pretty().expect("serialize");
    let restored = StockAnalysis::from_json_str(&json).expect("restore");
    assert_eq!(restored, analysis);
}
