use approx::assert_relative_eq;
use chrono::NaiveDate;
use ticker_chart::core::{POPULAR_SYMBOLS, PricePoint, SeriesMetrics, SymbolError, TickerSymbol};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).expect("valid date")
}

#[test]
fn symbol_is_trimmed_and_uppercased() {
    let symbol = TickerSymbol::parse("  aapl ").expect("valid");
    assert_eq!(symbol.as_str(), "AAPL");
    assert_eq!(symbol.to_string(), "AAPL");
    let parsed: TickerSymbol = "msft".parse().expect("valid");
    assert_eq!(String::from(parsed), "MSFT");
}

#[test]
fn symbol_errors_follow_validation_order() {
    assert_eq!(TickerSymbol::parse_optional(None), Err(SymbolError::Required));
    assert_eq!(TickerSymbol::parse("   "), Err(SymbolError::Empty));
    assert_eq!(TickerSymbol::parse("abcdef"), Err(SymbolError::TooLong));
    assert_eq!(TickerSymbol::parse("BRK.B"), Err(SymbolError::NotAlphabetic));
    assert_eq!(TickerSymbol::parse("A1"), Err(SymbolError::NotAlphabetic));
    assert_eq!(
        SymbolError::Empty.to_string(),
        "Symbol cannot be empty"
    );
}

#[test]
fn popular_symbols_are_valid() {
    for raw in POPULAR_SYMBOLS {
        assert_eq!(TickerSymbol::parse(raw).expect("valid").as_str(), raw);
    }
}

#[test]
fn symbol_deserialization_validates() {
    let symbol: TickerSymbol = serde_json::from_str(r#""tsla""#).expect("valid");
    assert_eq!(symbol.as_str(), "TSLA");
    assert!(serde_json::from_str::<TickerSymbol>(r#""toolong""#).is_err());
}

#[test]
fn metrics_summarize_sessions_in_date_order() {
    let mut missing_volume = PricePoint::new(day(2), 98.0, 0);
    missing_volume.volume = None;
    let series = vec![
        PricePoint::new(day(4), 105.0, 3_000).with_ma20(101.0).with_ma50(99.0),
        missing_volume,
        PricePoint::new(day(1), 100.0, 1_000),
        PricePoint::new(day(3), 101.0, 2_000),
    ];

    let metrics = SeriesMetrics::from_series(&series).expect("metrics");
    assert_eq!(metrics.high, Some(105.0));
    assert_eq!(metrics.low, Some(98.0));
    // (3000 + 0 + 1000 + 2000) / 4
    assert_eq!(metrics.average_volume, 1_500);
    assert_eq!(metrics.positive_days, 2);
    assert_eq!(metrics.total_days, 4);
    assert_eq!(metrics.latest_close, Some(105.0));
    assert_eq!(metrics.latest_volume, Some(3_000));
    assert_eq!(metrics.latest_ma20, Some(101.0));
    assert_eq!(metrics.latest_ma50, Some(99.0));

    let change = SeriesMetrics::latest_change_percent(&series).expect("change");
    assert_relative_eq!(change, (105.0 - 101.0) / 101.0 * 100.0, epsilon = 1e-9);
}

#[test]
fn metrics_require_at_least_one_session() {
    assert!(SeriesMetrics::from_series(&[]).is_none());
    assert!(SeriesMetrics::latest_change_percent(&[PricePoint::new(day(1), 1.0, 1)]).is_none());
}
