use approx::assert_relative_eq;
use chrono::NaiveDate;
use ticker_chart::core::{
    LinearScale, PricePoint, PriceScale, PriceScaleTuning, TimeScale, nice_ticks, time_ticks,
};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn linear_scale_round_trip_within_tolerance() {
    let scale = LinearScale::new((10.0, 110.0), (0.0, 1000.0)).expect("valid scale");

    let original = 42.5;
    let px = scale.map(original);
    assert_relative_eq!(px, 325.0, epsilon = 1e-9);
    assert!((scale.invert(px) - original).abs() <= 1e-9);
}

#[test]
fn linear_scale_rejects_non_finite_bounds() {
    assert!(LinearScale::new((f64::NAN, 1.0), (0.0, 1.0)).is_err());
    assert!(LinearScale::new((0.0, 1.0), (0.0, f64::INFINITY)).is_err());
}

#[test]
fn collapsed_domain_maps_to_range_midpoint() {
    let scale = LinearScale::new((5.0, 5.0), (0.0, 200.0)).expect("valid scale");
    assert_eq!(scale.map(5.0), 100.0);
    assert_eq!(scale.map(1_000.0), 100.0);
}

#[test]
fn price_scale_is_inverted() {
    let scale = PriceScale::new(100.0, 200.0, 350.0).expect("valid scale");
    assert_eq!(scale.price_to_pixel(100.0), 350.0);
    assert_eq!(scale.price_to_pixel(200.0), 0.0);
    assert!(scale.price_to_pixel(180.0) < scale.price_to_pixel(120.0));
    assert_relative_eq!(scale.pixel_to_price(175.0), 150.0, epsilon = 1e-9);
}

#[test]
fn price_scale_domain_spans_every_present_series() {
    let points = vec![
        PricePoint::new(day(2024, 1, 1), 100.0, 1_000).with_ma50(90.0),
        PricePoint::new(day(2024, 1, 2), 102.0, 1_100).with_ma20(110.0),
    ];
    let scale = PriceScale::from_series(&points, 350.0, PriceScaleTuning::default())
        .expect("scale")
        .expect("domain");

    let (min, max) = scale.domain();
    assert_relative_eq!(min, 90.0 * 0.98, epsilon = 1e-9);
    assert_relative_eq!(max, 110.0 * 1.02, epsilon = 1e-9);
}

#[test]
fn price_scale_ignores_absent_and_nan_values() {
    let mut gap = PricePoint::new(day(2024, 1, 2), 0.0, 0);
    gap.close = Some(f64::NAN);
    gap.ma20 = Some(f64::INFINITY);
    let points = vec![PricePoint::new(day(2024, 1, 1), 50.0, 10), gap];

    let scale = PriceScale::from_series(&points, 100.0, PriceScaleTuning::default())
        .expect("scale")
        .expect("domain");
    let (min, max) = scale.domain();
    assert_relative_eq!(min, 49.0, epsilon = 1e-9);
    assert_relative_eq!(max, 51.0, epsilon = 1e-9);
}

#[test]
fn price_scale_without_values_is_undefined() {
    let mut point = PricePoint::new(day(2024, 1, 1), 0.0, 0);
    point.close = None;
    let scale = PriceScale::from_series(&[point], 100.0, PriceScaleTuning::default())
        .expect("no error for missing values");
    assert!(scale.is_none());
    assert!(
        PriceScale::from_series(&[], 100.0, PriceScaleTuning::default())
            .expect("empty series")
            .is_none()
    );
}

#[test]
fn price_tuning_rejects_non_finite_padding() {
    let tuning = PriceScaleTuning {
        lower_factor: f64::NAN,
        upper_factor: 1.02,
    };
    assert!(tuning.validate().is_err());
}

#[test]
fn time_scale_maps_extent_onto_plot_width() {
    let scale = TimeScale::new(day(2024, 1, 1), day(2024, 1, 11), 500.0).expect("scale");
    assert_eq!(scale.date_to_pixel(day(2024, 1, 1)), 0.0);
    assert_eq!(scale.date_to_pixel(day(2024, 1, 11)), 500.0);
    assert_relative_eq!(scale.date_to_pixel(day(2024, 1, 6)), 250.0, epsilon = 1e-9);
}

#[test]
fn time_scale_resize_keeps_domain() {
    let mut scale = TimeScale::new(day(2024, 1, 1), day(2024, 1, 11), 500.0).expect("scale");
    scale.set_width(1_000.0).expect("resize");

    assert_eq!(scale.date_extent(), (day(2024, 1, 1), day(2024, 1, 11)));
    assert_eq!(scale.width(), 1_000.0);
    assert_relative_eq!(scale.date_to_pixel(day(2024, 1, 6)), 500.0, epsilon = 1e-9);
    assert!(scale.set_width(-1.0).is_err());
}

#[test]
fn time_scale_from_series_uses_min_and_max_dates() {
    let points = vec![
        PricePoint::new(day(2024, 3, 5), 1.0, 1),
        PricePoint::new(day(2024, 3, 1), 1.0, 1),
        PricePoint::new(day(2024, 3, 3), 1.0, 1),
    ];
    let scale = TimeScale::from_series(&points, 100.0)
        .expect("scale")
        .expect("non-empty");
    assert_eq!(scale.date_extent(), (day(2024, 3, 1), day(2024, 3, 5)));
    assert!(TimeScale::from_series(&[], 100.0).expect("empty").is_none());
}

#[test]
fn nice_ticks_never_exceed_requested_count() {
    assert_eq!(nice_ticks(98.0, 104.04, 5), vec![98.0, 100.0, 102.0, 104.0]);
    for (start, stop) in [(0.0, 1.0), (1.0, 1_000_000.0), (0.013, 0.017), (-5.0, 5.0)] {
        let ticks = nice_ticks(start, stop, 5);
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= 5, "{start}..{stop} gave {ticks:?}");
        assert!(ticks.iter().all(|t| *t >= start && *t <= stop));
    }
}

#[test]
fn time_ticks_pick_calendar_aligned_dates() {
    let ticks = time_ticks(day(2024, 1, 1), day(2024, 1, 31), 5);
    let dates: Vec<_> = ticks.iter().map(|t| t.date).collect();
    assert_eq!(
        dates,
        vec![day(2024, 1, 7), day(2024, 1, 14), day(2024, 1, 21), day(2024, 1, 28)]
    );
    assert_eq!(ticks[0].label, "Jan 07");
}

#[test]
fn long_ranges_fall_back_to_year_ticks() {
    let ticks = time_ticks(day(2000, 6, 1), day(2024, 6, 1), 5);
    assert!(!ticks.is_empty());
    assert!(ticks.len() <= 5);
    let years: Vec<_> = ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(years, vec!["2005", "2010", "2015", "2020"]);
}
