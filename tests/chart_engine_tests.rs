use approx::assert_relative_eq;
use chrono::NaiveDate;
use ticker_chart::api::{ChartEngine, ChartEngineConfig, InvalidationTopic, build_chart_frame};
use ticker_chart::core::{PricePoint, SeriesKind};
use ticker_chart::render::{CanvasLayerKind, LineStrokeStyle, NullRenderer, RenderFrame};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).expect("valid date")
}

fn engine(width: u32) -> ChartEngine<NullRenderer> {
    ChartEngine::new(NullRenderer::default(), ChartEngineConfig::default(), width)
        .expect("engine init")
}

fn scenario_series() -> Vec<PricePoint> {
    vec![
        PricePoint::new(day(1), 100.0, 1_000),
        PricePoint::new(day(2), 102.0, 1_100).with_ma20(101.0),
    ]
}

fn legend_labels(frame: &RenderFrame) -> Vec<String> {
    frame
        .layer(CanvasLayerKind::Legend)
        .expect("legend layer")
        .texts
        .iter()
        .map(|text| text.text.clone())
        .collect()
}

#[test]
fn two_session_scenario_renders_close_and_legend_only() {
    let mut engine = engine(800);
    engine.set_series(&scenario_series());

    let (min, max) = engine.price_domain().expect("domain");
    assert_relative_eq!(min, 98.0, epsilon = 1e-9);
    assert_relative_eq!(max, 104.04, epsilon = 1e-9);

    let frame = engine.build_render_frame().expect("frame");
    let series = frame.layer(CanvasLayerKind::Series).expect("series layer");
    assert_eq!(series.polylines.len(), 1, "single ma20 sample draws no path");
    let close = &series.polylines[0];
    assert_eq!(close.vertices.len(), 2);
    assert_eq!(close.stroke_width, 2.0);
    assert_eq!(close.stroke_style, LineStrokeStyle::Solid);

    assert_eq!(legend_labels(&frame), vec!["Close Price", "20-Day MA"]);

    engine.render().expect("render");
    let renderer = engine.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_polyline_count, 1);
}

#[test]
fn close_path_is_translated_into_plot_area() {
    let mut engine = engine(800);
    engine.set_series(&scenario_series());
    let frame = engine.build_render_frame().expect("frame");
    let close = &frame.layer(CanvasLayerKind::Series).expect("series").polylines[0];

    // 800 - 50 - 30 = 720 px of plot width, 400 - 20 - 30 = 350 px of height.
    assert_relative_eq!(close.vertices[0].0, 50.0, epsilon = 1e-9);
    assert_relative_eq!(close.vertices[1].0, 770.0, epsilon = 1e-9);
    let expected_y = 20.0 + 350.0 - (100.0 - 98.0) / (104.04 - 98.0) * 350.0;
    assert_relative_eq!(close.vertices[0].1, expected_y, epsilon = 1e-6);
}

#[test]
fn out_of_order_input_is_drawn_in_date_order() {
    let input = vec![
        PricePoint::new(day(3), 103.0, 10),
        PricePoint::new(day(1), 101.0, 10),
        PricePoint::new(day(2), 99.0, 10),
    ];
    let snapshot = input.clone();
    let mut engine = engine(600);
    engine.set_series(&input);

    assert_eq!(input, snapshot, "caller series is not mutated");
    let dates: Vec<_> = engine.points().iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![day(1), day(2), day(3)]);

    let frame = engine.build_render_frame().expect("frame");
    let close = &frame.layer(CanvasLayerKind::Series).expect("series").polylines[0];
    assert!(close.vertices.windows(2).all(|pair| pair[0].0 < pair[1].0));
}

#[test]
fn moving_averages_are_drawn_dashed_through_present_values() {
    let series = vec![
        PricePoint::new(day(1), 100.0, 10).with_ma20(99.0),
        PricePoint::new(day(2), 101.0, 10),
        PricePoint::new(day(3), 102.0, 10).with_ma20(100.0).with_ma50(98.0),
        PricePoint::new(day(4), 103.0, 10).with_ma20(101.0).with_ma50(99.0),
    ];
    let frame = build_chart_frame(&series, 800, &ChartEngineConfig::default()).expect("frame");
    let series_layer = frame.layer(CanvasLayerKind::Series).expect("series");
    assert_eq!(series_layer.polylines.len(), 3);

    let ma20 = &series_layer.polylines[1];
    let ma50 = &series_layer.polylines[2];
    assert_eq!(ma20.vertices.len(), 3, "gap on day 2 is bridged, not zero-filled");
    assert_eq!(ma50.vertices.len(), 2);
    for line in [ma20, ma50] {
        assert_eq!(line.stroke_width, 1.5);
        assert_eq!(line.stroke_style, LineStrokeStyle::Dashed { dash: 5.0, gap: 5.0 });
    }
    assert_eq!(
        legend_labels(&frame),
        vec!["Close Price", "20-Day MA", "50-Day MA"]
    );
}

#[test]
fn legend_rows_stack_from_the_top_right_anchor() {
    let series = vec![
        PricePoint::new(day(1), 100.0, 10).with_ma50(99.0),
        PricePoint::new(day(2), 101.0, 10).with_ma50(99.5),
    ];
    let frame = build_chart_frame(&series, 800, &ChartEngineConfig::default()).expect("frame");
    let legend = frame.layer(CanvasLayerKind::Legend).expect("legend");

    let labels: Vec<_> = legend.texts.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(labels, vec!["Close Price", "50-Day MA"]);
    // Plot right edge is 770; the legend starts 150 px left of it.
    assert_relative_eq!(legend.rects[0].x, 620.0, epsilon = 1e-9);
    assert_relative_eq!(legend.rects[0].y, 20.0 + 10.0 + 9.0, epsilon = 1e-9);
    assert_relative_eq!(legend.rects[1].y - legend.rects[0].y, 20.0, epsilon = 1e-9);
    assert_relative_eq!(legend.texts[0].x, 645.0, epsilon = 1e-9);
}

#[test]
fn axes_and_gridlines_share_price_ticks() {
    let mut engine = engine(800);
    engine.set_series(&scenario_series());
    let frame = engine.build_render_frame().expect("frame");

    let grid = frame.layer(CanvasLayerKind::Grid).expect("grid");
    assert_eq!(grid.lines.len(), 4);
    assert!(grid.lines.iter().all(|line| line.x1 == 50.0 && line.x2 == 770.0));

    let axis = frame.layer(CanvasLayerKind::Axis).expect("axis");
    let labels: Vec<_> = axis.texts.iter().map(|t| t.text.as_str()).collect();
    for price in ["$98", "$100", "$102", "$104"] {
        assert!(labels.contains(&price), "missing {price} in {labels:?}");
    }
    assert!(labels.contains(&"2024"));
    assert!(labels.contains(&"Tue 02"));
    assert!(labels.len() <= 10);
}

#[test]
fn empty_series_renders_nothing_without_error() {
    let mut engine = engine(800);
    engine.set_series(&[]);
    assert_eq!(engine.price_domain(), None);

    let frame = engine.build_render_frame().expect("frame");
    assert!(frame.is_empty());
    engine.render().expect("render");
}

#[test]
fn missing_moving_averages_degrade_gracefully() {
    let mut gap = PricePoint::new(day(2), 0.0, 0);
    gap.close = Some(f64::NAN);
    gap.volume = None;
    gap.ma20 = Some(f64::NAN);
    let mut engine = engine(800);
    engine.set_series(&[PricePoint::new(day(1), 10.0, 1), gap, PricePoint::new(day(3), 12.0, 1)]);

    let kinds: Vec<_> = engine.legend_entries().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![SeriesKind::Close]);
    engine.render().expect("render");
}

#[test]
fn resize_restages_x_geometry_only() {
    let mut engine = engine(800);
    engine.set_series(&scenario_series());
    let domain_before = engine.price_domain();
    let legend_before = engine.legend_entries().to_vec();
    let _ = engine.take_invalidation();

    engine.resize(1_080).expect("resize");
    let topics = engine.take_invalidation();
    assert!(topics.contains(InvalidationTopic::Layout));
    assert!(!topics.contains(InvalidationTopic::Series));

    assert_eq!(engine.price_domain(), domain_before);
    assert_eq!(engine.legend_entries(), legend_before.as_slice());
    assert_eq!(engine.hit_region().width, 1_000.0);

    let frame = engine.build_render_frame().expect("frame");
    let close = &frame.layer(CanvasLayerKind::Series).expect("series").polylines[0];
    assert_relative_eq!(close.vertices[1].0, 1_050.0, epsilon = 1e-9);
    let legend = frame.layer(CanvasLayerKind::Legend).expect("legend");
    assert_relative_eq!(legend.rects[0].x, 900.0, epsilon = 1e-9);
}

#[test]
fn zero_width_is_rejected() {
    assert!(ChartEngine::new(NullRenderer::default(), ChartEngineConfig::default(), 0).is_err());
    let mut engine = engine(800);
    assert!(engine.resize(0).is_err());
    assert_eq!(engine.container_width(), 800);
}

#[test]
fn frame_building_is_idempotent() {
    let mut engine = engine(800);
    engine.set_series(&scenario_series());
    let first = engine.build_render_frame().expect("first");
    let second = engine.build_render_frame().expect("second");
    assert_eq!(first, second);

    let pure = build_chart_frame(&scenario_series(), 800, engine.config()).expect("pure");
    assert_eq!(first, pure);
}

#[test]
fn set_series_invalidates_everything_and_drops_hover() {
    let mut engine = engine(800);
    engine.set_series(&scenario_series());
    assert!(engine.pointer_move(50.0 + 500.0, 100.0));
    let _ = engine.take_invalidation();

    engine.set_series(&scenario_series());
    let pending = engine.pending_invalidation();
    assert!(pending.contains(InvalidationTopic::Series));
    let topics = engine.take_invalidation();
    assert_eq!(topics, pending);
    assert!(topics.requires_full_redraw());
    assert!(topics.contains(InvalidationTopic::Cursor));
    assert!(engine.hovered_point().is_none());
    assert!(engine.take_invalidation().is_empty());
}
