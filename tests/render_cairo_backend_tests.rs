#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chrono::NaiveDate;
use ticker_chart::api::{ChartEngine, ChartEngineConfig, build_chart_frame};
use ticker_chart::core::{PricePoint, Viewport};
use ticker_chart::render::{
    CairoContextRenderer, CairoSvgRenderer, CanvasLayerKind, Color, LinePrimitive,
    LineStrokeStyle, PolylinePrimitive, RenderFrame, Renderer,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).expect("valid date")
}

fn series() -> Vec<PricePoint> {
    vec![
        PricePoint::new(day(1), 100.0, 1_000).with_ma20(99.0),
        PricePoint::new(day(2), 102.0, 1_100).with_ma20(101.0),
        PricePoint::new(day(3), 101.0, 1_200).with_ma20(101.5),
    ]
}

#[test]
fn cairo_renderer_writes_svg_document_for_chart() {
    let mut engine = ChartEngine::new(CairoSvgRenderer::new(), ChartEngineConfig::default(), 800)
        .expect("engine init");
    engine.set_series(&series());
    engine.pointer_move(50.0 + 360.0, 100.0);
    engine.render().expect("render");

    let frame = engine.build_render_frame().expect("frame");
    let renderer = engine.into_renderer();
    let stats = renderer.last_stats();
    assert_eq!(stats.paths_drawn, 2);
    assert_eq!(stats.lines_drawn, frame.lines().count());
    assert_eq!(stats.rects_drawn, frame.rects().count());
    assert_eq!(stats.texts_drawn, frame.texts().count());

    let document = renderer.into_document();
    assert!(document.contains("<svg"));
    assert!(document.trim_end().ends_with("</svg>"));
}

#[test]
fn cairo_renderer_rejects_invalid_frames() {
    let mut renderer = CairoSvgRenderer::new();
    let mut frame = RenderFrame::new(Viewport::new(100, 100));
    frame.push_line(
        CanvasLayerKind::Grid,
        LinePrimitive::new(0.0, f64::NAN, 10.0, 10.0, 1.0, Color::rgb(0.0, 0.0, 0.0)),
    );
    assert!(renderer.render(&frame).is_err());
    assert!(renderer.document().is_empty());
    assert!(renderer.set_background(Some(Color::rgba(0.0, 0.0, 0.0, 3.0))).is_err());
}

#[test]
fn dashed_overlay_is_drawn_on_external_context() {
    let mut frame = RenderFrame::new(Viewport::new(200, 100));
    frame.push_polyline(
        CanvasLayerKind::Series,
        PolylinePrimitive::new(
            vec![(0.0, 50.0), (100.0, 20.0), (200.0, 40.0)],
            1.5,
            Color::rgb8(0xe7, 0x4c, 0x3c),
            LineStrokeStyle::Dashed { dash: 5.0, gap: 5.0 },
        ),
    );

    let surface = ImageSurface::create(Format::ARgb32, 200, 100).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = CairoSvgRenderer::new();
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");
    assert_eq!(renderer.last_stats().paths_drawn, 1);
}

#[test]
fn engine_renders_on_host_context() {
    let config = ChartEngineConfig::default();
    let expected = build_chart_frame(&series(), 640, &config).expect("frame");
    let mut engine =
        ChartEngine::new(CairoSvgRenderer::new(), config, 640).expect("engine init");
    engine.set_series(&series());

    let surface = ImageSurface::create(Format::ARgb32, 640, 400).expect("surface");
    let context = Context::new(&surface).expect("context");
    engine.render_on_cairo_context(&context).expect("render on context");

    let stats = engine.renderer().last_stats();
    assert_eq!(stats.lines_drawn, expected.lines().count());
    assert_eq!(stats.texts_drawn, expected.texts().count());
}
