use std::fs;
use std::path::PathBuf;

use ticker_chart::api::{HeadlessViewportHost, PredictionCard, StockAnalysis};
use ticker_chart::core::{PricePoint, SeriesMetrics};
use ticker_chart::render::{Renderer, SvgRenderer};
use ticker_chart::{ChartEngine, ChartEngineConfig};

const DEFAULT_WIDTH: u32 = 800;

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    width: u32,
    output: Option<PathBuf>,
    hover_x: Option<f64>,
    config: Option<PathBuf>,
    cairo: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = ticker_chart::telemetry::init_default_tracing();
    let args = parse_args()?;

    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let analysis = StockAnalysis::from_json_str(&raw).map_err(|err| err.to_string())?;
    let symbol = analysis.symbol().map_err(|err| err.to_string())?;
    let points = analysis.price_points().map_err(|err| err.to_string())?;

    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            ChartEngineConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => ChartEngineConfig::default(),
    };

    let document = if args.cairo {
        render_with_cairo(config, &args, &points)?
    } else {
        draw_chart(SvgRenderer::new(), config, &args, &points)?
            .into_renderer()
            .into_document()
    };

    print_summary(&symbol.to_string(), &analysis, &points);

    match args.output {
        Some(path) => fs::write(&path, document)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?,
        None => println!("{document}"),
    }
    Ok(())
}

/// Mounts, feeds, optionally hovers and renders one chart, then unmounts.
fn draw_chart<R: Renderer>(
    renderer: R,
    config: ChartEngineConfig,
    args: &CliArgs,
    points: &[PricePoint],
) -> Result<ChartEngine<R>, String> {
    let mut host = HeadlessViewportHost::new(args.width);
    let mut engine =
        ChartEngine::new(renderer, config, args.width).map_err(|err| err.to_string())?;
    engine.mount(&mut host).map_err(|err| err.to_string())?;
    engine.set_series(points);
    if let Some(x) = args.hover_x {
        let y = engine.hit_region().y;
        if !engine.pointer_move(x, y) {
            eprintln!("note: --hover-x {x} does not resolve to a session");
        }
    }
    engine.render().map_err(|err| err.to_string())?;
    engine.unmount(&mut host);
    Ok(engine)
}

#[cfg(feature = "cairo-backend")]
fn render_with_cairo(
    config: ChartEngineConfig,
    args: &CliArgs,
    points: &[PricePoint],
) -> Result<String, String> {
    let renderer = ticker_chart::render::CairoSvgRenderer::new();
    Ok(draw_chart(renderer, config, args, points)?
        .into_renderer()
        .into_document())
}

#[cfg(not(feature = "cairo-backend"))]
fn render_with_cairo(
    _config: ChartEngineConfig,
    _args: &CliArgs,
    _points: &[PricePoint],
) -> Result<String, String> {
    Err("--cairo requires building with the `cairo-backend` feature".to_owned())
}

/// Summary lines go to stderr so stdout stays a clean SVG document.
fn print_summary(symbol: &str, analysis: &StockAnalysis, points: &[PricePoint]) {
    use ticker_chart::api::{format_currency, format_percentage, format_volume};

    eprintln!("{symbol}: {} sessions", points.len());
    if let Some(metrics) = SeriesMetrics::from_series(points) {
        eprintln!(
            "  latest {} ({})  high {}  low {}  avg volume {}  up days {}/{}",
            format_currency(metrics.latest_close),
            format_percentage(SeriesMetrics::latest_change_percent(points)),
            format_currency(metrics.high),
            format_currency(metrics.low),
            format_volume(Some(metrics.average_volume)),
            metrics.positive_days,
            metrics.total_days,
        );
    }
    if let Some(forecast) = analysis.forecast() {
        match PredictionCard::from_forecast(forecast) {
            Ok(card) => eprintln!(
                "  5-day prediction ${}  {}  {}  confidence {}  {}",
                card.predicted_price,
                card.expected_change_label(),
                card.trend_label(),
                card.confidence_label(),
                card.recommendation,
            ),
            Err(err) => eprintln!("  prediction unavailable: {err}"),
        }
    } else if let Some(error) = analysis.prediction_error() {
        eprintln!("  prediction unavailable: {error}");
    }
}

fn usage_message() -> &'static str {
    "usage: render_stock_svg --input <analysis.json> [--width <px>] [--output <file.svg>] [--hover-x <px>] [--config <config.json>] [--cairo]"
}

fn parse_args() -> Result<CliArgs, String> {
    let mut input: Option<PathBuf> = None;
    let mut width = DEFAULT_WIDTH;
    let mut output: Option<PathBuf> = None;
    let mut hover_x: Option<f64> = None;
    let mut config: Option<PathBuf> = None;
    let mut cairo = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--width" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --width".to_owned())?;
                width = value
                    .parse()
                    .map_err(|err| format!("invalid --width `{value}`: {err}"))?;
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--hover-x" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --hover-x".to_owned())?;
                hover_x = Some(
                    value
                        .parse()
                        .map_err(|err| format!("invalid --hover-x `{value}`: {err}"))?,
                );
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--cairo" => cairo = true,
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    let input = input.ok_or_else(|| format!("missing --input\n\n{}", usage_message()))?;
    Ok(CliArgs {
        input,
        width,
        output,
        hover_x,
        config,
        cairo,
    })
}
