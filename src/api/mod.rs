mod axis_render_frame_builder;
mod engine_config;
mod invalidation;
mod json_contract;
mod label_text_formatter;
mod legend;
mod lifecycle;
mod prediction_card;
mod render_frame_builder;
mod snap_resolver;
mod tooltip;

pub use engine_config::{
    AxisStyle, ChartEngineConfig, GuidelineStyle, LegendLayout, SeriesStyle, SeriesStyles,
    TooltipLayout,
};
pub use invalidation::{InvalidationTopic, InvalidationTopics};
pub use json_contract::{Forecast, PredictionPayload, StockAnalysis, StockRecord, Trend};
pub use label_text_formatter::{
    format_axis_price, format_currency, format_percentage, format_price, format_tooltip_date,
    format_volume,
};
pub use legend::{LegendEntries, LegendEntry, legend_entries};
pub use lifecycle::{HeadlessViewportHost, ListenerId, ResizeEvent, ViewportHost};
pub use prediction_card::{PredictionCard, RecommendationTone};
pub use render_frame_builder::build_chart_frame;
pub use snap_resolver::nearest_point_index;
pub use tooltip::{TooltipContent, TooltipPlacement, TooltipRow, tooltip_placement};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{PricePoint, PriceScale, SeriesKind, TimeScale, sorted_by_date};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HoverState, InteractionState};
use crate::render::Renderer;
use crate::telemetry::TimingHook;

/// Plot-area rectangle in container pixels; pointer tracking is valid inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl HitRegion {
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Price chart component: one date-sorted series drawn as close, ma20 and
/// ma50 lines with axes, legend and hover tooltip.
///
/// State derived from the series (price domain, legend rows) changes only in
/// [`ChartEngine::set_series`]; [`ChartEngine::resize`] restages horizontal
/// geometry and nothing else.
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    config: ChartEngineConfig,
    container_width: u32,
    points: Vec<PricePoint>,
    time_scale: Option<TimeScale>,
    price_scale: Option<PriceScale>,
    legend: LegendEntries,
    interaction: InteractionState,
    invalidation: InvalidationTopics,
    resize_listener: Option<ListenerId>,
    timing_hook: Option<TimingHook>,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig, container_width: u32) -> ChartResult<Self> {
        config.validate()?;
        ensure_container_width(container_width, &config)?;
        Ok(Self {
            renderer,
            config,
            container_width,
            points: Vec::new(),
            time_scale: None,
            price_scale: None,
            legend: LegendEntries::new(),
            interaction: InteractionState::default(),
            invalidation: InvalidationTopics::all(),
            resize_listener: None,
            timing_hook: None,
        })
    }

    /// Replaces the series with a date-sorted copy of `series`.
    ///
    /// Recomputes both scales and legend presence and drops any hover
    /// selection. Absent or non-finite values never fail; a series with no
    /// usable value at all simply renders nothing.
    pub fn set_series(&mut self, series: &[PricePoint]) {
        self.points = sorted_by_date(series);
        let plot_width = self.config.plot_width(self.container_width);

        self.time_scale = TimeScale::from_series(&self.points, plot_width).unwrap_or_else(|err| {
            warn!(error = %err, "time scale unavailable");
            None
        });
        self.price_scale = PriceScale::from_series(
            &self.points,
            self.config.plot_height(),
            self.config.price_padding,
        )
        .unwrap_or_else(|err| {
            warn!(error = %err, "price scale unavailable");
            None
        });
        self.legend = legend_entries(&self.points, &self.config.series);
        self.interaction.reset();
        self.invalidation = self
            .invalidation
            .with(InvalidationTopic::Series)
            .with(InvalidationTopic::Layout)
            .with(InvalidationTopic::Cursor);

        debug!(
            points = self.points.len(),
            has_ma20 = self.legend.iter().any(|e| e.kind == SeriesKind::Ma20),
            has_ma50 = self.legend.iter().any(|e| e.kind == SeriesKind::Ma50),
            price_domain = ?self.price_domain(),
            "series replaced"
        );
    }

    /// Applies a new container width.
    ///
    /// Only the horizontal output range follows; the price domain and legend
    /// rows stay as computed from the series.
    pub fn resize(&mut self, container_width: u32) -> ChartResult<()> {
        ensure_container_width(container_width, &self.config)?;
        if container_width == self.container_width {
            return Ok(());
        }
        self.container_width = container_width;
        if let Some(time_scale) = self.time_scale.as_mut() {
            time_scale.set_width(self.config.plot_width(container_width))?;
        }
        self.invalidation.insert(InvalidationTopic::Layout);
        debug!(container_width, "chart resized");
        Ok(())
    }

    /// Forgets the hover selection entirely.
    pub fn clear_hover(&mut self) {
        if self.interaction.hover().visible {
            self.invalidation.insert(InvalidationTopic::Cursor);
        }
        self.interaction.reset();
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.interaction.hover()
    }

    #[must_use]
    pub fn hit_region(&self) -> HitRegion {
        HitRegion {
            x: self.config.margins.left,
            y: self.config.margins.top,
            width: self.config.plot_width(self.container_width),
            height: self.config.plot_height(),
        }
    }

    /// Padded `[min, max]` of the vertical scale, `None` without usable data.
    #[must_use]
    pub fn price_domain(&self) -> Option<(f64, f64)> {
        self.price_scale.map(PriceScale::domain)
    }

    #[must_use]
    pub fn time_scale(&self) -> Option<TimeScale> {
        self.time_scale
    }

    #[must_use]
    pub fn price_scale(&self) -> Option<PriceScale> {
        self.price_scale
    }

    /// Series in ascending date order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    #[must_use]
    pub fn legend_entries(&self) -> &[LegendEntry] {
        &self.legend
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn container_width(&self) -> u32 {
        self.container_width
    }

    /// Tooltip text for the hovered sample, when one is shown.
    #[must_use]
    pub fn tooltip(&self) -> Option<TooltipContent> {
        self.hovered_point().map(TooltipContent::for_point)
    }

    /// Returns and clears what changed since the previous call.
    pub fn take_invalidation(&mut self) -> InvalidationTopics {
        std::mem::take(&mut self.invalidation)
    }

    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationTopics {
        self.invalidation
    }

    pub fn set_timing_hook(&mut self, hook: Option<TimingHook>) {
        self.timing_hook = hook;
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

fn ensure_container_width(container_width: u32, config: &ChartEngineConfig) -> ChartResult<()> {
    if container_width == 0 {
        return Err(ChartError::InvalidViewport {
            width: container_width,
            height: config.chart_height.round().max(0.0) as u32,
        });
    }
    Ok(())
}
