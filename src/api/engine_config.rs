use serde::{Deserialize, Serialize};

use crate::core::{Margins, PriceScaleTuning, SeriesKind};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineStrokeStyle};

const CLOSE_COLOR: Color = Color::rgb8(0x34, 0x98, 0xdb);
const MA20_COLOR: Color = Color::rgb8(0xe7, 0x4c, 0x3c);
const MA50_COLOR: Color = Color::rgb8(0x2e, 0xcc, 0x71);
const MUTED_TEXT_COLOR: Color = Color::rgb8(0x7f, 0x8c, 0x8d);
const MA_DASH: LineStrokeStyle = LineStrokeStyle::Dashed {
    dash: 5.0,
    gap: 5.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: Color,
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_style: LineStrokeStyle,
}

impl SeriesStyle {
    fn validate(self, name: &str) -> ChartResult<()> {
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{name} stroke width must be finite and > 0"
            )));
        }
        self.color.validate()
    }
}

/// Per-series line styles in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesStyles {
    pub close: SeriesStyle,
    pub ma20: SeriesStyle,
    pub ma50: SeriesStyle,
}

impl Default for SeriesStyles {
    fn default() -> Self {
        Self {
            close: SeriesStyle {
                color: CLOSE_COLOR,
                stroke_width: 2.0,
                stroke_style: LineStrokeStyle::Solid,
            },
            ma20: SeriesStyle {
                color: MA20_COLOR,
                stroke_width: 1.5,
                stroke_style: MA_DASH,
            },
            ma50: SeriesStyle {
                color: MA50_COLOR,
                stroke_width: 1.5,
                stroke_style: MA_DASH,
            },
        }
    }
}

impl SeriesStyles {
    #[must_use]
    pub fn for_kind(&self, kind: SeriesKind) -> SeriesStyle {
        match kind {
            SeriesKind::Close => self.close,
            SeriesKind::Ma20 => self.ma20,
            SeriesKind::Ma50 => self.ma50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisStyle {
    /// Upper bound on labels per axis.
    pub max_ticks: usize,
    pub tick_size: f64,
    pub tick_padding: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub grid_color: Color,
    pub grid_width: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            max_ticks: 5,
            tick_size: 6.0,
            tick_padding: 3.0,
            font_size_px: 10.0,
            color: Color::rgb(0.0, 0.0, 0.0),
            grid_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            grid_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendLayout {
    /// Distance from the right edge of the plot to the legend's left edge.
    pub offset_from_right: f64,
    pub offset_top: f64,
    pub row_height: f64,
    pub swatch_width: f64,
    pub swatch_height: f64,
    pub swatch_y: f64,
    pub label_x: f64,
    pub label_y: f64,
    pub font_size_px: f64,
    pub text_color: Color,
}

impl Default for LegendLayout {
    fn default() -> Self {
        Self {
            offset_from_right: 150.0,
            offset_top: 10.0,
            row_height: 20.0,
            swatch_width: 15.0,
            swatch_height: 2.0,
            swatch_y: 9.0,
            label_x: 25.0,
            label_y: 10.0,
            font_size_px: 12.0,
            text_color: MUTED_TEXT_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidelineStyle {
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
}

impl Default for GuidelineStyle {
    fn default() -> Self {
        Self {
            color: MUTED_TEXT_COLOR,
            width: 1.0,
            opacity: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipLayout {
    /// Horizontal gap between the hovered point and the tooltip.
    pub offset_x: f64,
    /// Space kept free at the right edge when clamping.
    pub reserved_width: f64,
    /// Space kept free at the bottom edge when clamping.
    pub reserved_height: f64,
    pub box_width: f64,
    pub line_height: f64,
    pub padding: f64,
    pub font_size_px: f64,
    pub background: Color,
    pub border_color: Color,
    pub text_color: Color,
}

impl Default for TooltipLayout {
    fn default() -> Self {
        Self {
            offset_x: 20.0,
            reserved_width: 180.0,
            reserved_height: 100.0,
            box_width: 160.0,
            line_height: 16.0,
            padding: 8.0,
            font_size_px: 12.0,
            background: Color::rgba(1.0, 1.0, 1.0, 0.95),
            border_color: Color::rgb8(0xdd, 0xdd, 0xdd),
            text_color: Color::rgb8(0x2c, 0x3e, 0x50),
        }
    }
}

/// Public engine configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format. Every section falls back to its
/// default when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartEngineConfig {
    /// Total chart height in pixels, margins included.
    pub chart_height: f64,
    pub margins: Margins,
    pub price_padding: PriceScaleTuning,
    pub series: SeriesStyles,
    pub axis: AxisStyle,
    pub legend: LegendLayout,
    pub guideline: GuidelineStyle,
    pub tooltip: TooltipLayout,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self {
            chart_height: 400.0,
            margins: Margins::default(),
            price_padding: PriceScaleTuning::default(),
            series: SeriesStyles::default(),
            axis: AxisStyle::default(),
            legend: LegendLayout::default(),
            guideline: GuidelineStyle::default(),
            tooltip: TooltipLayout::default(),
        }
    }
}

impl ChartEngineConfig {
    #[must_use]
    pub fn with_chart_height(mut self, chart_height: f64) -> Self {
        self.chart_height = chart_height;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_series_styles(mut self, series: SeriesStyles) -> Self {
        self.series = series;
        self
    }

    /// Height of the plot area once vertical margins are removed.
    #[must_use]
    pub fn plot_height(&self) -> f64 {
        (self.chart_height - self.margins.vertical()).max(0.0)
    }

    /// Width of the plot area for a given container width.
    #[must_use]
    pub fn plot_width(&self, container_width: u32) -> f64 {
        (f64::from(container_width) - self.margins.horizontal()).max(0.0)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.chart_height.is_finite() || self.chart_height <= 0.0 {
            return Err(ChartError::InvalidData(
                "chart height must be finite and > 0".to_owned(),
            ));
        }
        let margins = self.margins;
        for (name, value) in [
            ("top", margins.top),
            ("right", margins.right),
            ("bottom", margins.bottom),
            ("left", margins.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{name}` must be finite and >= 0"
                )));
            }
        }
        self.price_padding.validate()?;

        self.series.close.validate("close")?;
        self.series.ma20.validate("ma20")?;
        self.series.ma50.validate("ma50")?;

        let axis = self.axis;
        for (name, value) in [
            ("axis tick size", axis.tick_size),
            ("axis tick padding", axis.tick_padding),
        ] {
            ensure_non_negative(name, value)?;
        }
        ensure_positive("axis font size", axis.font_size_px)?;
        ensure_positive("grid width", axis.grid_width)?;
        axis.color.validate()?;
        axis.grid_color.validate()?;

        let legend = self.legend;
        for (name, value) in [
            ("legend row height", legend.row_height),
            ("legend swatch width", legend.swatch_width),
            ("legend swatch height", legend.swatch_height),
        ] {
            ensure_non_negative(name, value)?;
        }
        for (name, value) in [
            ("legend offset", legend.offset_from_right),
            ("legend top", legend.offset_top),
            ("legend swatch y", legend.swatch_y),
            ("legend label x", legend.label_x),
            ("legend label y", legend.label_y),
        ] {
            ensure_finite(name, value)?;
        }
        ensure_positive("legend font size", legend.font_size_px)?;
        legend.text_color.validate()?;

        ensure_positive("guideline width", self.guideline.width)?;
        if !(0.0..=1.0).contains(&self.guideline.opacity) {
            return Err(ChartError::InvalidData(
                "guideline opacity must be in [0, 1]".to_owned(),
            ));
        }
        self.guideline.color.validate()?;

        let tooltip = self.tooltip;
        ensure_finite("tooltip offset", tooltip.offset_x)?;
        for (name, value) in [
            ("tooltip reserved width", tooltip.reserved_width),
            ("tooltip reserved height", tooltip.reserved_height),
            ("tooltip box width", tooltip.box_width),
            ("tooltip line height", tooltip.line_height),
            ("tooltip padding", tooltip.padding),
        ] {
            ensure_non_negative(name, value)?;
        }
        ensure_positive("tooltip font size", tooltip.font_size_px)?;
        tooltip.background.validate()?;
        tooltip.border_color.validate()?;
        tooltip.text_color.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Json(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Json(format!("failed to serialize chart config: {e}")))
    }
}

fn ensure_finite(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() {
        return Err(ChartError::InvalidData(format!("{name} must be finite")));
    }
    Ok(())
}

fn ensure_non_negative(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn ensure_positive(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}
