use crate::core::{
    PricePoint, PriceScale, TimeScale, Viewport, project_series_path, sorted_by_date,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{CanvasLayerKind, LinePrimitive, PolylinePrimitive, RenderFrame, Renderer};
use crate::telemetry::measure;
use tracing::debug;

use super::axis_render_frame_builder::{
    AxisRenderContext, append_grid_primitives, append_price_axis_primitives,
    append_time_axis_primitives,
};
use super::legend::{LegendEntry, append_legend_primitives, legend_entries};
use super::tooltip::{TooltipContent, append_tooltip_primitives, tooltip_placement};
use super::{ChartEngine, ChartEngineConfig};

/// Derived state the frame builder reads: the sorted series, both scales and
/// the legend rows fixed when the series was set.
pub(super) struct FrameInputs<'a> {
    pub points: &'a [PricePoint],
    pub time_scale: TimeScale,
    pub price_scale: PriceScale,
    pub legend: &'a [LegendEntry],
    pub hovered: Option<&'a PricePoint>,
}

/// Pure frame construction from one series and container width.
///
/// Equivalent to a freshly mounted engine without hover. Empty series (or a
/// series without a single present value) produce a frame with no primitives.
pub fn build_chart_frame(
    series: &[PricePoint],
    container_width: u32,
    config: &ChartEngineConfig,
) -> ChartResult<RenderFrame> {
    let viewport = chart_viewport(container_width, config)?;
    let points = sorted_by_date(series);
    let plot_width = config.plot_width(container_width);
    let Some(time_scale) = TimeScale::from_series(&points, plot_width)? else {
        return Ok(RenderFrame::new(viewport));
    };
    let Some(price_scale) =
        PriceScale::from_series(&points, config.plot_height(), config.price_padding)?
    else {
        return Ok(RenderFrame::new(viewport));
    };
    let legend = legend_entries(&points, &config.series);

    let inputs = FrameInputs {
        points: &points,
        time_scale,
        price_scale,
        legend: &legend,
        hovered: None,
    };
    Ok(compose_frame(viewport, &inputs, config))
}

pub(super) fn chart_viewport(container_width: u32, config: &ChartEngineConfig) -> ChartResult<Viewport> {
    // Config validation guarantees a finite positive height.
    let height = config.chart_height.round().max(1.0) as u32;
    let viewport = Viewport::new(container_width, height);
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(viewport)
}

/// Paints grid, axes, series, legend and (when hovering) the guideline and
/// tooltip, in that order.
pub(super) fn compose_frame(
    viewport: Viewport,
    inputs: &FrameInputs<'_>,
    config: &ChartEngineConfig,
) -> RenderFrame {
    let mut frame = RenderFrame::new(viewport);
    let axis_ctx = AxisRenderContext::new(config, inputs.time_scale, inputs.price_scale);

    append_grid_primitives(&mut frame, axis_ctx, inputs.price_scale);
    append_time_axis_primitives(&mut frame, axis_ctx, inputs.time_scale);
    append_price_axis_primitives(&mut frame, axis_ctx, inputs.price_scale);
    append_series_primitives(&mut frame, inputs, config);
    append_legend_primitives(&mut frame, inputs.legend, config, inputs.time_scale.width());

    if let Some(point) = inputs.hovered {
        append_guideline_primitive(&mut frame, point, inputs, config);
        let placement = tooltip_placement(point, inputs.time_scale, inputs.price_scale, config);
        append_tooltip_primitives(&mut frame, &TooltipContent::for_point(point), placement, config);
    }
    frame
}

fn append_series_primitives(
    frame: &mut RenderFrame,
    inputs: &FrameInputs<'_>,
    config: &ChartEngineConfig,
) {
    let (dx, dy) = (config.margins.left, config.margins.top);
    for entry in inputs.legend {
        let path = project_series_path(
            inputs.points,
            entry.kind,
            inputs.time_scale,
            inputs.price_scale,
        );
        if !path.is_drawable() {
            continue;
        }
        let style = config.series.for_kind(entry.kind);
        frame.push_polyline(
            CanvasLayerKind::Series,
            PolylinePrimitive::new(
                path.vertices.iter().map(|(x, y)| (x + dx, y + dy)).collect(),
                style.stroke_width,
                style.color,
                style.stroke_style,
            ),
        );
    }
}

fn append_guideline_primitive(
    frame: &mut RenderFrame,
    point: &PricePoint,
    inputs: &FrameInputs<'_>,
    config: &ChartEngineConfig,
) {
    let guideline = config.guideline;
    let x = config.margins.left + inputs.time_scale.date_to_pixel(point.date);
    let top = config.margins.top;
    frame.push_line(
        CanvasLayerKind::Crosshair,
        LinePrimitive::new(
            x,
            top,
            x,
            top + inputs.price_scale.height(),
            guideline.width,
            guideline.color.with_alpha(guideline.color.alpha * guideline.opacity),
        ),
    );
}

impl<R: Renderer> ChartEngine<R> {
    /// Materializes backend-agnostic primitives for the current state.
    ///
    /// Building is idempotent: the same series, width and hover selection
    /// always yield an identical frame.
    pub fn build_render_frame(&mut self) -> ChartResult<RenderFrame> {
        let viewport = chart_viewport(self.container_width, &self.config)?;
        let (Some(time_scale), Some(price_scale)) = (self.time_scale, self.price_scale) else {
            return Ok(RenderFrame::new(viewport));
        };

        let hover = self.interaction.hover();
        let hovered = hover
            .point_index
            .filter(|_| hover.visible)
            .and_then(|index| self.points.get(index));
        let inputs = FrameInputs {
            points: &self.points,
            time_scale,
            price_scale,
            legend: &self.legend,
            hovered,
        };
        let config = &self.config;
        Ok(measure(
            "build_render_frame",
            self.timing_hook.as_mut(),
            || compose_frame(viewport, &inputs, config),
        ))
    }

    /// Builds the current frame and hands it to the renderer.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        let renderer = &mut self.renderer;
        measure("render", self.timing_hook.as_mut(), || {
            renderer.render(&frame)
        })?;
        debug!(
            series = frame.polylines().count(),
            texts = frame.texts().count(),
            "chart rendered"
        );
        Ok(())
    }

    /// Paints the current frame on a host-owned Cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: crate::render::CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        let renderer = &mut self.renderer;
        measure("render_on_cairo_context", self.timing_hook.as_mut(), || {
            renderer.render_on_cairo_context(context, &frame)
        })?;
        debug!(series = frame.polylines().count(), "chart rendered on cairo context");
        Ok(())
    }
}
