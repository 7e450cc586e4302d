use crate::core::{PriceScale, TimeScale};
use crate::render::{CanvasLayerKind, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::{AxisStyle, ChartEngineConfig, format_axis_price};

/// Plot placement shared by both axes and the grid.
#[derive(Debug, Clone, Copy)]
pub(super) struct AxisRenderContext {
    pub plot_left: f64,
    pub plot_top: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub style: AxisStyle,
}

impl AxisRenderContext {
    pub(super) fn new(config: &ChartEngineConfig, time_scale: TimeScale, price_scale: PriceScale) -> Self {
        Self {
            plot_left: config.margins.left,
            plot_top: config.margins.top,
            plot_width: time_scale.width(),
            plot_height: price_scale.height(),
            style: config.axis,
        }
    }

    fn plot_bottom(self) -> f64 {
        self.plot_top + self.plot_height
    }
}

/// Horizontal gridlines at the left-axis tick values, across the plot width.
pub(super) fn append_grid_primitives(
    frame: &mut RenderFrame,
    ctx: AxisRenderContext,
    price_scale: PriceScale,
) {
    let style = ctx.style;
    for tick in price_scale.ticks(style.max_ticks) {
        let y = ctx.plot_top + price_scale.price_to_pixel(tick);
        frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(
                ctx.plot_left,
                y,
                ctx.plot_left + ctx.plot_width,
                y,
                style.grid_width,
                style.grid_color,
            ),
        );
    }
}

pub(super) fn append_time_axis_primitives(
    frame: &mut RenderFrame,
    ctx: AxisRenderContext,
    time_scale: TimeScale,
) {
    let style = ctx.style;
    let axis_y = ctx.plot_bottom();
    frame.push_line(
        CanvasLayerKind::Axis,
        LinePrimitive::new(
            ctx.plot_left,
            axis_y,
            ctx.plot_left + ctx.plot_width,
            axis_y,
            1.0,
            style.color,
        ),
    );

    let label_y = axis_y + style.tick_size + style.tick_padding + style.font_size_px;
    for tick in time_scale.ticks(style.max_ticks) {
        let x = ctx.plot_left + time_scale.date_to_pixel(tick.date);
        frame.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(x, axis_y, x, axis_y + style.tick_size, 1.0, style.color),
        );
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                tick.label,
                x,
                label_y,
                style.font_size_px,
                style.color,
                TextHAlign::Center,
            ),
        );
    }
}

pub(super) fn append_price_axis_primitives(
    frame: &mut RenderFrame,
    ctx: AxisRenderContext,
    price_scale: PriceScale,
) {
    let style = ctx.style;
    let axis_x = ctx.plot_left;
    frame.push_line(
        CanvasLayerKind::Axis,
        LinePrimitive::new(axis_x, ctx.plot_top, axis_x, ctx.plot_bottom(), 1.0, style.color),
    );

    let label_x = axis_x - style.tick_size - style.tick_padding;
    for tick in price_scale.ticks(style.max_ticks) {
        let y = ctx.plot_top + price_scale.price_to_pixel(tick);
        frame.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(axis_x - style.tick_size, y, axis_x, y, 1.0, style.color),
        );
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                format_axis_price(tick),
                label_x,
                // Roughly centres the glyphs on the tick.
                y + style.font_size_px * 0.32,
                style.font_size_px,
                style.color,
                TextHAlign::Right,
            ),
        );
    }
}
