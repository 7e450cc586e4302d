use serde::{Deserialize, Serialize};

use crate::core::{PricePoint, PriceScale, SeriesKind, TimeScale};
use crate::render::{CanvasLayerKind, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::{ChartEngineConfig, format_currency, format_tooltip_date, format_volume};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipRow {
    pub label: String,
    pub value: String,
}

/// Text shown next to the hovered sample.
///
/// Moving-average rows are omitted entirely when the sample has no value;
/// close and volume always appear, falling back to `N/A`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub title: String,
    pub rows: Vec<TooltipRow>,
}

impl TooltipContent {
    #[must_use]
    pub fn for_point(point: &PricePoint) -> Self {
        let mut rows = vec![TooltipRow {
            label: "Close".to_owned(),
            value: format_currency(point.value(SeriesKind::Close)),
        }];
        for kind in [SeriesKind::Ma20, SeriesKind::Ma50] {
            if let Some(value) = point.value(kind) {
                rows.push(TooltipRow {
                    label: kind.label().to_owned(),
                    value: format_currency(Some(value)),
                });
            }
        }
        rows.push(TooltipRow {
            label: "Volume".to_owned(),
            value: format_volume(point.volume),
        });

        Self {
            title: format_tooltip_date(point.date),
            rows,
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rows.len() + 1
    }
}

/// Top-left corner of the tooltip in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pub left: f64,
    pub top: f64,
}

/// Positions the tooltip beside the point, clamped away from the right and
/// bottom edges of the chart.
///
/// The vertical anchor is the close price, then ma20, then ma50; a sample
/// with no value at all anchors to the plot top.
#[must_use]
pub fn tooltip_placement(
    point: &PricePoint,
    time_scale: TimeScale,
    price_scale: PriceScale,
    config: &ChartEngineConfig,
) -> TooltipPlacement {
    let margins = config.margins;
    let layout = config.tooltip;
    let plot_width = time_scale.width();
    let plot_height = price_scale.height();

    let x = time_scale.date_to_pixel(point.date);
    let y = SeriesKind::ALL
        .into_iter()
        .find_map(|kind| point.value(kind))
        .map_or(0.0, |value| price_scale.price_to_pixel(value));

    TooltipPlacement {
        left: (x + margins.left + layout.offset_x)
            .min(plot_width + margins.left - layout.reserved_width),
        top: (y + margins.top).min(plot_height + margins.top - layout.reserved_height),
    }
}

pub(super) fn append_tooltip_primitives(
    frame: &mut RenderFrame,
    content: &TooltipContent,
    placement: TooltipPlacement,
    config: &ChartEngineConfig,
) {
    let layout = config.tooltip;
    let height = content.line_count() as f64 * layout.line_height + 2.0 * layout.padding;
    frame.push_rect(
        CanvasLayerKind::Tooltip,
        RectPrimitive::new(
            placement.left,
            placement.top,
            layout.box_width,
            height,
            layout.background,
        )
        .with_border(1.0, layout.border_color),
    );

    let text_x = placement.left + layout.padding;
    let line_y = |line: usize| {
        placement.top + layout.padding + (line as f64 + 0.5) * layout.line_height
    };
    frame.push_text(
        CanvasLayerKind::Tooltip,
        TextPrimitive::new(
            content.title.clone(),
            text_x,
            line_y(0),
            layout.font_size_px + 1.0,
            layout.text_color,
            TextHAlign::Left,
        ),
    );
    for (index, row) in content.rows.iter().enumerate() {
        frame.push_text(
            CanvasLayerKind::Tooltip,
            TextPrimitive::new(
                format!("{}: {}", row.label, row.value),
                text_x,
                line_y(index + 1),
                layout.font_size_px,
                layout.text_color,
                TextHAlign::Left,
            ),
        );
    }
}
