use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PricePoint, SeriesKind, series_has_values};
use crate::render::{CanvasLayerKind, Color, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::{ChartEngineConfig, SeriesStyles};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub kind: SeriesKind,
    pub label: String,
    pub color: Color,
    pub visible: bool,
}

pub type LegendEntries = SmallVec<[LegendEntry; 3]>;

/// One entry per drawn series: close always, moving averages only when at
/// least one point supplies a value.
#[must_use]
pub fn legend_entries(points: &[PricePoint], styles: &SeriesStyles) -> LegendEntries {
    SeriesKind::ALL
        .into_iter()
        .filter(|kind| !kind.is_optional() || series_has_values(points, *kind))
        .map(|kind| LegendEntry {
            kind,
            label: kind.label().to_owned(),
            color: styles.for_kind(kind).color,
            visible: true,
        })
        .collect()
}

/// Stacks legend rows top-to-bottom, anchored to the plot's top-right corner.
pub(super) fn append_legend_primitives(
    frame: &mut RenderFrame,
    entries: &[LegendEntry],
    config: &ChartEngineConfig,
    plot_width: f64,
) {
    let layout = config.legend;
    let origin_x = config.margins.left + plot_width - layout.offset_from_right;
    let origin_y = config.margins.top + layout.offset_top;

    for (row, entry) in entries.iter().filter(|entry| entry.visible).enumerate() {
        let row_y = origin_y + row as f64 * layout.row_height;
        frame.push_rect(
            CanvasLayerKind::Legend,
            RectPrimitive::new(
                origin_x,
                row_y + layout.swatch_y,
                layout.swatch_width,
                layout.swatch_height,
                entry.color,
            ),
        );
        frame.push_text(
            CanvasLayerKind::Legend,
            TextPrimitive::new(
                entry.label.clone(),
                origin_x + layout.label_x,
                row_y + layout.label_y,
                layout.font_size_px,
                layout.text_color,
                TextHAlign::Left,
            ),
        );
    }
}
