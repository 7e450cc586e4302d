use serde::{Deserialize, Serialize};

/// Paint layers of a chart frame, listed bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Grid,
    Axis,
    Series,
    Legend,
    Crosshair,
    Tooltip,
}

impl CanvasLayerKind {
    pub const CANONICAL_ORDER: [CanvasLayerKind; 6] = [
        CanvasLayerKind::Grid,
        CanvasLayerKind::Axis,
        CanvasLayerKind::Series,
        CanvasLayerKind::Legend,
        CanvasLayerKind::Crosshair,
        CanvasLayerKind::Tooltip,
    ];

    /// Stable identifier used by backends that group output (SVG `<g>` ids).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Axis => "axis",
            Self::Series => "series",
            Self::Legend => "legend",
            Self::Crosshair => "crosshair",
            Self::Tooltip => "tooltip",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CanvasLayerKind;

    #[test]
    fn overlays_paint_after_series() {
        let order = CanvasLayerKind::CANONICAL_ORDER;
        let position = |kind| order.iter().position(|k| *k == kind).expect("layer");
        assert!(position(CanvasLayerKind::Grid) < position(CanvasLayerKind::Series));
        assert!(position(CanvasLayerKind::Series) < position(CanvasLayerKind::Crosshair));
        assert!(position(CanvasLayerKind::Crosshair) < position(CanvasLayerKind::Tooltip));
    }
}
