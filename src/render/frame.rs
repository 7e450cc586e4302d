use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CanvasLayerKind, LinePrimitive, PolylinePrimitive, RectPrimitive, TextPrimitive,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub lines: Vec<LinePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    fn empty(kind: CanvasLayerKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            polylines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.polylines.is_empty()
            && self.rects.is_empty()
            && self.texts.is_empty()
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Coordinates are container pixels; layers are kept in canonical paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: CanvasLayerKind::CANONICAL_ORDER
                .into_iter()
                .map(LayerPrimitives::empty)
                .collect(),
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    fn layer_mut(&mut self, kind: CanvasLayerKind) -> &mut LayerPrimitives {
        if let Some(index) = self.layers.iter().position(|layer| layer.kind == kind) {
            return &mut self.layers[index];
        }
        self.layers.push(LayerPrimitives::empty(kind));
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    pub fn push_line(&mut self, kind: CanvasLayerKind, line: LinePrimitive) {
        self.layer_mut(kind).lines.push(line);
    }

    pub fn push_polyline(&mut self, kind: CanvasLayerKind, polyline: PolylinePrimitive) {
        self.layer_mut(kind).polylines.push(polyline);
    }

    pub fn push_rect(&mut self, kind: CanvasLayerKind, rect: RectPrimitive) {
        self.layer_mut(kind).rects.push(rect);
    }

    pub fn push_text(&mut self, kind: CanvasLayerKind, text: TextPrimitive) {
        self.layer_mut(kind).texts.push(text);
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.layers.iter().flat_map(|layer| layer.lines.iter())
    }

    pub fn polylines(&self) -> impl Iterator<Item = &PolylinePrimitive> {
        self.layers.iter().flat_map(|layer| layer.polylines.iter())
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.layers.iter().flat_map(|layer| layer.rects.iter())
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.layers.iter().flat_map(|layer| layer.texts.iter())
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in self.lines() {
            line.validate()?;
        }
        for polyline in self.polylines() {
            polyline.validate()?;
        }
        for rect in self.rects() {
            rect.validate()?;
        }
        for text in self.texts() {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(LayerPrimitives::is_empty)
    }
}
