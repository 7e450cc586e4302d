use cairo::{Context, SvgSurface};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LayerPrimitives, LineStrokeStyle, RectPrimitive, RenderFrame, Renderer, TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a window surface owned by the host).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango renderer producing SVG documents.
///
/// `Renderer::render` paints each frame onto a fresh `SvgSurface` sized to the
/// frame viewport and keeps the finished document. Through
/// `CairoContextRenderer` the same layer walk targets any Cairo context.
#[derive(Debug, Default)]
pub struct CairoSvgRenderer {
    background: Option<Color>,
    document: String,
    last_stats: CairoRenderStats,
}

impl CairoSvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo-svg+pango+pangocairo"
    }

    pub fn set_background(&mut self, color: Option<Color>) -> ChartResult<()> {
        if let Some(color) = color {
            color.validate()?;
        }
        self.background = color;
        Ok(())
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        if let Some(background) = self.background {
            apply_color(context, background);
            context
                .paint()
                .map_err(|err| map_backend_error("failed to paint background", err))?;
        }

        let mut stats = CairoRenderStats::default();
        for layer in frame.layers.iter().filter(|layer| !layer.is_empty()) {
            draw_layer(context, layer, &mut stats)?;
        }
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoSvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let surface = SvgSurface::for_stream(
            f64::from(frame.viewport.width),
            f64::from(frame.viewport.height),
            Vec::<u8>::new(),
        )
        .map_err(|err| ChartError::InvalidData(format!("failed to create svg surface: {err}")))?;

        {
            let context = Context::new(&surface)
                .map_err(|err| map_backend_error("failed to create cairo context", err))?;
            self.render_with_context(&context, frame)?;
        }

        let stream = surface
            .finish_output_stream()
            .map_err(|err| map_backend_error("failed to finish svg surface", err.error))?;
        let bytes = stream.downcast::<Vec<u8>>().map_err(|_| {
            ChartError::InvalidData("svg surface returned an unexpected stream".to_owned())
        })?;
        self.document = String::from_utf8(*bytes)
            .map_err(|err| ChartError::InvalidData(format!("svg output is not utf-8: {err}")))?;
        Ok(())
    }
}

impl CairoContextRenderer for CairoSvgRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_layer(
    context: &Context,
    layer: &LayerPrimitives,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    for rect in &layer.rects {
        draw_rect(context, *rect)?;
        stats.rects_drawn += 1;
    }

    for line in &layer.lines {
        apply_stroke(context, line.color, line.stroke_width, line.stroke_style);
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }

    for polyline in &layer.polylines {
        let Some(((x0, y0), rest)) = polyline.vertices.split_first() else {
            continue;
        };
        apply_stroke(
            context,
            polyline.color,
            polyline.stroke_width,
            polyline.stroke_style,
        );
        context.move_to(*x0, *y0);
        for (x, y) in rest {
            context.line_to(*x, *y);
        }
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))?;
        stats.paths_drawn += 1;
    }

    for text in &layer.texts {
        let layout = pangocairo::functions::create_layout(context);
        let font_description =
            FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, text_height) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };
        // Label y is the vertical centre of the glyph box.
        let y = text.y - f64::from(text_height) / 2.0;

        apply_color(context, text.color);
        context.move_to(x, y);
        pangocairo::functions::show_layout(context, &layout);
        stats.texts_drawn += 1;
    }

    Ok(())
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> ChartResult<()> {
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    apply_color(context, rect.fill_color);
    if rect.border_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        apply_stroke(
            context,
            rect.border_color,
            rect.border_width,
            LineStrokeStyle::Solid,
        );
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }
}

fn apply_stroke(context: &Context, color: Color, width: f64, style: LineStrokeStyle) {
    apply_color(context, color);
    context.set_line_width(width);
    match style {
        LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
        LineStrokeStyle::Dashed { dash, gap } => context.set_dash(&[dash, gap], 0.0),
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
