use std::fmt::Write;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LayerPrimitives, LineStrokeStyle, RenderFrame, Renderer, TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Serializes frames into standalone SVG documents.
///
/// Each canvas layer becomes one `<g>` group so hosts can diff or restyle
/// layers independently. The last document is kept until the next render.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    background: Option<Color>,
    document: String,
    last_stats: SvgRenderStats,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            background: None,
            document: String::new(),
            last_stats: SvgRenderStats::default(),
        }
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
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    fn write_document(&self, frame: &RenderFrame) -> Result<(String, SvgRenderStats), std::fmt::Error> {
        let mut out = String::new();
        let mut stats = SvgRenderStats::default();
        let width = frame.viewport.width;
        let height = frame.viewport.height;

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        if let Some(background) = self.background {
            writeln!(
                out,
                r#"  <rect x="0" y="0" width="{width}" height="{height}" fill="{}" fill-opacity="{}"/>"#,
                background.to_hex(),
                num(background.alpha)
            )?;
        }
        for layer in frame.layers.iter().filter(|layer| !layer.is_empty()) {
            write_layer(&mut out, layer, &mut stats)?;
        }
        writeln!(out, "</svg>")?;
        Ok((out, stats))
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let (document, stats) = self
            .write_document(frame)
            .map_err(|err| ChartError::InvalidData(format!("failed to write svg: {err}")))?;
        self.document = document;
        self.last_stats = stats;
        Ok(())
    }
}

fn write_layer(
    out: &mut String,
    layer: &LayerPrimitives,
    stats: &mut SvgRenderStats,
) -> std::fmt::Result {
    writeln!(out, r#"  <g class="{}">"#, layer.kind.as_str())?;

    for rect in &layer.rects {
        write!(
            out,
            r#"    <rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{}""#,
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            rect.fill_color.to_hex(),
            num(rect.fill_color.alpha)
        )?;
        if rect.border_width > 0.0 {
            write!(
                out,
                r#" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
                rect.border_color.to_hex(),
                num(rect.border_color.alpha),
                num(rect.border_width)
            )?;
        }
        writeln!(out, "/>")?;
        stats.rects_drawn += 1;
    }

    for line in &layer.lines {
        write!(
            out,
            r#"    <line x1="{}" y1="{}" x2="{}" y2="{}""#,
            num(line.x1),
            num(line.y1),
            num(line.x2),
            num(line.y2)
        )?;
        write_stroke(out, line.color, line.stroke_width, line.stroke_style)?;
        writeln!(out, "/>")?;
        stats.lines_drawn += 1;
    }

    for polyline in &layer.polylines {
        let mut d = String::new();
        for (index, (x, y)) in polyline.vertices.iter().enumerate() {
            let command = if index == 0 { 'M' } else { 'L' };
            write!(d, "{command}{},{}", num(*x), num(*y))?;
        }
        write!(out, r#"    <path d="{d}" fill="none""#)?;
        write_stroke(out, polyline.color, polyline.stroke_width, polyline.stroke_style)?;
        writeln!(out, "/>")?;
        stats.paths_drawn += 1;
    }

    for text in &layer.texts {
        let anchor = match text.h_align {
            TextHAlign::Left => "start",
            TextHAlign::Center => "middle",
            TextHAlign::Right => "end",
        };
        writeln!(
            out,
            r#"    <text x="{}" y="{}" font-size="{}" fill="{}" fill-opacity="{}" text-anchor="{anchor}" dominant-baseline="middle">{}</text>"#,
            num(text.x),
            num(text.y),
            num(text.font_size_px),
            text.color.to_hex(),
            num(text.color.alpha),
            escape_xml(&text.text)
        )?;
        stats.texts_drawn += 1;
    }

    writeln!(out, "  </g>")
}

fn write_stroke(
    out: &mut String,
    color: Color,
    width: f64,
    style: LineStrokeStyle,
) -> std::fmt::Result {
    write!(
        out,
        r#" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
        color.to_hex(),
        num(color.alpha),
        num(width)
    )?;
    if let LineStrokeStyle::Dashed { dash, gap } = style {
        write!(out, r#" stroke-dasharray="{},{}""#, num(dash), num(gap))?;
    }
    Ok(())
}

/// Three decimals at most, trailing zeros trimmed.
fn num(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_owned(),
        other => other.to_owned(),
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_xml, num};

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(10.25), "10.25");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(1.0 / 3.0), "0.333");
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape_xml("A&B <c>"), "A&amp;B &lt;c&gt;");
    }
}
