//! Text rendering definitions for node labels and edge annotations.
//!
//! Text is rendered as an SVG `<text>` element with one `<tspan>` per visual
//! line. When a maximum width is set, content is wrapped the way a fixed-width
//! node box wraps it, and the measured height is what lets node boxes grow to
//! fit their content.
//!
//! # Quick Start
//!
//! ```
//! # use pipeviz_core::draw::{TextDefinition, Text};
//! let mut style = TextDefinition::new();
//! style.set_font_size(10);
//!
//! let text = Text::new(&style, "- schema mapping").with_max_width(128.0);
//! let size = text.calculate_size();
//! assert!(size.height() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Horizontal anchoring of a text element relative to its position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Position is the top-left corner of the text block
    #[default]
    Start,
    /// Position is the horizontal center of the first baseline
    Middle,
}

impl TextAnchor {
    fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }
}

/// Defines the visual style for text elements.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `12` |
/// | Font weight | normal |
/// | Text color | `None` (SVG default, black) |
/// | Anchor | [`TextAnchor::Start`] |
/// | Line height | `1.25` × font size |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    font_weight: Option<u16>,
    color: Option<Color>,
    anchor: TextAnchor,
    line_height: f32,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family for the text.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the numeric font weight (e.g. 600, 700).
    pub fn set_font_weight(&mut self, weight: Option<u16>) {
        self.font_weight = weight;
    }

    /// Sets the text color. `None` leaves the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Sets the horizontal anchor.
    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    /// Sets the line height as a multiple of the font size.
    pub fn set_line_height(&mut self, factor: f32) {
        self.line_height = factor;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_weight(&self) -> Option<u16> {
        self.font_weight
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    /// Height of one visual line in pixels.
    pub fn line_height_px(&self) -> f32 {
        self.font_size as f32 * self.line_height
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 12,
            font_weight: None,
            color: None,
            anchor: TextAnchor::default(),
            line_height: 1.25,
        }
    }
}

/// A renderable text element combining content with styling.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
    max_width: Option<f32>,
    layer: RenderLayer,
}

impl<'a> Text<'a> {
    /// Creates a new unwrapped text element on the [`RenderLayer::Node`] layer.
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
            max_width: None,
            layer: RenderLayer::Node,
        }
    }

    /// Wraps the content to the given width.
    pub fn with_max_width(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Emits the text onto a different layer.
    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Visual lines after wrapping.
    pub fn lines(&self) -> Vec<String> {
        self.layout().lines
    }

    /// Calculate the size required to display this text.
    pub fn calculate_size(&self) -> Size {
        self.layout().size
    }

    fn layout(&self) -> TextLayout {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .layout_text(self.content, self.definition, self.max_width)
    }
}

impl<'a> Drawable for Text<'a> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let layout = self.layout();
        if layout.lines.is_empty() {
            return output;
        }

        let line_height = self.definition.line_height_px();

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", self.definition.anchor().to_svg_value())
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if self.definition.anchor() == TextAnchor::Start {
            rendered_text = rendered_text.set("dominant-baseline", "hanging");
        }

        if let Some(weight) = self.definition.font_weight() {
            rendered_text = rendered_text.set("font-weight", weight);
        }

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for (idx, line) in layout.lines.iter().enumerate() {
            let dy = if idx == 0 { 0.0 } else { line_height };
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", dy)
                .add(SvgText::new(line.as_str()));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(self.layer, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Wrapped lines together with their measured extent.
#[derive(Debug, Default)]
struct TextLayout {
    lines: Vec<String>,
    size: Size,
}

/// TextManager handles text measurement and font operations.
/// It keeps a single FontSystem since creating one scans the system fonts.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Shape and wrap `text` with cosmic-text.
    ///
    /// Falls back to an average glyph-width estimate when shaping produces no
    /// measurable glyphs (no usable system fonts).
    fn layout_text(
        &self,
        text: &str,
        text_def: &TextDefinition,
        max_width: Option<f32>,
    ) -> TextLayout {
        if text.is_empty() {
            return TextLayout::default();
        }

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let font_size_px = text_def.font_size() as f32;
        let line_height = text_def.line_height_px();
        let metrics = Metrics::new(font_size_px, line_height);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));

        buffer.set_size(max_width, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut lines = Vec::new();
        let mut max_line_width: f32 = 0.0;
        let mut shaped_any = false;

        for run in buffer.layout_runs() {
            match (run.glyphs.first(), run.glyphs.last()) {
                (Some(first), Some(last)) => {
                    shaped_any = true;
                    let segment = run.text.get(first.start..last.end).unwrap_or(run.text);
                    lines.push(segment.trim_end().to_string());
                    max_line_width = max_line_width.max(last.x + last.w);
                }
                _ => lines.push(String::new()),
            }
        }

        if !shaped_any || max_line_width <= 0.0 {
            return estimate_layout(text, font_size_px, line_height, max_width);
        }

        let height = lines.len() as f32 * line_height;
        TextLayout {
            lines,
            size: Size::new(max_line_width, height),
        }
    }
}

/// Greedy word wrap using an average glyph width of 0.55em.
fn estimate_layout(
    text: &str,
    font_size_px: f32,
    line_height: f32,
    max_width: Option<f32>,
) -> TextLayout {
    let glyph_width = font_size_px * 0.55;
    let measure = |s: &str| s.chars().count() as f32 * glyph_width;

    let mut lines: Vec<String> = Vec::new();
    for source_line in text.lines() {
        let Some(limit) = max_width else {
            lines.push(source_line.to_string());
            continue;
        };

        let mut current = String::new();
        for word in source_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate) > limit && !current.is_empty() {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }

    let width = lines.iter().map(|l| measure(l)).fold(0.0, f32::max);
    let height = lines.len() as f32 * line_height;
    TextLayout {
        lines,
        size: Size::new(width, height),
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
