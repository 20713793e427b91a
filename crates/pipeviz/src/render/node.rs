//! Node box rendering.
//!
//! A node renders as a rounded box of its fixed width holding the bold label
//! followed by the description lines. The box grows taller when the wrapped
//! text does not fit the node's nominal height.

use svg::node::element as svg_element;

use pipeviz_core::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextDefinition},
    geometry::{Bounds, Insets, Point, Size},
};

use super::css;
use crate::model::{Category, DisplayContent, Node};

const PADDING: f32 = 16.0;
const CORNER_RADIUS: f32 = 12.0;
const LABEL_GAP: f32 = 8.0;
const LINE_GAP: f32 = 4.0;

/// Nodes drawn larger and above the others.
const OUTSTANDING: [&str; 2] = ["agent", "kb"];

/// Nodes of the intelligence layer, drawn in violet whatever their category.
const INTELLIGENCE: [&str; 4] = ["ingestion", "kb", "trigger", "agent"];

/// Whether the node is one of the emphasized core nodes.
pub fn is_outstanding(id: &str) -> bool {
    OUTSTANDING.contains(&id)
}

/// Fill, border and text colors of a node box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    fill: Color,
    border: Color,
    text: Color,
    dashed: bool,
}

impl Palette {
    /// Palette for a node, by intelligence-layer membership first and category second.
    pub fn for_node(node: &Node) -> Self {
        if INTELLIGENCE.contains(&node.id()) {
            return Self::new("#f3e8ff", "#c084fc", "#581c87");
        }

        match node.category() {
            Category::Source | Category::Storage => Self::new("#fef3c7", "#fbbf24", "#78350f"),
            Category::Process => Self::new("#dbeafe", "#60a5fa", "#1e3a8a"),
            Category::Ai => Self::new("#e0e7ff", "#6366f1", "#312e81"),
            Category::Output => Self::new("#dcfce7", "#4ade80", "#14532d"),
            Category::Consumer => Self::new("#cffafe", "#22d3ee", "#164e63"),
            Category::Feedback => Self::new("#fce7f3", "#f472b6", "#831843"),
            Category::Observability => Self {
                dashed: true,
                ..Self::new("#f3f4f6", "#9ca3af", "#374151")
            },
        }
    }

    fn new(fill: &str, border: &str, text: &str) -> Self {
        Self {
            fill: css(fill),
            border: css(border),
            text: css(text),
            dashed: false,
        }
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn border(&self) -> Color {
        self.border
    }

    pub fn text(&self) -> Color {
        self.text
    }

    pub fn is_dashed(&self) -> bool {
        self.dashed
    }
}

/// A node prepared for drawing with the content it currently displays.
///
/// The renderer keeps no state of its own. Pointer handling stays with the
/// host: every box carries a `data-node-id` attribute so event targets can be
/// mapped back to node identifiers.
#[derive(Debug)]
pub struct NodeBox<'a> {
    node: &'a Node,
    content: &'a DisplayContent,
    dragging: bool,
    business: bool,
    palette: Palette,
    label_definition: TextDefinition,
    description_definition: TextDefinition,
}

impl<'a> NodeBox<'a> {
    pub fn new(node: &'a Node, content: &'a DisplayContent) -> Self {
        let palette = Palette::for_node(node);
        let outstanding = is_outstanding(node.id());

        let mut label_definition = TextDefinition::new();
        label_definition.set_font_size(if outstanding { 14 } else { 12 });
        label_definition.set_font_weight(Some(700));
        label_definition.set_color(Some(palette.text()));

        let mut description_definition = TextDefinition::new();
        description_definition.set_font_size(if outstanding { 11 } else { 10 });
        description_definition.set_color(Some(palette.text().with_alpha(0.8)));

        Self {
            node,
            content,
            dragging: false,
            business: false,
            palette,
            label_definition,
            description_definition,
        }
    }

    pub fn with_dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }

    pub fn with_business(mut self, business: bool) -> Self {
        self.business = business;
        self
    }

    /// Layer the whole box is emitted on.
    pub fn layer(&self) -> RenderLayer {
        if self.dragging {
            RenderLayer::Dragged
        } else if is_outstanding(self.node.id()) {
            RenderLayer::Outstanding
        } else {
            RenderLayer::Node
        }
    }

    fn padding(&self) -> Insets {
        Insets::uniform(PADDING)
    }

    fn text_width(&self) -> f32 {
        (self.node.size().width() - self.padding().horizontal_sum()).max(0.0)
    }

    fn label(&self) -> Text<'_> {
        Text::new(&self.label_definition, &self.content.label)
            .with_max_width(self.text_width())
            .with_layer(self.layer())
    }

    fn description(&self) -> impl Iterator<Item = Text<'_>> {
        self.content.description.iter().map(|line| {
            Text::new(&self.description_definition, line)
                .with_max_width(self.text_width())
                .with_layer(self.layer())
        })
    }

    fn content_height(&self) -> f32 {
        let label = self.label().size().height();
        let lines: Vec<f32> = self
            .description()
            .map(|text| text.size().height())
            .collect();
        if lines.is_empty() {
            return label;
        }

        let gaps = LINE_GAP * (lines.len() - 1) as f32;
        label + LABEL_GAP + lines.iter().sum::<f32>() + gaps
    }

    fn border_width(&self) -> f32 {
        if is_outstanding(self.node.id()) {
            3.0
        } else {
            2.0
        }
    }

    fn ring(
        &self,
        bounds: Bounds,
        inset: f32,
        stroke: &StrokeDefinition,
    ) -> svg_element::Rectangle {
        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x() - inset)
            .set("y", bounds.min_y() - inset)
            .set("width", bounds.width() + 2.0 * inset)
            .set("height", bounds.height() + 2.0 * inset)
            .set("rx", CORNER_RADIUS + inset)
            .set("fill", "none");
        apply_stroke!(rect, stroke)
    }
}

impl Drawable for NodeBox<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let layer = self.layer();
        let bounds = Bounds::new_from_top_left(position, self.size());
        let opacity = if self.dragging { 0.8 } else { 1.0 };

        if is_outstanding(self.node.id()) {
            let halo = StrokeDefinition::solid(css("#c084fc").with_alpha(0.3), 4.0);
            output.add_to_layer(layer, Box::new(self.ring(bounds, 2.0, &halo)));
        }

        let mut border = StrokeDefinition::solid(self.palette.border(), self.border_width());
        if self.palette.is_dashed() {
            border = StrokeDefinition::dashed(self.palette.border(), self.border_width());
        }
        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", CORNER_RADIUS)
            .set("fill", self.palette.fill().to_string())
            .set("opacity", opacity)
            .set("data-node-id", self.node.id())
            .set("data-category", self.node.category().name());
        output.add_to_layer(layer, Box::new(apply_stroke!(rect, &border)));

        if self.business {
            let ring = StrokeDefinition::solid(css("#a855f7"), 2.0);
            output.add_to_layer(layer, Box::new(self.ring(bounds, 4.0, &ring)));
        }

        let padding = self.padding();
        let mut cursor = position.add_point(Point::new(padding.left(), padding.top()));

        let label = self.label();
        let label_height = label.size().height();
        output.merge(label.render_to_layers(cursor));
        cursor = cursor.add_point(Point::new(0.0, label_height + LABEL_GAP));

        for line in self.description() {
            let height = line.size().height();
            output.merge(line.render_to_layers(cursor));
            cursor = cursor.add_point(Point::new(0.0, height + LINE_GAP));
        }

        output
    }

    fn size(&self) -> Size {
        let width = self.node.size().width();
        let height = self.content_height() + self.padding().vertical_sum();
        Size::new(width, height.max(self.node.size().height()))
    }
}
