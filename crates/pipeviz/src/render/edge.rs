//! Edge rendering.
//!
//! [`EdgeDrawer`] turns a routed edge into its stroke, start dot and label,
//! registering one arrowhead marker per color along the way. The marker
//! definitions are collected once all edges are drawn.

use svg::node::element as svg_element;

use pipeviz_core::{
    apply_stroke,
    color::Color,
    draw::{
        Drawable, LayeredOutput, MarkerRegistry, RenderLayer, StrokeDefinition, StrokeStyle, Text,
        TextAnchor, TextDefinition,
    },
    geometry::Point,
};

use super::css;
use crate::{
    emphasis::EdgeEmphasis,
    model::Edge,
    routing::{Route, RouteKind},
};

/// Style sheet for the flowing dash animation of `animated-arrow` edges.
pub const ANIMATION_CSS: &str = "@keyframes dash-flow { to { stroke-dashoffset: -20; } } \
.animated-arrow { animation: dash-flow 1s linear infinite; }";

const START_DOT_RADIUS: f32 = 3.0;
const CONVERGENCE_RADIUS: f32 = 6.0;

/// Draws edges and tracks the arrowhead markers they reference.
#[derive(Debug, Default)]
pub struct EdgeDrawer {
    markers: MarkerRegistry,
}

impl EdgeDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws one routed edge.
    pub fn draw_edge(&mut self, edge: &Edge, route: &Route) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let emphasis = EdgeEmphasis::select(edge, route.kind());

        let style = match (route.is_dashed(), route.kind()) {
            (false, _) => StrokeStyle::Solid,
            (true, RouteKind::Direct) => StrokeStyle::ShortDashed,
            (true, _) => StrokeStyle::Dashed,
        };
        let stroke =
            StrokeDefinition::solid(emphasis.stroke_color(), emphasis.width()).with_style(style);

        let mut path = svg_element::Path::new()
            .set("d", route.path_data())
            .set("fill", "none")
            .set("data-from", edge.from().id())
            .set("data-to", edge.to().id());
        path = apply_stroke!(path, &stroke);

        if route.has_arrowhead() {
            let marker = self.markers.arrowhead(emphasis.arrowhead_color());
            path = path.set("marker-end", marker);
        }
        if emphasis.is_animated() {
            path = path.set("class", "animated-arrow");
        }
        output.add_to_layer(RenderLayer::Edge, Box::new(path));

        let dot_alpha = match route.kind() {
            RouteKind::FanIn | RouteKind::FanOut => 0.7,
            RouteKind::Direct => emphasis.opacity(),
        };
        let dot_color = emphasis.base_color().with_alpha(dot_alpha);
        output.add_to_layer(
            RenderLayer::Edge,
            Box::new(circle(route.start(), START_DOT_RADIUS, dot_color)),
        );

        if let (Some(label), Some(position)) = (edge.label(), route.label_position()) {
            let mut definition = TextDefinition::new();
            definition.set_font_size(10);
            definition.set_font_weight(Some(600));
            definition.set_anchor(TextAnchor::Middle);
            definition.set_color(Some(emphasis.label_color()));

            let text = Text::new(&definition, label).with_layer(RenderLayer::EdgeLabel);
            output.merge(text.render_to_layers(position));
        }

        output
    }

    /// Draws the marker of the point source edges converge on.
    pub fn draw_convergence(&self, point: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let color = css("#a855f7").with_alpha(0.7);
        output.add_to_layer(
            RenderLayer::Edge,
            Box::new(circle(point, CONVERGENCE_RADIUS, color)),
        );
        output
    }

    /// Marker definitions for every arrowhead referenced so far.
    pub fn marker_definitions(&self) -> svg_element::Definitions {
        self.markers.definitions()
    }
}

fn circle(center: Point, radius: f32, color: Color) -> svg_element::Circle {
    svg_element::Circle::new()
        .set("cx", center.x())
        .set("cy", center.y())
        .set("r", radius)
        .set("fill", color.to_string())
        .set("fill-opacity", color.alpha())
}
