//! Edge emphasis selection.
//!
//! A few edges carry the main flow of the pipeline and are drawn heavier and
//! colored. Selection is an exact match of the edge's `(from, to)` pair
//! against a fixed table; every other edge gets the neutral style. Edges
//! touching the convergence point share their own violet style.

use pipeviz_core::color::Color;

use crate::{
    model::{Edge, Endpoint},
    render::css,
    routing::RouteKind,
};

const VIOLET: &str = "#a855f7";
const VIOLET_TEXT: &str = "#7c3aed";

/// Highlighted `(from, to)` pairs: stroke color, label color, animated.
const HIGHLIGHTS: [(&str, &str, &str, &str, bool); 3] = [
    ("ingestion", "kb", VIOLET, VIOLET_TEXT, true),
    ("trigger", "agent", "#10b981", "#059669", false),
    ("kb", "agent", "#8b5cf6", VIOLET_TEXT, true),
];

/// Visual weight of an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEmphasis {
    stroke: Color,
    label: Color,
    width: f32,
    opacity: f32,
    animated: bool,
    highlighted: bool,
}

impl EdgeEmphasis {
    /// Selects the emphasis for `edge`, routed with the given rule.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pipeviz::{emphasis::EdgeEmphasis, model::Edge, routing::RouteKind};
    /// let retrieval = EdgeEmphasis::select(&Edge::new("kb", "agent"), RouteKind::Direct);
    /// assert!(retrieval.is_highlighted());
    /// assert!(retrieval.is_animated());
    ///
    /// let reverse = EdgeEmphasis::select(&Edge::new("agent", "kb"), RouteKind::Direct);
    /// assert!(!reverse.is_highlighted());
    /// ```
    pub fn select(edge: &Edge, kind: RouteKind) -> Self {
        match kind {
            RouteKind::FanIn => Self::convergence(2.0),
            RouteKind::FanOut => Self::convergence(2.5),
            RouteKind::Direct => Self::for_pair(edge.from(), edge.to()),
        }
    }

    fn for_pair(from: &Endpoint, to: &Endpoint) -> Self {
        HIGHLIGHTS
            .iter()
            .find(|(f, t, ..)| from.id() == *f && to.id() == *t)
            .map(|(_, _, stroke, label, animated)| Self {
                stroke: css(stroke),
                label: css(label),
                width: 2.5,
                opacity: 0.65,
                animated: *animated,
                highlighted: true,
            })
            .unwrap_or_else(Self::neutral)
    }

    fn neutral() -> Self {
        Self {
            stroke: css("#9ca3af"),
            label: css("#6b7280"),
            width: 2.0,
            opacity: 0.5,
            animated: false,
            highlighted: false,
        }
    }

    fn convergence(width: f32) -> Self {
        Self {
            stroke: css(VIOLET),
            label: css(VIOLET_TEXT),
            width,
            opacity: 0.6,
            animated: true,
            highlighted: false,
        }
    }

    /// Stroke color, including the edge opacity.
    pub fn stroke_color(&self) -> Color {
        self.stroke.with_alpha(self.opacity)
    }

    /// Opaque base color of the stroke, used to key arrowhead markers.
    pub fn base_color(&self) -> Color {
        self.stroke
    }

    pub fn label_color(&self) -> Color {
        self.label
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether the dash pattern flows along the edge.
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// Whether the edge matched the highlight table.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Arrowhead fill; neutral arrowheads are drawn more opaque than colored ones.
    pub fn arrowhead_color(&self) -> Color {
        let alpha = if self.highlighted || self.animated {
            0.7
        } else {
            0.9
        };
        self.stroke.with_alpha(alpha)
    }
}
