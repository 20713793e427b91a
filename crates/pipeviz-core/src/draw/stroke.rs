//! Stroke and line-style definitions.
//!
//! [`StrokeDefinition`] bundles the color, width and dash pattern of a line,
//! and [`apply_stroke!`](crate::apply_stroke!) writes them onto any SVG
//! element in one step.
//!
//! | Field | SVG Attribute | Example Values |
//! |-------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#a855f7"`, `0.6` |
//! | `width` | `stroke-width` | `2.5` |
//! | `style` | `stroke-dasharray` | `"8,4"`, `"5,5"` |

use crate::color::Color;

/// Dash pattern of a stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// Long dashes (8px dash, 4px gap): region outlines and convergence edges.
    Dashed,
    /// Even dashes (5px dash, 5px gap): node-to-node connectors.
    ShortDashed,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn dasharray(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("8,4"),
            Self::ShortDashed => Some("5,5"),
        }
    }
}

/// A stroke definition for rendering lines and borders.
///
/// # Examples
///
/// ```
/// use pipeviz_core::draw::{StrokeDefinition, StrokeStyle};
/// use pipeviz_core::color::Color;
///
/// let stroke = StrokeDefinition::dashed(Color::new("#a855f7").unwrap(), 2.5);
/// assert_eq!(stroke.style(), StrokeStyle::Dashed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    pub fn dashed(color: Color, width: f32) -> Self {
        Self::solid(color, width).with_style(StrokeStyle::Dashed)
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// # Examples
///
/// ```
/// use pipeviz_core::draw::StrokeDefinition;
/// use pipeviz_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::dashed(Color::new("gray").unwrap(), 2.0);
/// let path = svg_element::Path::new().set("d", "M 0 0 L 10 10");
///
/// let path = pipeviz_core::apply_stroke!(path, &stroke);
/// assert!(path.to_string().contains("stroke-dasharray"));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().dasharray() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(stroke.style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_dasharray() {
        assert_eq!(StrokeStyle::Solid.dasharray(), None);
        assert_eq!(StrokeStyle::Dashed.dasharray(), Some("8,4"));
        assert_eq!(StrokeStyle::ShortDashed.dasharray(), Some("5,5"));
    }

    #[test]
    fn test_apply_stroke_attributes() {
        let color = Color::new("#8b5cf6").unwrap().with_alpha(0.65);
        let stroke = StrokeDefinition::solid(color, 2.5).with_style(StrokeStyle::ShortDashed);

        let rendered = apply_stroke!(svg_element::Line::new(), &stroke).to_string();

        assert!(rendered.contains("stroke-width=\"2.5\""));
        assert!(rendered.contains("stroke-opacity=\"0.65\""));
        assert!(rendered.contains("stroke-dasharray=\"5,5\""));
    }

    #[test]
    fn test_solid_has_no_dasharray() {
        let stroke = StrokeDefinition::solid(Color::default(), 2.0);
        let rendered = apply_stroke!(svg_element::Line::new(), &stroke).to_string();
        assert!(!rendered.contains("stroke-dasharray"));
    }
}
