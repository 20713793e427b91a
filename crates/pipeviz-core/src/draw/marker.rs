//! Arrowhead marker generation.
//!
//! Edges reference their arrowhead through `marker-end="url(#...)"`. The
//! [`MarkerRegistry`] records every color that was requested while edges were
//! drawn so that one `<marker>` per color can be emitted in the document
//! `<defs>`.

use std::collections::BTreeMap;

use svg::node::element as svg_element;

use crate::color::Color;

/// Collects arrowhead colors and emits their SVG marker definitions.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    heads: BTreeMap<String, Color>,
}

impl MarkerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an arrowhead for `color` and returns the `url(#id)` reference.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pipeviz_core::{color::Color, draw::MarkerRegistry};
    /// let mut markers = MarkerRegistry::new();
    /// let green = Color::new("#10b981").unwrap();
    ///
    /// let reference = markers.arrowhead(green);
    /// assert!(reference.starts_with("url(#arrowhead-"));
    /// assert_eq!(markers.len(), 1);
    /// ```
    pub fn arrowhead(&mut self, color: Color) -> String {
        let id = Self::marker_id(color);
        let reference = format!("url(#{id})");
        self.heads.insert(id, color);
        reference
    }

    /// Number of distinct markers registered.
    pub fn len(&self) -> usize {
        self.heads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    /// Generates an SVG `<defs>` block with one marker per registered color.
    pub fn definitions(&self) -> svg_element::Definitions {
        self.heads
            .iter()
            .fold(svg_element::Definitions::new(), |defs, (id, color)| {
                defs.add(Self::create_arrowhead(id, *color))
            })
    }

    fn marker_id(color: Color) -> String {
        format!("arrowhead-{}", color.to_id_safe_string())
    }

    fn create_arrowhead(id: &str, color: Color) -> svg_element::Marker {
        svg_element::Marker::new()
            .set("id", id)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("refX", 4)
            .set("refY", 3)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", "M 0 0 L 8 4 L 0 8 z")
                    .set("fill", color.to_string())
                    .set("fill-opacity", color.alpha()),
            )
    }
}
