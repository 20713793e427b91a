//! Drawable Components for Diagram Rendering
//!
//! This module provides the drawing toolkit shared by every diagram element.
//! Drawables render into a [`LayeredOutput`], which orders SVG nodes by
//! [`RenderLayer`] when the final document is assembled.
mod layer;
mod marker;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use marker::MarkerRegistry;
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::{Point, Size};

/// Trait for drawable diagram elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable to one or more layers.
    ///
    /// # Arguments
    ///
    /// * `position` - The top-left position where this drawable should be rendered
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of this drawable.
    fn size(&self) -> Size;
}
