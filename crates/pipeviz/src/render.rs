//! Drawables for the pieces of a pipeline diagram.
//!
//! Nodes and regions implement [`Drawable`](pipeviz_core::draw::Drawable).
//! Edges are absolute-positioned and share arrowhead markers, so they go
//! through the stateful [`EdgeDrawer`] instead.

mod edge;
mod node;
mod region;

use pipeviz_core::color::Color;

pub use edge::{ANIMATION_CSS, EdgeDrawer};
pub use node::{NodeBox, Palette, is_outstanding};
pub use region::RegionBox;

/// Parses a built-in palette entry.
///
/// Only ever called with literal CSS colors, which always parse.
pub(crate) fn css(value: &str) -> Color {
    Color::new(value).expect("built-in palette entries are valid CSS colors")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;

    #[test]
    fn test_builtin_colors_parse() {
        let diagram = dataset::pipeline();

        for node in diagram.nodes() {
            let palette = Palette::for_node(node);
            assert!((palette.fill().alpha() - 1.0).abs() < 0.001);
        }
        assert_eq!(diagram.regions()[0].color(), css("#f59e0b"));
        assert_eq!(diagram.regions()[1].color(), css("#a855f7"));
    }

    #[test]
    #[should_panic(expected = "valid CSS colors")]
    fn test_css_rejects_invalid_entry() {
        css("not-a-color");
    }
}
