//! SVG scene export.
//!
//! Assembles one complete document from the controller's current state:
//! regions at the bottom, then edges, edge labels and nodes, with the node
//! being dragged on top.

use log::{debug, info, trace};
use svg::{Document, node::element as svg_element};

use pipeviz_core::{
    draw::{Drawable, LayeredOutput},
    geometry::Size,
};

use crate::{
    config::AppConfig,
    controller::DiagramController,
    export::Error,
    render::{ANIMATION_CSS, EdgeDrawer, NodeBox, RegionBox},
    routing::{self, RouteKind},
};

/// Renders diagram scenes to SVG documents.
#[derive(Debug)]
pub struct SvgBuilder<'a> {
    config: &'a AppConfig,
}

impl<'a> SvgBuilder<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Renders the current scene of `controller`.
    ///
    /// Edges whose endpoints cannot be resolved are left out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStyle`] for an unparsable background color and
    /// [`Error::EmptySurface`] for a surface without area.
    pub fn render(&self, controller: &DiagramController) -> Result<Document, Error> {
        let surface = self.config.style().surface_size();
        if surface.width() <= 0.0 || surface.height() <= 0.0 {
            return Err(Error::EmptySurface {
                width: surface.width(),
                height: surface.height(),
            });
        }
        let background = self
            .config
            .style()
            .background_color()
            .map_err(Error::InvalidStyle)?;

        let mut output = LayeredOutput::new();
        output.merge(self.render_regions(controller));

        let mut edges = EdgeDrawer::new();
        output.merge(self.render_edges(controller, &mut edges));
        output.merge(self.render_nodes(controller));
        debug!(items = output.len(); "Scene collected");

        let mut doc = self.create_document(surface);
        if let Some(color) = background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", color.to_string()),
            );
        }
        doc = doc
            .add(svg_element::Style::new(ANIMATION_CSS))
            .add(edges.marker_definitions());

        for node in output.render() {
            doc = doc.add(node);
        }

        info!("SVG scene rendered");
        Ok(doc)
    }

    fn create_document(&self, size: Size) -> Document {
        Document::new()
            .set("viewBox", (0.0, 0.0, size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height())
    }

    fn render_regions(&self, controller: &DiagramController) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for region in controller.regions() {
            let origin = region.bounds().min_point();
            output.merge(RegionBox::new(region).render_to_layers(origin));
        }
        output
    }

    fn render_edges(
        &self,
        controller: &DiagramController,
        drawer: &mut EdgeDrawer,
    ) -> LayeredOutput {
        let routing_config = self.config.routing();
        let mut output = LayeredOutput::new();
        let mut converges = false;

        for edge in controller.edges() {
            let Some(route) = routing::route(edge, |id| controller.node(id), routing_config) else {
                debug!(
                    from = edge.from().id(),
                    to = edge.to().id();
                    "Skipping unresolvable edge"
                );
                continue;
            };
            trace!(
                from = edge.from().id(),
                to = edge.to().id(),
                path = route.path_data();
                "Edge routed"
            );

            converges |= matches!(route.kind(), RouteKind::FanIn | RouteKind::FanOut);
            output.merge(drawer.draw_edge(edge, &route));
        }

        if converges {
            output.merge(drawer.draw_convergence(routing_config.convergence()));
        }
        output
    }

    fn render_nodes(&self, controller: &DiagramController) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for node in controller.nodes() {
            let Some(content) = controller.display(node.id()) else {
                continue;
            };
            let drawable = NodeBox::new(node, &content)
                .with_dragging(controller.dragging() == Some(node.id()))
                .with_business(controller.is_business(node.id()));
            output.merge(drawable.render_to_layers(node.position()));
        }
        output
    }
}
