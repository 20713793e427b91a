//! Pipeviz - an interactive data/AI pipeline architecture diagram.
//!
//! The crate models a fixed set of nodes and edges, lets a pointer drag
//! nodes around and toggle them between technical and business wording, and
//! routes every edge from the current node positions whenever the scene is
//! rendered.
//!
//! # Examples
//!
//! ```
//! use pipeviz::{
//!     config::AppConfig,
//!     controller::{DiagramController, FixedSurface, PointerEvent},
//!     dataset,
//!     geometry::Point,
//! };
//!
//! let config = AppConfig::default();
//! let mut controller = DiagramController::new(dataset::pipeline(), config.interaction().clone());
//! let surface = FixedSurface(Point::default());
//!
//! // Drag the agent 40px to the right.
//! controller.handle_event(
//!     PointerEvent::Down { node: "agent".to_string(), position: Point::new(600.0, 400.0) },
//!     &surface,
//! );
//! controller.handle_event(PointerEvent::Move { position: Point::new(640.0, 400.0) }, &surface);
//! controller.handle_event(
//!     PointerEvent::Up { node: Some("agent".to_string()), position: Point::new(640.0, 400.0) },
//!     &surface,
//! );
//!
//! assert_eq!(controller.node("agent").unwrap().position(), Point::new(620.0, 375.0));
//!
//! let svg = pipeviz::render_svg(&controller, &config).expect("Failed to render");
//! assert!(svg.contains("</svg>"));
//! ```

pub mod config;
pub mod controller;
pub mod dataset;
pub mod emphasis;
pub mod model;
pub mod render;
pub mod routing;

mod error;
mod export;

pub use pipeviz_core::{color, draw, geometry};

pub use error::PipevizError;

use log::info;

use config::AppConfig;
use controller::DiagramController;
use export::svg::SvgBuilder;

/// Render the controller's current scene to an SVG string.
///
/// # Errors
///
/// Returns `PipevizError::Export` when the style configuration cannot be
/// rendered.
pub fn render_svg(
    controller: &DiagramController,
    config: &AppConfig,
) -> Result<String, PipevizError> {
    info!(
        nodes = controller.nodes().count(),
        edges = controller.edges().len();
        "Rendering diagram"
    );

    let doc = SvgBuilder::new(config).render(controller)?;
    Ok(doc.to_string())
}
