//! CLI logic for the Pipeviz diagram renderer.
//!
//! Loads configuration, optionally replays a scripted pointer session against
//! the pipeline diagram, and writes the resulting scene as SVG.

pub mod error_adapter;
pub mod session;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use pipeviz::{PipevizError, controller::DiagramController, dataset};

use session::Session;

/// Run the Pipeviz CLI application
///
/// # Errors
///
/// Returns `PipevizError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Session script errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), PipevizError> {
    info!(
        output_path = args.output,
        session:? = args.session;
        "Rendering pipeline diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let mut controller =
        DiagramController::new(dataset::pipeline(), app_config.interaction().clone());

    if let Some(path) = &args.session {
        let session = Session::load(path)?;
        session::replay(&mut controller, &session);
    }

    let svg = pipeviz::render_svg(&controller, &app_config)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
