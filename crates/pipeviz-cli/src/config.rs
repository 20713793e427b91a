//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use pipeviz::{PipevizError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for PipevizError {
    fn from(err: ConfigError) -> Self {
        PipevizError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (pipeviz/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or fails validation
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, PipevizError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("pipeviz/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "pipeviz", "pipeviz") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(
                path = system_config.display().to_string();
                "Loading configuration from system path"
            );
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, PipevizError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;

    validate(&config)?;

    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    config
        .style()
        .background_color()
        .map_err(ConfigError::Validation)?;

    let routing = config.routing();
    let non_negative = [
        ("interaction.click_threshold", config.interaction().click_threshold()),
        ("routing.curvature_ratio", routing.curvature_ratio()),
        ("routing.curvature_cap", routing.curvature_cap()),
        ("routing.bow_scale", routing.bow_scale()),
    ];
    for (key, value) in non_negative {
        if !(value.is_finite() && value >= 0.0) {
            return Err(ConfigError::Validation(format!(
                "{key} must be a finite, non-negative number, got {value}"
            )));
        }
    }

    let finite = [
        ("routing.label_offset", routing.label_offset()),
        ("routing.label_lift", routing.label_lift()),
        ("routing.convergence.x", routing.convergence().x()),
        ("routing.convergence.y", routing.convergence().y()),
    ];
    for (key, value) in finite {
        if !value.is_finite() {
            return Err(ConfigError::Validation(format!(
                "{key} must be a finite number, got {value}"
            )));
        }
    }

    let surface = config.style().surface_size();
    if !(surface.width().is_finite() && surface.width() > 0.0)
        || !(surface.height().is_finite() && surface.height() > 0.0)
    {
        return Err(ConfigError::Validation(format!(
            "style surface must have a positive size, got {}x{}",
            surface.width(),
            surface.height()
        )));
    }

    Ok(())
}
