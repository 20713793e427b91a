//! Configuration types for Pipeviz.
//!
//! All types implement [`serde::Deserialize`] and fall back to the built-in
//! tuning constants for every missing field, so a partial TOML file only
//! overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`InteractionConfig`] - Click versus drag disambiguation.
//! - [`RoutingConfig`] - Edge curvature, label placement and the convergence point.
//! - [`StyleConfig`] - Background color and surface size.
//!
//! # Example
//!
//! ```
//! # use pipeviz::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.interaction().click_threshold(), 5.0);
//! assert_eq!(config.routing().curvature_cap(), 30.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use pipeviz_core::{
    color::Color,
    geometry::{Point, Size},
};

use crate::dataset::SURFACE_SIZE;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    interaction: InteractionConfig,

    #[serde(default)]
    routing: RoutingConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(interaction: InteractionConfig, routing: RoutingConfig, style: StyleConfig) -> Self {
        Self {
            interaction,
            routing,
            style,
        }
    }

    pub fn interaction(&self) -> &InteractionConfig {
        &self.interaction
    }

    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Pointer interaction settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Pointer travel, in pixels, below which a press and release count as a click.
    click_threshold: f32,
}

impl InteractionConfig {
    pub fn new(click_threshold: f32) -> Self {
        Self { click_threshold }
    }

    pub fn click_threshold(&self) -> f32 {
        self.click_threshold
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            click_threshold: 5.0,
        }
    }
}

/// Edge routing parameters.
///
/// The bow of a node-to-node edge is
/// `min(length * curvature_ratio, curvature_cap) * bow_scale`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    curvature_ratio: f32,
    curvature_cap: f32,
    bow_scale: f32,
    /// Distance of an edge label from the curve, along the chord normal.
    label_offset: f32,
    /// Extra upward shift applied to every edge label.
    label_lift: f32,
    /// Fixed coordinate of the convergence point.
    convergence: Point,
}

impl RoutingConfig {
    pub fn curvature_ratio(&self) -> f32 {
        self.curvature_ratio
    }

    pub fn curvature_cap(&self) -> f32 {
        self.curvature_cap
    }

    pub fn bow_scale(&self) -> f32 {
        self.bow_scale
    }

    pub fn label_offset(&self) -> f32 {
        self.label_offset
    }

    pub fn label_lift(&self) -> f32 {
        self.label_lift
    }

    pub fn convergence(&self) -> Point {
        self.convergence
    }

    pub fn with_convergence(mut self, convergence: Point) -> Self {
        self.convergence = convergence;
        self
    }

    pub fn with_curvature(mut self, ratio: f32, cap: f32) -> Self {
        self.curvature_ratio = ratio;
        self.curvature_cap = cap;
        self
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            curvature_ratio: 0.15,
            curvature_cap: 30.0,
            bow_scale: 0.2,
            label_offset: 10.0,
            label_lift: 5.0,
            convergence: Point::new(205.0, 300.0),
        }
    }
}

/// Visual styling configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background color as a CSS color string.
    background_color: Option<String>,
    surface_width: f32,
    surface_height: f32,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn surface_size(&self) -> Size {
        Size::new(self.surface_width, self.surface_height)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            surface_width: SURFACE_SIZE.width(),
            surface_height: SURFACE_SIZE.height(),
        }
    }
}
