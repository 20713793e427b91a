//! Pipeviz Core Types and Definitions
//!
//! This crate provides the foundational types used to draw Pipeviz diagrams:
//!
//! - **Geometry**: Points, sizes and boxes ([`geometry`] module)
//! - **Colors**: CSS color parsing ([`color::Color`])
//! - **Draw**: Layered SVG output, strokes, text and markers ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
