//! src/chart.rs
//!
//! Top-level `chart` module: ring buffer, viewport geometry, drawing surface
//! abstraction and the strip chart built on top of them.

pub mod config;
pub mod geometry;
pub mod ring;
pub mod strip;
pub mod surface;

/// Re-exports
pub use config::ChartConfig;
pub use strip::StripChart;
pub use surface::{Point, Stroke, Surface};
