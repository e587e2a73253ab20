//! src/chart/config.rs
//!
//! Configuration values for strip chart layout and memory bounding.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Horizontal distance between two consecutive samples, in pixels.
    pub column_width: u32,

    /// Largest signal magnitude that should fit above/below the zero line.
    pub max_y: f32,

    /// Slots allocated before the first viewport size is known.
    pub initial_capacity: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            column_width: 5,
            max_y: 30.0,
            initial_capacity: 256,
        }
    }
}
