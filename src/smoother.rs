//! src/smoother.rs
//!
//! Single-pole low-pass filter (exponential moving average).
//!
//! `filtered' = alpha * filtered + (1 - alpha) * raw`
//!
//! Larger `alpha` keeps more of the previous value, so the trace lags further
//! behind the raw signal and high-frequency noise is damped harder.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ALPHA: f32 = 0.75;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Weight of the previous filtered value, clamped to [0, 1].
    pub alpha: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SignalSmoother {
    alpha: f32,
    filtered: f32,
}

impl SignalSmoother {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            filtered: 0.0,
        }
    }

    /// Feed one raw value and return the new filtered value.
    pub fn update(&mut self, raw: f32) -> f32 {
        self.filtered = self.alpha * self.filtered + (1.0 - self.alpha) * raw;
        self.filtered
    }

    /// Current filtered value (0 until the first update).
    pub fn value(&self) -> f32 {
        self.filtered
    }
}

impl Default for SignalSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}
