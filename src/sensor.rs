//! src/sensor.rs
//!
//! Motion sensor sources and the types they exchange with the UI thread.

pub mod error;
pub mod kind;
pub mod manager;
pub mod serial;
pub mod simulated;

/// Re-exports
pub use error::SensorError;
pub use kind::{SamplingRate, SensorKind, sensor_type_name};
pub use manager::{Envelope, SensorInfo, SensorManager, SensorSample, Subscription};
pub use serial::{SerialConfig, SerialSensors};
pub use simulated::{SimulatedConfig, SimulatedSensors};
