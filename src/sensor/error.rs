use thiserror::Error;

use super::kind::SensorKind;

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("{0} is not available on this device")]
    Unavailable(SensorKind),
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error("{0} stream ended")]
    Ended(SensorKind),
    #[error("sensor worker could not be started: {0}")]
    Io(#[from] std::io::Error),
}
