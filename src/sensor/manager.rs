//! src/sensor/manager.rs
//!
//! Source-agnostic subscription plumbing.
//!
//! A source runs in its own worker thread and pushes [`Envelope`]s into an
//! `mpsc` channel drained by the UI thread. Every subscription gets a fresh
//! generation number so the receiver can drop samples that were already in
//! flight when the subscription was torn down.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};

use super::error::SensorError;
use super::kind::{SamplingRate, SensorKind};

/// One reading of a three-axis sensor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorSample {
    pub values: [f32; 3],
    /// monotonic timestamp in nanoseconds
    pub timestamp_ns: i64,
    pub accuracy: i32,
}

/// A sample tagged with the subscription that produced it.
#[derive(Clone, Copy, Debug)]
pub struct Envelope {
    pub generation: u64,
    pub sample: SensorSample,
}

/// What a source reports about the sensor it would deliver for a kind.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorInfo {
    pub kind: SensorKind,
    /// platform type id; may be one the name table does not know
    pub type_id: i32,
    pub name: String,
}

pub trait SensorManager {
    /// The sensor that would serve `kind`, `None` if the device has none.
    fn default_sensor(&self, kind: SensorKind) -> Option<SensorInfo>;

    /// Start delivering samples of `sensor` into `sink` until the returned
    /// subscription is dropped.
    fn register(
        &mut self,
        sensor: &SensorInfo,
        rate: SamplingRate,
        sink: Sender<Envelope>,
    ) -> Result<Subscription, SensorError>;
}

/// Stop request as seen from inside a worker.
pub struct StopSignal(Receiver<()>);

impl StopSignal {
    /// Sleep for up to `timeout`. Returns `true` if the worker must stop.
    pub fn wait(&self, timeout: Duration) -> bool {
        !matches!(self.0.recv_timeout(timeout), Err(RecvTimeoutError::Timeout))
    }

    /// Non-blocking check. Returns `true` if the worker must stop.
    pub fn is_raised(&self) -> bool {
        !matches!(self.0.try_recv(), Err(TryRecvError::Empty))
    }
}

/// Handle to a running worker. Dropping it stops and joins the worker.
pub struct Subscription {
    generation: u64,
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Spawn a named worker thread running `body`.
    pub fn spawn<F>(generation: u64, name: &str, body: F) -> Result<Self, SensorError>
    where
        F: FnOnce(StopSignal) + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name(format!("{}-{}", name, generation))
            .spawn(move || body(StopSignal(stop_rx)))?;
        debug!("subscription {} started ({})", generation, name);
        Ok(Self {
            generation,
            stop: Some(stop_tx),
            worker: Some(worker),
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `true` once the worker returned on its own (stream closed or failed).
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(|w| w.is_finished())
    }

    /// Stop the worker and wait for it to exit.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // disconnecting the channel is the stop request
        drop(self.stop.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("sensor worker {} panicked", self.generation);
            } else {
                debug!("subscription {} stopped", self.generation);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.shutdown();
    }
}
