//! src/sensor/simulated.rs
//!
//! Synthetic sensors for machines without motion hardware.
//!
//! Each kind produces a slow, kind-typical waveform on every axis with uniform
//! noise on top, so the smoothed trace visibly lags and damps the raw one.

use std::f64::consts::TAU;
use std::sync::mpsc::Sender;
use std::time::Instant;

use log::{info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{
    Envelope, SamplingRate, SensorError, SensorInfo, SensorKind, SensorManager, SensorSample,
    Subscription,
};

/// Accuracy reported with every simulated sample (platform "high").
pub const SIMULATED_ACCURACY: i32 = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedConfig {
    /// Kinds the simulated device pretends to have.
    pub kinds: Vec<SensorKind>,

    /// Fixed RNG seed for reproducible noise; random when absent.
    pub seed: Option<u64>,

    /// Scale applied to each kind's default noise amplitude.
    pub noise: f32,
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        Self {
            kinds: SensorKind::ALL.to_vec(),
            seed: None,
            noise: 1.0,
        }
    }
}

/// Noise-free signal of `kind` at `t` seconds.
pub fn waveform(kind: SensorKind, t: f64) -> [f32; 3] {
    let wave = |amp: f64, hz: f64, phase: f64| amp * (TAU * hz * t + phase).sin();
    let v = match kind {
        SensorKind::Accelerometer => [
            wave(1.5, 0.7, 0.0),
            wave(0.8, 1.3, 1.0),
            9.81 + wave(0.5, 0.4, 0.0),
        ],
        SensorKind::Gyroscope => [
            wave(2.0, 0.5, 0.0),
            wave(1.2, 0.9, 0.5),
            wave(0.6, 0.3, 0.0),
        ],
        SensorKind::MagneticField => {
            let heading = TAU * 0.05 * t;
            [25.0 * heading.cos(), 25.0 * heading.sin(), -20.0]
        }
    };
    [v[0] as f32, v[1] as f32, v[2] as f32]
}

fn noise_amplitude(kind: SensorKind) -> f32 {
    match kind {
        SensorKind::Accelerometer => 0.6,
        SensorKind::Gyroscope => 0.3,
        SensorKind::MagneticField => 1.5,
    }
}

/// Waveform plus uniform noise in `[-amplitude, amplitude]`.
pub fn noisy_sample<R: Rng>(kind: SensorKind, t: f64, noise: f32, rng: &mut R) -> [f32; 3] {
    let amp = (noise_amplitude(kind) * noise).abs();
    let mut v = waveform(kind, t);
    for x in v.iter_mut() {
        *x += rng.random_range(-amp..=amp);
    }
    v
}

pub struct SimulatedSensors {
    config: SimulatedConfig,
    next_generation: u64,
}

impl SimulatedSensors {
    pub fn new(config: SimulatedConfig) -> Self {
        Self {
            config,
            next_generation: 1,
        }
    }
}

impl SensorManager for SimulatedSensors {
    fn default_sensor(&self, kind: SensorKind) -> Option<SensorInfo> {
        self.config.kinds.contains(&kind).then(|| SensorInfo {
            kind,
            type_id: kind.type_id(),
            name: format!("Simulated {}", kind.label()),
        })
    }

    fn register(
        &mut self,
        sensor: &SensorInfo,
        rate: SamplingRate,
        sink: Sender<Envelope>,
    ) -> Result<Subscription, SensorError> {
        if !self.config.kinds.contains(&sensor.kind) {
            return Err(SensorError::Unavailable(sensor.kind));
        }
        let generation = self.next_generation;
        self.next_generation += 1;

        let kind = sensor.kind;
        let noise = self.config.noise;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let period = rate.period();
        info!(
            "simulated {} registered at {} ({:?})",
            kind,
            rate.label(),
            period
        );

        Subscription::spawn(generation, "sim-sensor", move |stop| {
            let start = Instant::now();
            loop {
                let elapsed = start.elapsed();
                let values = noisy_sample(kind, elapsed.as_secs_f64(), noise, &mut rng);
                let sample = SensorSample {
                    values,
                    timestamp_ns: elapsed.as_nanos() as i64,
                    accuracy: SIMULATED_ACCURACY,
                };
                trace!("x={}, y={}, z={}", values[0], values[1], values[2]);
                if sink.send(Envelope { generation, sample }).is_err() {
                    break;
                }
                if stop.wait(period) {
                    break;
                }
            }
        })
    }
}
