//! src/session.rs
//!
//! Per-run visualization state: the selected sensor configuration, one
//! smoother and one strip chart per axis, and the status readout.
//!
//! A `Session` is owned by the UI thread only. Sensor samples, timer ticks and
//! viewport changes all reach it as plain method calls from the event loop, so
//! chart writes and chart reads can never interleave.

use std::time::{Duration, Instant};

use log::{info, trace, warn};

use crate::chart::{ChartConfig, StripChart};
use crate::sensor::{Envelope, SamplingRate, SensorInfo, SensorKind, sensor_type_name};
use crate::smoother::SignalSmoother;

pub const AXES: [&str; 3] = ["X", "Y", "Z"];

/// How long a notice stays in the status panel.
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Shown when a sensor's type id is not in the name table.
pub const UNKNOWN_TYPE_NAME: &str = "<unknown>";

/// What the user picked from the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub kind: SensorKind,
    pub rate: SamplingRate,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            kind: SensorKind::Accelerometer,
            rate: SamplingRate::Normal,
        }
    }
}

/// Readout refreshed from incoming samples.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Status {
    pub accuracy: i32,
    /// time between the last two samples, in microseconds
    pub interval_us: Option<i64>,
    pub samples: u64,
    prev_timestamp_ns: Option<i64>,
}

impl Status {
    fn record(&mut self, timestamp_ns: i64, accuracy: i32) {
        self.accuracy = accuracy;
        if let Some(prev) = self.prev_timestamp_ns {
            // device clocks may wrap or run backwards
            self.interval_us = Some(timestamp_ns.wrapping_sub(prev) / 1000);
        }
        self.prev_timestamp_ns = Some(timestamp_ns);
        self.samples += 1;
    }

    /// Forget the timestamp baseline; a new source starts its own clock.
    fn rebase(&mut self) {
        self.prev_timestamp_ns = None;
        self.interval_us = None;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub text: String,
    pub until: Instant,
}

/// The sensor currently feeding the session.
#[derive(Clone, Debug)]
pub struct Attached {
    pub sensor: SensorInfo,
    pub type_name: &'static str,
    pub generation: u64,
}

pub struct Session {
    config: SessionConfig,
    smoothers: [SignalSmoother; 3],
    raw: [f32; 3],
    charts: [StripChart; 3],
    status: Status,
    attached: Option<Attached>,
    notice: Option<Notice>,
    dirty: bool,
}

impl Session {
    pub fn new(config: SessionConfig, chart: &ChartConfig, alpha: f32) -> Self {
        Self {
            config,
            smoothers: [SignalSmoother::new(alpha); 3],
            raw: [0.0; 3],
            charts: [
                StripChart::new(chart.clone()),
                StripChart::new(chart.clone()),
                StripChart::new(chart.clone()),
            ],
            status: Status::default(),
            attached: None,
            notice: None,
            dirty: true,
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn charts(&self) -> &[StripChart; 3] {
        &self.charts
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn attached(&self) -> Option<&Attached> {
        self.attached.as_ref()
    }

    /// Latest raw values, one per axis.
    pub fn raw(&self) -> [f32; 3] {
        self.raw
    }

    /// Latest smoothed values, one per axis.
    pub fn filtered(&self) -> [f32; 3] {
        [
            self.smoothers[0].value(),
            self.smoothers[1].value(),
            self.smoothers[2].value(),
        ]
    }

    /// Start accepting samples of `generation` from `sensor`.
    pub fn attach(&mut self, sensor: SensorInfo, generation: u64) {
        let type_name = sensor_type_name(sensor.type_id).unwrap_or_else(|| {
            warn!(
                "no name for sensor type {} ({}), using placeholder",
                sensor.type_id, sensor.name
            );
            UNKNOWN_TYPE_NAME
        });
        info!(
            "attached {} [{}] generation {}",
            sensor.name, type_name, generation
        );
        self.status.rebase();
        self.attached = Some(Attached {
            sensor,
            type_name,
            generation,
        });
        self.dirty = true;
    }

    /// Stop accepting samples; anything still in flight is dropped.
    pub fn detach(&mut self) {
        if let Some(a) = self.attached.take() {
            info!("detached generation {}", a.generation);
        }
        self.dirty = true;
    }

    pub fn select_kind(&mut self, kind: SensorKind) -> bool {
        if self.config.kind == kind {
            return false;
        }
        self.config.kind = kind;
        self.dirty = true;
        true
    }

    pub fn cycle_rate(&mut self) -> SamplingRate {
        self.config.rate = self.config.rate.next();
        self.dirty = true;
        self.config.rate
    }

    /// Feed one sensor reading through the smoothers.
    ///
    /// Returns `false` when the sample belongs to a subscription that is no
    /// longer attached.
    pub fn on_sample(&mut self, envelope: Envelope) -> bool {
        let current = self.attached.as_ref().map(|a| a.generation);
        if current != Some(envelope.generation) {
            trace!("dropping sample of stale generation {}", envelope.generation);
            return false;
        }
        let sample = envelope.sample;
        for (axis, &raw) in sample.values.iter().enumerate() {
            self.raw[axis] = raw;
            self.smoothers[axis].update(raw);
        }
        self.status.record(sample.timestamp_ns, sample.accuracy);
        true
    }

    /// Push the latest (raw, filtered) pair of every axis into its chart.
    pub fn on_tick(&mut self, now: Instant) {
        for (axis, chart) in self.charts.iter_mut().enumerate() {
            chart.append(self.raw[axis], self.smoothers[axis].value());
        }
        if self.notice.as_ref().is_some_and(|n| n.until <= now) {
            self.notice = None;
        }
        self.dirty = true;
    }

    /// Resize each axis chart to its viewport, given in pixels.
    pub fn on_resize(&mut self, viewports: [(u32, u32); 3]) {
        for (chart, (w, h)) in self.charts.iter_mut().zip(viewports) {
            chart.resize(w, h);
        }
        self.dirty = true;
    }

    pub fn notify(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            text: text.into(),
            until: now + NOTICE_DURATION,
        });
        self.dirty = true;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether anything changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        let mut dirty = std::mem::replace(&mut self.dirty, false);
        for chart in self.charts.iter_mut() {
            dirty |= chart.take_dirty();
        }
        dirty
    }
}
