//! src/sensor/kind.rs
//!
//! Sensor kinds, sampling-rate hints and the static lookup table between kinds,
//! platform type ids and display names.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    #[default]
    Accelerometer = 0,
    Gyroscope = 1,
    MagneticField = 2,
}

/// Static description of one sensor kind.
#[derive(Debug)]
pub struct KindInfo {
    pub kind: SensorKind,
    /// platform sensor type id
    pub type_id: i32,
    /// platform constant name for `type_id`
    pub type_name: &'static str,
    pub label: &'static str,
    /// tag used by the serial line protocol
    pub tag: &'static str,
    pub unit: &'static str,
}

/// Indexed by `SensorKind as usize`.
const KINDS: [KindInfo; 3] = [
    KindInfo {
        kind: SensorKind::Accelerometer,
        type_id: 1,
        type_name: "TYPE_ACCELEROMETER",
        label: "Accelerometer",
        tag: "ACC",
        unit: "m/s²",
    },
    KindInfo {
        kind: SensorKind::Gyroscope,
        type_id: 4,
        type_name: "TYPE_GYROSCOPE",
        label: "Gyroscope",
        tag: "GYR",
        unit: "rad/s",
    },
    KindInfo {
        kind: SensorKind::MagneticField,
        type_id: 2,
        type_name: "TYPE_MAGNETIC_FIELD",
        label: "Magnetic Field",
        tag: "MAG",
        unit: "µT",
    },
];

impl SensorKind {
    pub const ALL: [SensorKind; 3] = [
        SensorKind::Accelerometer,
        SensorKind::Gyroscope,
        SensorKind::MagneticField,
    ];

    pub fn info(self) -> &'static KindInfo {
        &KINDS[self as usize]
    }

    pub fn type_id(self) -> i32 {
        self.info().type_id
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn unit(self) -> &'static str {
        self.info().unit
    }

    /// Reverse lookup of a serial protocol tag (case-insensitive).
    pub fn from_tag(tag: &str) -> Option<SensorKind> {
        KINDS
            .iter()
            .find(|k| k.tag.eq_ignore_ascii_case(tag))
            .map(|k| k.kind)
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Platform constant name for a sensor type id, `None` when unknown.
pub fn sensor_type_name(type_id: i32) -> Option<&'static str> {
    KINDS
        .iter()
        .find(|k| k.type_id == type_id)
        .map(|k| k.type_name)
}

/// How often the source should deliver samples. Only a hint: sources may
/// deliver faster or slower.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingRate {
    Fastest,
    Game,
    Ui,
    #[default]
    Normal,
}

impl SamplingRate {
    /// Cycling order of the rate menu.
    pub const ALL: [SamplingRate; 4] = [
        SamplingRate::Fastest,
        SamplingRate::Game,
        SamplingRate::Ui,
        SamplingRate::Normal,
    ];

    pub fn next(self) -> SamplingRate {
        let idx = Self::ALL.iter().position(|&r| r == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            SamplingRate::Fastest => "Fastest",
            SamplingRate::Game => "Game",
            SamplingRate::Ui => "UI",
            SamplingRate::Normal => "Normal",
        }
    }

    /// Nominal delay between samples. `Fastest` is bounded by what the
    /// simulated source can sensibly produce.
    pub fn period(self) -> Duration {
        match self {
            SamplingRate::Fastest => Duration::from_millis(5),
            SamplingRate::Game => Duration::from_micros(20_000),
            SamplingRate::Ui => Duration::from_micros(66_667),
            SamplingRate::Normal => Duration::from_micros(200_000),
        }
    }
}
