//! src/sensor/serial.rs
//!
//! Motion sensors attached over a serial port (e.g. a microcontroller board
//! streaming its IMU readings as text).
//!
//! # Line protocol
//! One reading per line, whitespace separated:
//! ```text
//! <TAG> <x> <y> <z> [timestamp_ns] [accuracy]
//! ACC 0.12 -0.40 9.79
//! GYR 0.01 0.02 -0.15 1234567890 3
//! ```
//! `TAG` is `ACC`, `GYR` or `MAG`. Readings of other kinds than the subscribed
//! one are ignored, unparsable lines are skipped.

use std::io::{self, BufRead, BufReader, ErrorKind};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use super::{
    Envelope, SamplingRate, SensorError, SensorInfo, SensorKind, SensorManager, SensorSample,
    Subscription,
};

/// Accuracy assumed when a line does not carry one.
pub const DEFAULT_ACCURACY: i32 = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,

    /// Kinds the attached device streams.
    pub kinds: Vec<SensorKind>,

    /// Read timeout; bounds how long a stop request may take to be noticed.
    pub timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyACM0".to_string(),
            baud_rate: 115_200,
            kinds: vec![SensorKind::Accelerometer],
            timeout_ms: 100,
        }
    }
}

/// One decoded protocol line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParsedLine {
    pub kind: SensorKind,
    pub values: [f32; 3],
    pub timestamp_ns: Option<i64>,
    pub accuracy: Option<i32>,
}

/// Parse a protocol line. Returns `None` for anything that is not a reading.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let mut parts = line.split_whitespace();
    let kind = SensorKind::from_tag(parts.next()?)?;
    let mut values = [0.0f32; 3];
    for v in values.iter_mut() {
        *v = parts.next()?.parse().ok()?;
    }
    let timestamp_ns = match parts.next() {
        Some(p) => Some(p.parse().ok()?),
        None => None,
    };
    let accuracy = match parts.next() {
        Some(p) => Some(p.parse().ok()?),
        None => None,
    };
    Some(ParsedLine {
        kind,
        values,
        timestamp_ns,
        accuracy,
    })
}

pub struct SerialSensors {
    config: SerialConfig,
    next_generation: u64,
}

impl SerialSensors {
    pub fn new(config: SerialConfig) -> Self {
        Self {
            config,
            next_generation: 1,
        }
    }
}

impl SensorManager for SerialSensors {
    fn default_sensor(&self, kind: SensorKind) -> Option<SensorInfo> {
        self.config.kinds.contains(&kind).then(|| SensorInfo {
            kind,
            type_id: kind.type_id(),
            name: format!("{} on {}", kind.label(), self.config.port),
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
        let port_name = self.config.port.clone();
        let port = serialport::new(&port_name, self.config.baud_rate)
            .timeout(Duration::from_millis(self.config.timeout_ms))
            .open()
            .map_err(|source| SensorError::Open {
                port: port_name.clone(),
                source,
            })?;
        info!(
            "serial {} opened on {} @ {} baud (rate hint {} left to the device)",
            sensor.kind,
            port_name,
            self.config.baud_rate,
            rate.label()
        );

        let generation = self.next_generation;
        self.next_generation += 1;
        let kind = sensor.kind;

        Subscription::spawn(generation, "serial-sensor", move |stop| {
            let start = Instant::now();
            let mut lines = LineReader::new(BufReader::new(port));
            while !stop.is_raised() {
                let line = match lines.next_line() {
                    Ok(ReadOutcome::Line(line)) => line,
                    Ok(ReadOutcome::Invalid(bytes)) => {
                        debug!("skipping non-text serial line ({} bytes)", bytes.len());
                        continue;
                    }
                    Ok(ReadOutcome::Pending) => continue,
                    Ok(ReadOutcome::Closed) => {
                        info!("serial port {} closed", port_name);
                        break;
                    }
                    Err(e) => {
                        warn!("error reading serial port {}: {}", port_name, e);
                        break;
                    }
                };
                let Some(parsed) = parse_line(&line) else {
                    debug!("skipping serial line {:?}", line);
                    continue;
                };
                if parsed.kind != kind {
                    continue;
                }
                let sample = SensorSample {
                    values: parsed.values,
                    timestamp_ns: parsed
                        .timestamp_ns
                        .unwrap_or_else(|| start.elapsed().as_nanos() as i64),
                    accuracy: parsed.accuracy.unwrap_or(DEFAULT_ACCURACY),
                };
                trace!(
                    "x={}, y={}, z={}",
                    sample.values[0], sample.values[1], sample.values[2]
                );
                if sink.send(Envelope { generation, sample }).is_err() {
                    break;
                }
            }
        })
    }
}

/// Result of one read attempt on the port.
#[derive(Debug, PartialEq)]
pub enum ReadOutcome {
    /// A complete line, trimmed.
    Line(String),
    /// A complete line that is not UTF-8 (boot noise, baud mismatch).
    Invalid(Vec<u8>),
    /// The read timed out before a newline arrived.
    Pending,
    /// End of stream.
    Closed,
}

/// Splits a byte stream into lines.
///
/// Bytes read before a timeout stay buffered until the rest of the line
/// arrives, even when the timeout cut a multi-byte character in half.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
        }
    }

    /// Read until the next newline, timeout or end of stream.
    ///
    /// # Returns
    /// The outcome of the read. Only I/O failures other than timeouts and
    /// interrupts are reported as errors.
    pub fn next_line(&mut self) -> io::Result<ReadOutcome> {
        match self.inner.read_until(b'\n', &mut self.buf) {
            Ok(0) => Ok(ReadOutcome::Closed),
            Ok(_) => {
                let bytes = std::mem::take(&mut self.buf);
                Ok(match String::from_utf8(bytes) {
                    Ok(text) => ReadOutcome::Line(text.trim().to_string()),
                    Err(e) => ReadOutcome::Invalid(e.into_bytes()),
                })
            }
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted) => {
                Ok(ReadOutcome::Pending)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::{Cursor, Read};
    use std::sync::mpsc;

    /// Port stand-in that hands out scripted chunks and timeouts.
    struct Scripted(VecDeque<io::Result<Vec<u8>>>);

    impl Scripted {
        fn new(steps: Vec<io::Result<&[u8]>>) -> Self {
            Self(steps.into_iter().map(|s| s.map(<[u8]>::to_vec)).collect())
        }
    }

    impl Read for Scripted {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                None => Ok(0),
                Some(Err(e)) => Err(e),
                Some(Ok(chunk)) => {
                    out[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                }
            }
        }
    }

    fn chunk(bytes: &'static [u8]) -> io::Result<&'static [u8]> {
        Ok(bytes)
    }

    fn timeout() -> io::Result<&'static [u8]> {
        Err(io::Error::new(ErrorKind::TimedOut, "timed out"))
    }

    #[test]
    fn test_parse_minimal_line() {
        let p = parse_line("ACC 0.5 -1.25 9.75").unwrap();
        assert_eq!(p.kind, SensorKind::Accelerometer);
        assert_eq!(p.values, [0.5, -1.25, 9.75]);
        assert_eq!(p.timestamp_ns, None);
        assert_eq!(p.accuracy, None);
    }

    #[test]
    fn test_parse_full_line() {
        let p = parse_line("  mag 10 20 -30 123456789 2 ").unwrap();
        assert_eq!(p.kind, SensorKind::MagneticField);
        assert_eq!(p.timestamp_ns, Some(123_456_789));
        assert_eq!(p.accuracy, Some(2));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("booting..."), None);
        assert_eq!(parse_line("GYR 1.0 2.0"), None);
        assert_eq!(parse_line("GYR 1.0 x 2.0"), None);
        assert_eq!(parse_line("ACC 1 2 3 soon"), None);
    }

    #[test]
    fn test_declared_kinds_only() {
        let sensors = SerialSensors::new(SerialConfig::default());
        assert!(sensors.default_sensor(SensorKind::Accelerometer).is_some());
        assert!(sensors.default_sensor(SensorKind::Gyroscope).is_none());
    }

    #[test]
    fn test_missing_port_is_an_open_error() {
        let mut sensors = SerialSensors::new(SerialConfig {
            port: "/dev/sensorviz-does-not-exist".to_string(),
            ..SerialConfig::default()
        });
        let info = sensors.default_sensor(SensorKind::Accelerometer).unwrap();
        let (tx, _rx) = mpsc::channel();
        let err = sensors.register(&info, SamplingRate::Game, tx).err();
        assert!(matches!(err, Some(SensorError::Open { .. })));
    }

    #[test]
    fn test_non_utf8_line_is_skipped_and_stream_continues() {
        let mut lines = LineReader::new(Cursor::new(
            b"ACC 1 2 3\n\xff\xfe noise\nACC 4 5 6\n".to_vec(),
        ));
        assert_eq!(
            lines.next_line().unwrap(),
            ReadOutcome::Line("ACC 1 2 3".to_string())
        );
        assert!(matches!(lines.next_line().unwrap(), ReadOutcome::Invalid(_)));
        let next = lines.next_line().unwrap();
        assert_eq!(next, ReadOutcome::Line("ACC 4 5 6".to_string()));
        assert_eq!(lines.next_line().unwrap(), ReadOutcome::Closed);
    }

    #[test]
    fn test_timeout_keeps_partial_line() {
        let port = Scripted::new(vec![chunk(b"GYR 0.5 "), timeout(), chunk(b"1.5 2.5\n")]);
        let mut lines = LineReader::new(BufReader::new(port));
        assert_eq!(lines.next_line().unwrap(), ReadOutcome::Pending);
        let line = match lines.next_line().unwrap() {
            ReadOutcome::Line(line) => line,
            other => panic!("expected a line, got {:?}", other),
        };
        assert_eq!(parse_line(&line).map(|p| p.values), Some([0.5, 1.5, 2.5]));
    }

    #[test]
    fn test_timeout_inside_multibyte_character() {
        // "é" is 0xC3 0xA9
        let port = Scripted::new(vec![chunk(b"caf\xc3"), timeout(), chunk(b"\xa9\n")]);
        let mut lines = LineReader::new(BufReader::new(port));
        assert_eq!(lines.next_line().unwrap(), ReadOutcome::Pending);
        assert_eq!(lines.next_line().unwrap(), ReadOutcome::Line("café".to_string()));
    }

    #[test]
    fn test_hard_read_error_is_reported() {
        let port = Scripted::new(vec![Err(io::Error::new(ErrorKind::BrokenPipe, "gone"))]);
        let mut lines = LineReader::new(BufReader::new(port));
        assert_eq!(
            lines.next_line().map_err(|e| e.kind()).err(),
            Some(ErrorKind::BrokenPipe)
        );
    }
}
