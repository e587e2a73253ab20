/// End-to-end tests driving the controller the way the UI loop does:
/// sensor samples, timer ticks, resizes and menu selections, then rendering
/// the charts onto a recording surface.

#[cfg(test)]
mod integration_tests {
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use crate::chart::surface::recording::RecordingSurface;
    use crate::chart::{ChartConfig, Stroke};
    use crate::controller::{Controller, Message};
    use crate::sensor::{
        Envelope, SamplingRate, SensorError, SensorInfo, SensorKind, SensorManager,
        SensorSample, SimulatedConfig, SimulatedSensors, Subscription,
    };
    use crate::session::{Session, SessionConfig};

    type Registrations = Arc<Mutex<Vec<(SensorKind, SamplingRate, u64)>>>;

    /// Manager whose workers deliver nothing; tests inject samples by hand.
    struct FakeSensors {
        kinds: Vec<SensorKind>,
        /// workers return immediately, as if the device went away
        short_lived: bool,
        registrations: Registrations,
        next_generation: u64,
    }

    impl SensorManager for FakeSensors {
        fn default_sensor(&self, kind: SensorKind) -> Option<SensorInfo> {
            self.kinds.contains(&kind).then(|| SensorInfo {
                kind,
                type_id: kind.type_id(),
                name: format!("fake {}", kind),
            })
        }

        fn register(
            &mut self,
            sensor: &SensorInfo,
            rate: SamplingRate,
            _sink: Sender<Envelope>,
        ) -> Result<Subscription, SensorError> {
            let generation = self.next_generation;
            self.next_generation += 1;
            self.registrations
                .lock()
                .unwrap()
                .push((sensor.kind, rate, generation));
            let short_lived = self.short_lived;
            Subscription::spawn(generation, "fake-sensor", move |stop| {
                if short_lived {
                    return;
                }
                while !stop.wait(Duration::from_millis(10)) {}
            })
        }
    }

    fn controller(kinds: Vec<SensorKind>) -> (Controller, Registrations, Receiver<Envelope>) {
        let registrations = Registrations::default();
        let manager = FakeSensors {
            kinds,
            registrations: registrations.clone(),
            short_lived: false,
            next_generation: 1,
        };
        let session = Session::new(SessionConfig::default(), &ChartConfig::default(), 0.75);
        let (tx, rx) = mpsc::channel();
        (
            Controller::new(Box::new(manager), session, tx),
            registrations,
            rx,
        )
    }

    fn sample(generation: u64, values: [f32; 3], timestamp_ns: i64) -> Message {
        Message::Sample(Envelope {
            generation,
            sample: SensorSample {
                values,
                timestamp_ns,
                accuracy: 3,
            },
        })
    }

    #[test]
    fn test_startup_subscribes_configured_sensor() {
        let (mut c, regs, _rx) = controller(SensorKind::ALL.to_vec());
        c.start().unwrap();
        assert!(c.session().attached().is_some());
        assert_eq!(
            *regs.lock().unwrap(),
            vec![(SensorKind::Accelerometer, SamplingRate::Normal, 1)]
        );
        assert_eq!(c.session().attached().map(|a| a.type_name), Some("TYPE_ACCELEROMETER"));
    }

    #[test]
    fn test_startup_fails_when_kind_missing() {
        let (mut c, regs, _rx) = controller(vec![SensorKind::Gyroscope]);
        assert!(matches!(
            c.start(),
            Err(SensorError::Unavailable(SensorKind::Accelerometer))
        ));
        assert!(c.session().attached().is_none());
        assert!(regs.lock().unwrap().is_empty());
    }

    #[test]
    fn test_rate_change_resubscribes_and_drops_stale_samples() {
        let (mut c, regs, _rx) = controller(SensorKind::ALL.to_vec());
        c.start().unwrap();
        c.handle(sample(1, [8.0, 0.0, 0.0], 0));
        let before = c.session().filtered();

        c.handle(Message::CycleRate(Instant::now()));
        assert_eq!(
            regs.lock().unwrap().last().copied(),
            Some((SensorKind::Accelerometer, SamplingRate::Fastest, 2))
        );

        // in flight from the old subscription
        c.handle(sample(1, [100.0, 100.0, 100.0], 10));
        assert_eq!(c.session().filtered(), before);

        // smoothing state survives the switch
        c.handle(sample(2, [8.0, 0.0, 0.0], 20));
        assert_eq!(c.session().filtered()[0], 0.75 * before[0] + 0.25 * 8.0);
    }

    #[test]
    fn test_kind_switch() {
        let (mut c, regs, _rx) = controller(SensorKind::ALL.to_vec());
        c.start().unwrap();
        let now = Instant::now();

        c.handle(Message::SelectKind(SensorKind::Accelerometer, now));
        assert_eq!(regs.lock().unwrap().len(), 1);

        c.handle(Message::SelectKind(SensorKind::MagneticField, now));
        assert_eq!(c.session().config().kind, SensorKind::MagneticField);
        assert_eq!(
            regs.lock().unwrap().last().copied(),
            Some((SensorKind::MagneticField, SamplingRate::Normal, 2))
        );
        assert_eq!(
            c.session().attached().map(|a| a.type_name),
            Some("TYPE_MAGNETIC_FIELD")
        );
    }

    #[test]
    fn test_unavailable_kind_keeps_current_sensor() {
        let (mut c, regs, _rx) = controller(vec![SensorKind::Accelerometer]);
        c.start().unwrap();
        c.handle(Message::SelectKind(SensorKind::Gyroscope, Instant::now()));

        assert_eq!(c.session().config().kind, SensorKind::Accelerometer);
        assert_eq!(regs.lock().unwrap().len(), 1);
        assert!(c.session().attached().is_some());
        let notice = c.session().notice().map(|n| n.text.clone()).unwrap();
        assert!(notice.contains("Gyroscope"));
    }

    #[test]
    fn test_ended_stream_detaches_with_notice() {
        let manager = FakeSensors {
            kinds: SensorKind::ALL.to_vec(),
            short_lived: true,
            registrations: Registrations::default(),
            next_generation: 1,
        };
        let session = Session::new(SessionConfig::default(), &ChartConfig::default(), 0.75);
        let (tx, _rx) = mpsc::channel();
        let mut c = Controller::new(Box::new(manager), session, tx);
        c.start().unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while c.session().attached().is_some() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            c.handle(Message::Tick(Instant::now()));
        }
        assert!(c.session().attached().is_none());
        let notice = c.session().notice().map(|n| n.text.clone()).unwrap();
        assert!(notice.contains("stream ended"));
        assert!(c.is_running());
    }

    #[test]
    fn test_quit_tears_down_subscription() {
        let (mut c, _regs, _rx) = controller(SensorKind::ALL.to_vec());
        c.start().unwrap();
        c.handle(Message::Quit);
        assert!(!c.is_running());
        assert!(c.session().attached().is_none());
    }

    #[test]
    fn test_samples_ticks_and_render() {
        let (mut c, _regs, _rx) = controller(SensorKind::ALL.to_vec());
        c.start().unwrap();
        // 20 columns of 5 px: 21 samples, origin 30, scale 1
        c.handle(Message::Resize([(101, 60); 3]));

        let t0 = Instant::now();
        for i in 0..40 {
            c.handle(sample(1, [i as f32 * 0.1, -1.0, 2.0], i * 20_000_000));
            c.handle(Message::Tick(t0 + Duration::from_millis(20 * i as u64)));
        }
        assert_eq!(c.session().status().interval_us, Some(20_000));

        let raw = c.session().raw();
        let filtered = c.session().filtered();
        for (axis, chart) in c.session().charts().iter().enumerate() {
            let mut s = RecordingSurface::default();
            chart.render(&mut s);
            let raw_segments = s.lines(Stroke::Raw);
            let filtered_segments = s.lines(Stroke::Filtered);
            assert_eq!(raw_segments.len(), 20);
            assert_eq!(filtered_segments.len(), 20);

            let (_, end) = raw_segments[19];
            assert_eq!(end.x, 100.0);
            assert!((end.y - (30.0 + raw[axis] as f64)).abs() < 1e-6);
            let (_, end) = filtered_segments[19];
            assert!((end.y - (30.0 + filtered[axis] as f64)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_resize_keeps_history_within_capacity() {
        let (mut c, _regs, _rx) = controller(SensorKind::ALL.to_vec());
        c.start().unwrap();
        c.handle(Message::Resize([(101, 60); 3]));
        c.handle(sample(1, [5.0, 5.0, 5.0], 0));
        c.handle(Message::Tick(Instant::now()));

        let capacity = c.session().charts()[0].buffer().capacity();
        c.handle(Message::Resize([(51, 30); 3]));
        c.handle(Message::Resize([(101, 60); 3]));
        let chart = &c.session().charts()[0];
        assert_eq!(chart.buffer().capacity(), capacity);
        assert!(chart.buffer().chronological().any(|s| s.raw == 5.0));
    }

    #[test]
    fn test_simulated_source_feeds_session() {
        let manager = SimulatedSensors::new(SimulatedConfig {
            seed: Some(7),
            ..SimulatedConfig::default()
        });
        let session = Session::new(
            SessionConfig {
                kind: SensorKind::Accelerometer,
                rate: SamplingRate::Fastest,
            },
            &ChartConfig::default(),
            0.75,
        );
        let (tx, rx) = mpsc::channel();
        let mut c = Controller::new(Box::new(manager), session, tx);
        c.start().unwrap();

        for _ in 0..5 {
            let envelope = rx.recv_timeout(Duration::from_secs(2)).unwrap();
            c.handle(Message::Sample(envelope));
        }
        assert_eq!(c.session().status().samples, 5);
        // gravity dominates z
        assert!(c.session().raw()[2] > 8.0);
        c.handle(Message::Quit);
    }
}
