//! src/controller.rs
//!
//! The single actor that owns the session and the live sensor subscription.
//!
//! Everything that mutates visualization state arrives here as a [`Message`]
//! on the UI thread: sensor samples (forwarded from the worker channel), timer
//! ticks, viewport changes and menu selections. Changing the sensor kind or
//! rate tears the current subscription down and registers a new one; charts
//! and smoothers keep their state across the switch.

use std::sync::mpsc::Sender;
use std::time::Instant;

use log::{info, warn};

use crate::sensor::{Envelope, SensorError, SensorKind, SensorManager, Subscription};
use crate::session::Session;

#[derive(Clone, Copy, Debug)]
pub enum Message {
    Sample(Envelope),
    Tick(Instant),
    /// Chart viewports in pixels, one per axis.
    Resize([(u32, u32); 3]),
    SelectKind(SensorKind, Instant),
    CycleRate(Instant),
    Quit,
}

pub struct Controller {
    manager: Box<dyn SensorManager>,
    session: Session,
    subscription: Option<Subscription>,
    sink: Sender<Envelope>,
    running: bool,
}

impl Controller {
    pub fn new(manager: Box<dyn SensorManager>, session: Session, sink: Sender<Envelope>) -> Self {
        Self {
            manager,
            session,
            subscription: None,
            sink,
            running: true,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Subscribe to the session's configured sensor.
    pub fn start(&mut self) -> Result<(), SensorError> {
        self.subscribe()
    }

    pub fn handle(&mut self, msg: Message) {
        match msg {
            Message::Sample(envelope) => {
                self.session.on_sample(envelope);
            }
            Message::Tick(now) => {
                self.reap_finished(now);
                self.session.on_tick(now);
            }
            Message::Resize(viewports) => self.session.on_resize(viewports),
            Message::SelectKind(kind, now) => self.select_kind(kind, now),
            Message::CycleRate(now) => {
                let rate = self.session.cycle_rate();
                info!("sampling rate -> {}", rate.label());
                self.resubscribe(now);
            }
            Message::Quit => {
                self.stop();
                self.running = false;
            }
        }
    }

    fn select_kind(&mut self, kind: SensorKind, now: Instant) {
        if self.session.config().kind == kind {
            return;
        }
        if self.manager.default_sensor(kind).is_none() {
            let err = SensorError::Unavailable(kind);
            warn!("{}", err);
            self.session.notify(err.to_string(), now);
            return;
        }
        self.session.select_kind(kind);
        info!("sensor kind -> {}", kind);
        self.resubscribe(now);
    }

    /// Detach from a worker that stopped by itself so the user sees why the
    /// charts went flat.
    fn reap_finished(&mut self, now: Instant) {
        if !self.subscription.as_ref().is_some_and(Subscription::is_finished) {
            return;
        }
        let err = SensorError::Ended(self.session.config().kind);
        warn!("{}", err);
        self.session.notify(err.to_string(), now);
        self.stop();
    }

    fn resubscribe(&mut self, now: Instant) {
        self.stop();
        if let Err(e) = self.subscribe() {
            warn!("resubscribe failed: {}", e);
            self.session.notify(e.to_string(), now);
        }
    }

    fn subscribe(&mut self) -> Result<(), SensorError> {
        let config = self.session.config();
        let sensor = self
            .manager
            .default_sensor(config.kind)
            .ok_or(SensorError::Unavailable(config.kind))?;
        let subscription = self
            .manager
            .register(&sensor, config.rate, self.sink.clone())?;
        self.session.attach(sensor, subscription.generation());
        self.subscription = Some(subscription);
        Ok(())
    }

    /// Cancel the subscription; samples still queued are dropped on arrival.
    pub fn stop(&mut self) {
        self.session.detach();
        if let Some(sub) = self.subscription.take() {
            sub.cancel();
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.stop();
    }
}
