//! src/app.rs
//!
//! Live motion-sensor visualization in the terminal.
//!
//! # Top-Level Application (`app.rs`)
//!
//! Picks a sensor source, subscribes to the configured sensor and runs the UI
//! loop that feeds the session and draws it.
//!
//! ## Overview
//! The application:
//! - Reads accelerometer, gyroscope or magnetometer samples from a simulated
//!   device or a serial-attached board.
//! - Smooths every axis with an exponential low-pass filter.
//! - Plots raw (blue) and smoothed (red) traces of x, y and z as scrolling
//!   strip charts, newest sample at the right edge.
//!
//! # Running
//!
//! ```text
//! cargo run --release                  # defaults, or ./sensorviz.yaml if present
//! cargo run --release -- my-board.yaml # explicit config file
//! RUST_LOG=debug cargo run             # more detail in sensorviz.log
//! ```
//!
//! # Keyboard Controls
//!
//! - **r**: Cycle the sampling rate hint: fastest, game, ui, normal.
//! - **a** / **1**: Accelerometer.
//! - **g** / **2**: Gyroscope.
//! - **m** / **3**: Magnetic field.
//! - **q** / **Esc** / **Ctrl-C**: Quit and restore the terminal.
//!
//! Selecting the kind already shown does nothing. Selecting a kind the device
//! does not have shows a notice in the Info panel and keeps the current sensor.
//!
//! # Event Loop
//!
//! Sensor workers only push samples into a channel. This loop is the only code
//! touching the session: it drains the channel, fires the 20 ms refresh tick,
//! forwards key presses and terminal resizes, and redraws when something
//! changed. Blocking waits are bounded by the next tick.

use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use color_eyre::eyre::{Result, WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, warn};
use ratatui::{DefaultTerminal, Frame, layout::Rect};

use crate::config::{AppConfig, SourceKind};
use crate::controller::{Controller, Message};
use crate::panels::menu::KIND_KEYS;
use crate::panels::{ChartPanel, MenuPanel, StatusPanel, TitlePanel, chart::viewport_pixels};
use crate::sensor::{Envelope, SensorError, SensorManager, SerialSensors, SimulatedSensors};
use crate::session::{AXES, Session};
use crate::timer::Ticker;
use crate::ui::{Panel, ScreenLayout};

pub fn run(config: AppConfig) -> Result<()> {
    let manager: Box<dyn SensorManager> = match config.sensor.source {
        SourceKind::Simulated => Box::new(SimulatedSensors::new(config.sensor.simulated.clone())),
        SourceKind::Serial => Box::new(SerialSensors::new(config.sensor.serial.clone())),
    };
    let session = Session::new(config.session(), &config.chart, config.smoothing.alpha);
    let (tx, rx) = mpsc::channel();
    let mut controller = Controller::new(manager, session, tx);

    if !start(&mut controller)? {
        return Ok(());
    }
    info!("started with {:?}", config.session());

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut controller, &rx, config.refresh_period());
    ratatui::restore();
    controller.handle(Message::Quit);
    result
}

/// Subscribe to the configured sensor before the terminal is taken over.
///
/// # Returns
/// `Ok(false)` when the device lacks the configured kind: the user has been
/// told on stderr and the app should exit cleanly. Any other failure (a serial
/// port that cannot be opened, a worker that cannot be spawned) is an error.
fn start(controller: &mut Controller) -> Result<bool> {
    match controller.start() {
        Ok(()) => Ok(true),
        Err(e @ SensorError::Unavailable(_)) => {
            warn!("startup aborted: {}", e);
            eprintln!("sensorviz: {}", e);
            Ok(false)
        }
        Err(e) => Err(e).wrap_err("could not start the sensor"),
    }
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    controller: &mut Controller,
    samples: &Receiver<Envelope>,
    period: Duration,
) -> Result<()> {
    let size = terminal.size()?;
    controller.handle(Message::Resize(chart_viewports(Rect::new(
        0,
        0,
        size.width,
        size.height,
    ))));
    let mut ticker = Ticker::new(period, Instant::now());

    while controller.is_running() {
        for envelope in samples.try_iter() {
            controller.handle(Message::Sample(envelope));
        }

        let now = Instant::now();
        if ticker.poll(now) {
            controller.handle(Message::Tick(now));
        }

        if controller.session_mut().take_dirty() {
            let session = controller.session();
            terminal.draw(|f| draw(f, session, now))?;
        }

        if event::poll(ticker.timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(msg) = key_message(key, Instant::now()) {
                        controller.handle(msg);
                    }
                }
                Event::Resize(w, h) => {
                    controller.handle(Message::Resize(chart_viewports(Rect::new(0, 0, w, h))));
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// Pixel viewports of the three chart panels for a terminal of `area`.
pub fn chart_viewports(area: Rect) -> [(u32, u32); 3] {
    ScreenLayout::split(area).charts.map(viewport_pixels)
}

/// Translate a key press into a controller message.
pub fn key_message(key: KeyEvent, now: Instant) -> Option<Message> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Message::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        KeyCode::Char('r') => Some(Message::CycleRate(now)),
        KeyCode::Char(c) => KIND_KEYS
            .iter()
            .enumerate()
            .find(|(i, (k, _))| *k == c || char::from_digit(*i as u32 + 1, 10) == Some(c))
            .map(|(_, (_, kind))| Message::SelectKind(*kind, now)),
        _ => None,
    }
}

fn draw(f: &mut Frame<'_>, session: &Session, now: Instant) {
    let layout = ScreenLayout::split(f.area());

    TitlePanel::new(session).draw(f, layout.title);
    StatusPanel::new(session, now).draw(f, layout.status);

    let unit = session.config().kind.unit();
    let raw = session.raw();
    let filtered = session.filtered();
    for (axis, (chart, area)) in session.charts().iter().zip(layout.charts).enumerate() {
        ChartPanel::new(AXES[axis], unit, chart, (raw[axis], filtered[axis])).draw(f, area);
    }

    MenuPanel::new(session.config()).draw(f, layout.menu);
}
