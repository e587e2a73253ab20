//! src/panels/status.rs
//!
//! Status panel: accuracy, sample interval, rate hint and transient notices.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::session::Session;

pub struct StatusPanel<'a> {
    pub session: &'a Session,
    pub now: Instant,
}

impl<'a> StatusPanel<'a> {
    pub fn new(session: &'a Session, now: Instant) -> Self {
        Self { session, now }
    }

    fn readout(&self) -> String {
        let status = self.session.status();
        let interval = status
            .interval_us
            .map(|us| format!("{} µs", us))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "accuracy={}  interval={}  rate={}  samples={}",
            status.accuracy,
            interval,
            self.session.config().rate.label(),
            status.samples
        )
    }
}

impl crate::ui::Panel for StatusPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![Span::raw(self.readout())];
        let mut block = Block::default().title("Info").borders(Borders::ALL);

        if let Some(notice) = self.session.notice().filter(|n| n.until > self.now) {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                notice.text.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            block = block.border_style(Style::default().fg(Color::Yellow));
        }

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}
