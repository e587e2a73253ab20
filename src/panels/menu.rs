//! src/panels/menu.rs
//!
//! Key bindings, rendered like an options menu: the current sensor kind is
//! shown disabled and the rate entry carries the active rate.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::sensor::SensorKind;
use crate::session::SessionConfig;

/// Key bound to each kind, in menu order.
pub const KIND_KEYS: [(char, SensorKind); 3] = [
    ('a', SensorKind::Accelerometer),
    ('g', SensorKind::Gyroscope),
    ('m', SensorKind::MagneticField),
];

pub struct MenuPanel {
    pub config: SessionConfig,
}

impl MenuPanel {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    fn items(&self) -> Vec<Span<'static>> {
        let key = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let disabled = Style::default().fg(Color::DarkGray);

        let mut spans = vec![
            Span::styled("R", key),
            Span::raw(format!("=Rate ({})  ", self.config.rate.label())),
        ];
        for (i, (c, kind)) in KIND_KEYS.iter().enumerate() {
            let label = format!("{}/{}={}  ", c.to_ascii_uppercase(), i + 1, kind.label());
            if *kind == self.config.kind {
                spans.push(Span::styled(label, disabled));
            } else {
                spans.push(Span::styled(label, Style::default()));
            }
        }
        spans.push(Span::styled("Q", key));
        spans.push(Span::raw("=Quit"));
        spans
    }
}

impl crate::ui::Panel for MenuPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let p = Paragraph::new(Line::from(self.items()))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Controls").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
