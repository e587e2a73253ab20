//! src/panels/title.rs
//!
//! Header naming the sensor currently plotted.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::session::Session;

pub struct TitlePanel<'a> {
    pub session: &'a Session,
}

impl<'a> TitlePanel<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }
}

impl crate::ui::Panel for TitlePanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let kind = self.session.config().kind;
        let mut spans = vec![Span::styled(
            kind.label(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        match self.session.attached() {
            Some(a) => spans.push(Span::raw(format!(
                "  {}  ({})",
                a.type_name, a.sensor.name
            ))),
            None => spans.push(Span::raw("  (no sensor)")),
        }
        let p = Paragraph::new(Line::from(spans))
            .block(Block::default().title("Sensor").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
