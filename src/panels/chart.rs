//! src/panels/chart.rs
//!
//! Chart panel: draws one axis' strip chart onto a Braille canvas.
//!
//! Each terminal cell holds 2 x 4 Braille dots, so the chart's pixel viewport
//! is twice the inner width and four times the inner height of the panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders,
        canvas::{Canvas, Context, Line as CanvasLine, Rectangle},
    },
};

use crate::chart::{Point, Stroke, StripChart, Surface};

/// Braille dots per cell, horizontally and vertically.
pub const DOTS_PER_CELL: (u32, u32) = (2, 4);

pub fn stroke_color(stroke: Stroke) -> Color {
    match stroke {
        Stroke::Grid => Color::DarkGray,
        Stroke::Axis => Color::Gray,
        Stroke::Raw => Color::Blue,
        Stroke::Filtered => Color::Red,
    }
}

fn chart_block<'a>(title: Line<'a>) -> Block<'a> {
    Block::default().title(title).borders(Borders::ALL)
}

/// Pixel size of the canvas a chart panel placed in `area` draws on.
pub fn viewport_pixels(area: Rect) -> (u32, u32) {
    let inner = chart_block(Line::default()).inner(area);
    (
        inner.width as u32 * DOTS_PER_CELL.0,
        inner.height as u32 * DOTS_PER_CELL.1,
    )
}

/// Adapts the chart's y-down screen space to the canvas' y-up coordinates.
struct CanvasSurface<'a, 'b> {
    ctx: &'a mut Context<'b>,
    height: f64,
}

impl Surface for CanvasSurface<'_, '_> {
    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.ctx.draw(&CanvasLine::new(
            from.x,
            self.height - from.y,
            to.x,
            self.height - to.y,
            stroke_color(stroke),
        ));
    }

    fn rect(&mut self, top_left: Point, bottom_right: Point, stroke: Stroke) {
        self.ctx.draw(&Rectangle {
            x: top_left.x,
            y: self.height - bottom_right.y,
            width: bottom_right.x - top_left.x,
            height: bottom_right.y - top_left.y,
            color: stroke_color(stroke),
        });
    }
}

pub struct ChartPanel<'a> {
    pub axis: &'a str,
    pub unit: &'a str,
    pub chart: &'a StripChart,
    pub latest: (f32, f32),
}

impl<'a> ChartPanel<'a> {
    pub fn new(axis: &'a str, unit: &'a str, chart: &'a StripChart, latest: (f32, f32)) -> Self {
        Self {
            axis,
            unit,
            chart,
            latest,
        }
    }

    fn title(&self) -> Line<'a> {
        Line::from(vec![
            Span::raw(format!(" {} [{}]  ", self.axis, self.unit)),
            Span::styled(
                format!("raw {:+.3}", self.latest.0),
                Style::default().fg(stroke_color(Stroke::Raw)),
            ),
            Span::raw("  "),
            Span::styled(
                format!("smoothed {:+.3} ", self.latest.1),
                Style::default().fg(stroke_color(Stroke::Filtered)),
            ),
        ])
    }
}

impl crate::ui::Panel for ChartPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let (width, height) = viewport_pixels(area);
        let chart = self.chart;
        let h = height as f64;
        let canvas = Canvas::default()
            .block(chart_block(self.title()))
            .marker(Marker::Braille)
            .x_bounds([0.0, width as f64])
            .y_bounds([0.0, h])
            .paint(move |ctx| {
                let mut surface = CanvasSurface { ctx, height: h };
                chart.render(&mut surface);
            });
        f.render_widget(canvas, area);
    }
}
