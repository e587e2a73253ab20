//! src/chart/strip.rs
//!
//! Scrolling strip chart: one ring buffer of (raw, filtered) pairs mapped onto
//! a fixed pixel grid.
//!
//! The newest sample is always at the right edge. Each `append` shifts the
//! whole trace one column to the left by moving the cursor instead of the data,
//! so appends are O(1) and a render walks the buffer once from the oldest slot.
//!
//! # Sizing
//! `resize` recomputes the geometry. The buffer only grows: when the viewport
//! needs fewer samples than are allocated, the larger allocation is kept and
//! only `samples` slots take part in wrapping. Shrinking and regrowing up to
//! the old size therefore keeps history, while growing past it starts over
//! from a zeroed buffer.

use log::debug;

use super::config::ChartConfig;
use super::geometry::Geometry;
use super::ring::{RingBuffer, Sample};
use super::surface::{Point, Stroke, Surface};

#[derive(Debug)]
pub struct StripChart {
    config: ChartConfig,
    buffer: RingBuffer,
    geometry: Option<Geometry>,
    dirty: bool,
}

impl StripChart {
    /// Create a chart with `config.initial_capacity` zeroed slots and no geometry yet.
    pub fn new(config: ChartConfig) -> Self {
        Self {
            buffer: RingBuffer::new(config.initial_capacity),
            config,
            geometry: None,
            dirty: true,
        }
    }

    pub fn buffer(&self) -> &RingBuffer {
        &self.buffer
    }

    /// Adapt to a new `width` x `height` pixel viewport.
    ///
    /// # Arguments
    /// * `width` - canvas width in pixels.
    /// * `height` - canvas height in pixels.
    ///
    /// # Returns
    /// `true` when the buffer had to be reallocated and history was lost.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let geometry = Geometry::for_viewport(width, height, &self.config);
        let reallocated = self.buffer.set_active(geometry.samples);
        debug!(
            "chart resize {}x{}: samples={} capacity={} cursor={} reallocated={}",
            width,
            height,
            geometry.samples,
            self.buffer.capacity(),
            self.buffer.cursor(),
            reallocated
        );
        self.geometry = Some(geometry);
        self.dirty = true;
        reallocated
    }

    /// Record the next sample pair. Drawing happens on the next frame.
    pub fn append(&mut self, raw: f32, filtered: f32) {
        self.buffer.push(Sample::new(raw, filtered));
        self.dirty = true;
    }

    /// Clear the dirty flag, returning its previous value.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Draw grid, frame and both traces. Does not touch the chart state.
    ///
    /// # Arguments
    /// * `surface` - drawing target in screen space (y grows downwards).
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let Some(g) = self.geometry.as_ref() else {
            return;
        };
        if g.is_empty() {
            return;
        }
        let width = g.usable_width as f64;
        let height = g.height as f64;

        for y in g.horizontal_grid() {
            let y = y as f64;
            surface.line(Point::new(0.0, y), Point::new(width, y), Stroke::Grid);
        }
        for x in g.vertical_grid() {
            let x = x as f64;
            surface.line(Point::new(x, 0.0), Point::new(x, height), Stroke::Grid);
        }

        let origin = g.origin as f64;
        surface.line(
            Point::new(0.0, origin),
            Point::new(width, origin),
            Stroke::Axis,
        );
        surface.rect(Point::new(1.0, 1.0), Point::new(width, height), Stroke::Axis);

        self.trace(g, surface, Stroke::Raw, |s| s.raw);
        self.trace(g, surface, Stroke::Filtered, |s| s.filtered);
    }

    fn trace<S, F>(&self, g: &Geometry, surface: &mut S, stroke: Stroke, value: F)
    where
        S: Surface + ?Sized,
        F: Fn(&Sample) -> f32,
    {
        let ys: Vec<f64> = self.buffer.chronological().map(|s| g.y(value(&s))).collect();
        for (i, pair) in ys.windows(2).enumerate() {
            surface.line(
                Point::new(g.x(i), pair[0]),
                Point::new(g.x(i + 1), pair[1]),
                stroke,
            );
        }
    }
}
