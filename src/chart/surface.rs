//! src/chart/surface.rs
//!
//! Minimal drawing surface the strip chart renders onto.
//!
//! Coordinates are screen pixels with the origin in the top-left corner and y
//! growing downwards. Backends translate them into whatever their canvas uses.

/// A point in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Logical pen; the backend decides colour and weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stroke {
    /// background grid lines
    Grid,
    /// zero line and border
    Axis,
    /// raw signal trace
    Raw,
    /// smoothed signal trace
    Filtered,
}

pub trait Surface {
    fn line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// Outline (not filled) rectangle spanning the two corners.
    fn rect(&mut self, top_left: Point, bottom_right: Point, stroke: Stroke);
}
