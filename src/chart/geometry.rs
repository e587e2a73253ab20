//! src/chart/geometry.rs
//!
//! Viewport geometry: maps a pixel size onto the sample grid.

use super::config::ChartConfig;

/// Grid lines are drawn every this many samples / scale units.
pub const GRID_STEP: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// pixels per sample
    pub column_width: u32,

    /// viewport width truncated to a multiple of `column_width`
    pub usable_width: u32,

    /// full viewport height
    pub height: u32,

    /// samples needed to span the usable width (one per column edge)
    pub samples: usize,

    /// y coordinate of the zero line (screen space, y grows downwards)
    pub origin: u32,

    /// pixels per signal unit, never below 1
    pub scale: u32,
}

impl Geometry {
    /// Derive the geometry for a `width` x `height` pixel viewport.
    ///
    /// # Arguments
    /// * `width` - viewport width in pixels; truncated to whole columns.
    /// * `height` - viewport height in pixels; the zero line sits at half of it.
    /// * `config` - column width and the largest expected magnitude.
    ///
    /// # Returns
    /// The grid for that viewport. Origin and scale use integer division, so
    /// the scale never drops below one pixel per unit.
    pub fn for_viewport(width: u32, height: u32, config: &ChartConfig) -> Self {
        let column_width = config.column_width.max(1);
        let usable_width = (width / column_width) * column_width;
        let samples = (usable_width / column_width) as usize + 1;
        let origin = height / 2;
        let scale = if config.max_y > 0.0 {
            ((origin as f32 / config.max_y) as u32).max(1)
        } else {
            1
        };
        Self {
            column_width,
            usable_width,
            height,
            samples,
            origin,
            scale,
        }
    }

    /// Nothing can be drawn into a viewport without area.
    pub fn is_empty(&self) -> bool {
        self.usable_width == 0 || self.height == 0
    }

    /// Screen x of the `i`-th column.
    pub fn x(&self, i: usize) -> f64 {
        (i as f64) * self.column_width as f64
    }

    /// Screen y of a signal value.
    pub fn y(&self, value: f32) -> f64 {
        self.origin as f64 + self.scale as f64 * value as f64
    }

    /// Horizontal grid line positions, the origin first, then below it, then above it.
    pub fn horizontal_grid(&self) -> Vec<u32> {
        let step = (self.scale * GRID_STEP) as usize;
        let below = (self.origin..self.height).step_by(step);
        // the origin itself is already in `below`
        let above = (1..=self.origin).rev().step_by(step).skip(1);
        below.chain(above).collect()
    }

    /// Vertical grid line positions across the usable width.
    pub fn vertical_grid(&self) -> Vec<u32> {
        let step = (self.column_width * GRID_STEP) as usize;
        (0..self.usable_width).step_by(step).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_truncated_to_columns() {
        let g = Geometry::for_viewport(101, 60, &ChartConfig::default());
        assert_eq!(g.usable_width, 100);
        assert_eq!(g.samples, 21);
    }

    #[test]
    fn test_vertical_origin_and_scale() {
        let cfg = ChartConfig::default();
        let g = Geometry::for_viewport(100, 200, &cfg);
        assert_eq!(g.origin, 100);
        assert_eq!(g.scale, 3);

        // small viewports never drop below one pixel per unit
        let g = Geometry::for_viewport(100, 20, &cfg);
        assert_eq!(g.origin, 10);
        assert_eq!(g.scale, 1);
    }

    #[test]
    fn test_zero_size_viewport_is_empty() {
        let cfg = ChartConfig::default();
        assert!(Geometry::for_viewport(0, 50, &cfg).is_empty());
        assert!(Geometry::for_viewport(4, 50, &cfg).is_empty());
        assert!(Geometry::for_viewport(50, 0, &cfg).is_empty());
        assert_eq!(Geometry::for_viewport(0, 50, &cfg).samples, 1);
    }

    #[test]
    fn test_grid_positions() {
        let g = Geometry::for_viewport(60, 24, &ChartConfig::default());
        // origin 12, scale 1, step 5
        assert_eq!(g.horizontal_grid(), vec![12, 17, 22, 7, 2]);
        // column 5, step 25
        assert_eq!(g.vertical_grid(), vec![0, 25, 50]);
    }

    #[test]
    fn test_coordinate_mapping() {
        let g = Geometry::for_viewport(100, 200, &ChartConfig::default());
        assert_eq!(g.x(4), 20.0);
        assert_eq!(g.y(0.0), 100.0);
        assert_eq!(g.y(-2.0), 94.0);
    }
}
