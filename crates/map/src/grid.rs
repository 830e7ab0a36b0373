use foundation::Point;

use crate::viewport::Viewport;

/// Interval used when the grid is enabled without an explicit spacing.
pub const DEFAULT_GRID_INTERVAL: f64 = 100.0;

/// Below this physical spacing lines would merge into a fill; none are drawn.
const MIN_SPACING_PX: f64 = 2.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    /// Constant logical x; spans the full surface height.
    Vertical,
    /// Constant logical y; spans the full surface width.
    Horizontal,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridLine {
    pub orientation: Orientation,
    /// Logical coordinate of the line (`k * interval`).
    pub logical: f64,
    /// Physical x (vertical) or y (horizontal) of the line.
    pub physical: f64,
    /// Line through the logical origin.
    pub axis: bool,
}

/// Grid lines at integer multiples of `interval` covering the visible area.
///
/// A zero, negative or non-finite interval disables the grid.
pub fn grid_lines(viewport: &Viewport, interval: f64) -> Vec<GridLine> {
    if !(interval.is_finite() && interval > 0.0) || interval * viewport.scale() < MIN_SPACING_PX {
        return Vec::new();
    }

    let (top_left, bottom_right) = viewport.visible();
    let mut lines = Vec::new();

    for k in multiples(top_left.x, bottom_right.x, interval) {
        let x = k as f64 * interval;
        lines.push(GridLine {
            orientation: Orientation::Vertical,
            logical: x,
            physical: viewport.to_physical(Point::new(x, 0.0)).x,
            axis: k == 0,
        });
    }
    // Top of the surface is the larger logical y.
    for k in multiples(bottom_right.y, top_left.y, interval) {
        let y = k as f64 * interval;
        lines.push(GridLine {
            orientation: Orientation::Horizontal,
            logical: y,
            physical: viewport.to_physical(Point::new(0.0, y)).y,
            axis: k == 0,
        });
    }
    lines
}

fn multiples(lo: f64, hi: f64, interval: f64) -> std::ops::RangeInclusive<i64> {
    let first = (lo / interval).ceil() as i64;
    let last = (hi / interval).floor() as i64;
    first..=last
}
