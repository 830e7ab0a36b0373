//! Logical plane <-> physical surface mapping.
//!
//! The logical plane has y pointing up; the physical surface has its origin
//! at the top-left corner with y pointing down. `center` is the logical point
//! shown at the middle of the surface and `scale` is physical units per
//! logical unit.

use foundation::Point;

/// Lower bound for `scale`; keeps the inverse transform finite.
pub const MIN_SCALE: f64 = 1e-6;

/// Factor applied by one zoom-in/zoom-out step.
pub const ZOOM_STEP: f64 = 1.1;

/// Wheel delta that would double the scale.
const WHEEL_DIVISOR: f64 = 1000.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Physical {
    pub width: f64,
    pub height: f64,
}

impl Physical {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
/// `scale` is kept in `[MIN_SCALE, inf)`; it only changes through
/// [`Viewport::set_scale`] and the zoom helpers.
pub struct Viewport {
    pub center: Point,
    scale: f64,
    pub physical: Physical,
}

impl Viewport {
    pub fn new(center: Point, scale: f64, physical: Physical) -> Self {
        Self {
            center,
            scale: clamp_scale(scale),
            physical,
        }
    }

    pub fn to_physical(&self, p: Point) -> Point {
        let pc = self.physical.center();
        Point::new(
            pc.x + (p.x - self.center.x) * self.scale,
            pc.y - (p.y - self.center.y) * self.scale,
        )
    }

    pub fn to_logical(&self, q: Point) -> Point {
        let pc = self.physical.center();
        Point::new(
            self.center.x + (q.x - pc.x) / self.scale,
            self.center.y - (q.y - pc.y) / self.scale,
        )
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_scale(scale);
    }

    /// Positive deltas zoom in, negative zoom out.
    pub fn wheel(&mut self, delta: f64) {
        self.set_scale(self.scale * (1.0 + delta / WHEEL_DIVISOR));
    }

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale / ZOOM_STEP);
    }

    /// Center that keeps `anchor` (a logical point grabbed at physical
    /// `start`) under the pointer now at physical `current`.
    pub fn dragged_center(&self, anchor: Point, start: Point, current: Point) -> Point {
        Point::new(
            anchor.x - (current.x - start.x) / self.scale,
            anchor.y + (current.y - start.y) / self.scale,
        )
    }

    /// Logical rectangle covered by the surface, as `(top_left, bottom_right)`.
    pub fn visible(&self) -> (Point, Point) {
        (
            self.to_logical(Point::new(0.0, 0.0)),
            self.to_logical(Point::new(self.physical.width, self.physical.height)),
        )
    }
}

fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return MIN_SCALE;
    }
    scale.max(MIN_SCALE)
}
