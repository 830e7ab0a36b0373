//! Fixed default palette.

use map::{PointType, RegionType};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

pub const CROSSHAIR: Color = Color::rgb(0, 0, 0).with_alpha(0.5);
pub const GRID: Color = Color::rgb(0, 0, 0).with_alpha(0.1);
pub const AXIS: Color = Color::rgb(255, 0, 0).with_alpha(0.15);

/// Crosshair arm length, end to end, in pixels.
pub const CROSSHAIR_SIZE: f64 = 10.0;

pub const POINT_RADIUS: f64 = 5.0;
pub const POINT_RADIUS_HOVER: f64 = 6.0;

pub const REGION_FILL_ALPHA: f64 = 0.1;
pub const REGION_FILL_ALPHA_HOVER: f64 = 0.2;

pub fn point_fill(kind: PointType, hovered: bool) -> Color {
    match (kind, hovered) {
        (PointType::Client, false) => Color::rgb(244, 63, 94),
        (PointType::Client, true) => Color::rgb(190, 18, 60),
        (PointType::Matcher, false) => Color::rgb(16, 185, 129),
        (PointType::Matcher, true) => Color::rgb(4, 120, 87),
    }
}

pub fn region_stroke(kind: RegionType) -> Color {
    match kind {
        RegionType::Subscription => Color::rgb(6, 182, 212),
        RegionType::Publication => Color::rgb(139, 92, 246),
    }
}

pub fn region_fill(kind: RegionType, hovered: bool) -> Color {
    let alpha = if hovered {
        REGION_FILL_ALPHA_HOVER
    } else {
        REGION_FILL_ALPHA
    };
    region_stroke(kind).with_alpha(alpha)
}
