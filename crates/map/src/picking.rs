use foundation::Point;

use crate::element::MapElement;
use crate::viewport::Viewport;

/// Physical radius within which a point element counts as hovered.
pub const POINT_HIT_RADIUS_PX: f64 = 8.0;

/// Whether logical `p` lies on `element` at the given viewport.
///
/// Points use a constant physical tolerance, so their logical hit radius
/// shrinks as the view zooms in.
pub fn hits(p: Point, element: &MapElement, viewport: &Viewport) -> bool {
    match element {
        MapElement::Point { point, .. } => {
            p.distance(*point) <= POINT_HIT_RADIUS_PX / viewport.scale()
        }
        MapElement::Region { region, .. } => region.contains(p),
    }
}

/// Indices of every element under logical `p`, ascending.
///
/// Ordering contract: results follow element order, which is also draw
/// order, so the last index is the topmost element.
pub fn hit_test(p: Point, elements: &[MapElement], viewport: &Viewport) -> Vec<usize> {
    elements
        .iter()
        .enumerate()
        .filter(|(_, e)| hits(p, e, viewport))
        .map(|(i, _)| i)
        .collect()
}
