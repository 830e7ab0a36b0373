//! Pure point/region predicates on the logical plane.

use super::Point;

const ON_EDGE_EPS: f64 = 1e-12;

/// `true` when `p` lies within `radius` of `center` (boundary included).
pub fn point_in_circle(p: Point, center: Point, radius: f64) -> bool {
    p.distance(center) <= radius
}

/// Point-in-polygon over an implicitly closed ring.
///
/// The last vertex connects back to the first; a duplicated closing vertex is
/// harmless. Points on an edge count as inside. Interior is decided by
/// even-odd ray casting, so self-intersecting rings follow the even-odd rule.
pub fn point_in_polygon(p: Point, ring: &[Point]) -> bool {
    if ring.is_empty() {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];

        if on_segment(p, a, b) {
            return true;
        }

        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn on_segment(p: Point, a: Point, b: Point) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    let scale = (b - a).length().max(1.0);
    if cross.abs() > ON_EDGE_EPS * scale {
        return false;
    }
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}
