use crate::math::Point;

/// Axis-aligned bounding box on the logical plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    /// Square box of half-size `margin` centered on `p`.
    pub fn around(p: Point, margin: f64) -> Self {
        Aabb2::new([p.x - margin, p.y - margin], [p.x + margin, p.y + margin])
    }

    /// Tightest box over `points`, or `None` when there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut out = Aabb2::around(*first, 0.0);
        for p in iter {
            out.min[0] = out.min[0].min(p.x);
            out.min[1] = out.min[1].min(p.y);
            out.max[0] = out.max[0].max(p.x);
            out.max[1] = out.max[1].max(p.y);
        }
        Some(out)
    }

    pub fn union(self, other: Self) -> Self {
        Aabb2::new(
            [self.min[0].min(other.min[0]), self.min[1].min(other.min[1])],
            [self.max[0].max(other.max[0]), self.max[1].max(other.max[1])],
        )
    }

    /// Grows the box by `pad` on every side.
    pub fn inflate(self, pad: f64) -> Self {
        Aabb2::new(
            [self.min[0] - pad, self.min[1] - pad],
            [self.max[0] + pad, self.max[1] + pad],
        )
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min[0] && p.x <= self.max[0] && p.y >= self.min[1] && p.y <= self.max[1]
    }
}

/// Union of every box yielded by `boxes`; `None` for an empty input.
pub fn union_all(boxes: impl IntoIterator<Item = Aabb2>) -> Option<Aabb2> {
    boxes.into_iter().reduce(Aabb2::union)
}
