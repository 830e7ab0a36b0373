use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bounds::Aabb2;
use crate::math::{Point, point_in_circle, point_in_polygon};

/// An area of interest on the logical plane.
///
/// On the wire this is a union tagged by the boolean `isPolygon` field:
/// `{isPolygon: true, points: [...]}` or
/// `{isPolygon: false, center: {x, y}, radius}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RegionRepr", into = "RegionRepr")]
pub enum Region {
    /// Implicitly closed ring; vertex order is the boundary traversal.
    Polygon { points: Vec<Point> },
    /// `radius` is in logical units.
    Circle { center: Point, radius: f64 },
}

impl Region {
    pub fn polygon(points: Vec<Point>) -> Self {
        Region::Polygon { points }
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Region::Circle { center, radius }
    }

    pub fn is_polygon(&self) -> bool {
        matches!(self, Region::Polygon { .. })
    }

    pub fn contains(&self, p: Point) -> bool {
        match self {
            Region::Polygon { points } => point_in_polygon(p, points),
            Region::Circle { center, radius } => point_in_circle(p, *center, *radius),
        }
    }

    /// Circles expand by radius, polygons by their vertex extrema.
    ///
    /// `None` for a polygon without vertices.
    pub fn bounds(&self) -> Option<Aabb2> {
        match self {
            Region::Polygon { points } => Aabb2::from_points(points),
            Region::Circle { center, radius } => Some(Aabb2::around(*center, *radius)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    MissingPoints,
    EmptyPolygon,
    MissingCenter,
    MissingRadius,
    NegativeRadius,
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionError::MissingPoints => write!(f, "polygon region is missing `points`"),
            RegionError::EmptyPolygon => write!(f, "polygon region has no vertices"),
            RegionError::MissingCenter => write!(f, "circular region is missing `center`"),
            RegionError::MissingRadius => write!(f, "circular region is missing `radius`"),
            RegionError::NegativeRadius => write!(f, "circular region has a negative radius"),
        }
    }
}

impl std::error::Error for RegionError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegionRepr {
    #[serde(rename = "isPolygon")]
    is_polygon: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    points: Option<Vec<Point>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    center: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    radius: Option<f64>,
}

impl TryFrom<RegionRepr> for Region {
    type Error = RegionError;

    fn try_from(raw: RegionRepr) -> Result<Self, Self::Error> {
        if raw.is_polygon {
            let points = raw.points.ok_or(RegionError::MissingPoints)?;
            if points.is_empty() {
                return Err(RegionError::EmptyPolygon);
            }
            return Ok(Region::Polygon { points });
        }

        let center = raw.center.ok_or(RegionError::MissingCenter)?;
        let radius = raw.radius.ok_or(RegionError::MissingRadius)?;
        if radius < 0.0 {
            return Err(RegionError::NegativeRadius);
        }
        Ok(Region::Circle { center, radius })
    }
}

impl From<Region> for RegionRepr {
    fn from(region: Region) -> Self {
        match region {
            Region::Polygon { points } => RegionRepr {
                is_polygon: true,
                points: Some(points),
                center: None,
                radius: None,
            },
            Region::Circle { center, radius } => RegionRepr {
                is_polygon: false,
                points: None,
                center: Some(center),
                radius: Some(radius),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Region;
    use crate::bounds::Aabb2;
    use crate::math::Point;

    #[test]
    fn decodes_polygon_variant() {
        let r: Region = serde_json::from_str(
            r#"{"isPolygon": true, "points": [{"x": 0, "y": 0}, {"x": 4, "y": 0}, {"x": 0, "y": 4}]}"#,
        )
        .unwrap();
        assert!(r.is_polygon());
        assert!(r.contains(Point::new(1.0, 1.0)));
        assert_eq!(r.bounds(), Some(Aabb2::new([0.0, 0.0], [4.0, 4.0])));
    }

    #[test]
    fn decodes_circle_variant() {
        let r: Region = serde_json::from_str(
            r#"{"isPolygon": false, "center": {"x": 1, "y": 2}, "radius": 3}"#,
        )
        .unwrap();
        assert_eq!(r, Region::circle(Point::new(1.0, 2.0), 3.0));
        assert_eq!(r.bounds(), Some(Aabb2::new([-2.0, -1.0], [4.0, 5.0])));
    }

    #[test]
    fn rejects_shape_mismatches() {
        let missing_points = r#"{"isPolygon": true, "center": {"x": 1, "y": 2}, "radius": 3}"#;
        assert!(serde_json::from_str::<Region>(missing_points).is_err());

        let empty = r#"{"isPolygon": true, "points": []}"#;
        assert!(serde_json::from_str::<Region>(empty).is_err());

        let negative = r#"{"isPolygon": false, "center": {"x": 0, "y": 0}, "radius": -1}"#;
        assert!(serde_json::from_str::<Region>(negative).is_err());

        let untagged = r#"{"center": {"x": 0, "y": 0}, "radius": 1}"#;
        assert!(serde_json::from_str::<Region>(untagged).is_err());
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let r = Region::circle(Point::new(0.0, 0.0), 5.0);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"isPolygon": false, "center": {"x": 0.0, "y": 0.0}, "radius": 5.0})
        );

        let p = Region::polygon(vec![Point::new(1.0, 1.0)]);
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v, serde_json::json!({"isPolygon": true, "points": [{"x": 1.0, "y": 1.0}]}));
    }
}
