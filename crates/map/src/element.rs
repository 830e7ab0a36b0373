use foundation::{Aabb2, Point, Region};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointType {
    Matcher,
    Client,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionType {
    Subscription,
    Publication,
}

/// Something drawable and hoverable on the map.
///
/// Serialized as `{"elementType": "point", "point": .., "pointType": ..}` or
/// `{"elementType": "region", "region": .., "regionType": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "elementType", rename_all = "lowercase")]
pub enum MapElement {
    Point {
        point: Point,
        #[serde(rename = "pointType")]
        point_type: PointType,
    },
    Region {
        region: Region,
        #[serde(rename = "regionType")]
        region_type: RegionType,
    },
}

/// Half-extent a point contributes to fitting.
pub const POINT_FIT_MARGIN: f64 = 4.0;

impl MapElement {
    pub fn point(point: Point, point_type: PointType) -> Self {
        MapElement::Point { point, point_type }
    }

    pub fn region(region: Region, region_type: RegionType) -> Self {
        MapElement::Region {
            region,
            region_type,
        }
    }

    /// Logical extent used for fitting. Points are padded by
    /// [`POINT_FIT_MARGIN`] so a lone point still has area.
    pub fn fit_bounds(&self) -> Option<Aabb2> {
        match self {
            MapElement::Point { point, .. } => Some(Aabb2::around(*point, POINT_FIT_MARGIN)),
            MapElement::Region { region, .. } => region.bounds(),
        }
    }
}
