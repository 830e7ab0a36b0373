use foundation::{Point, union_all};

use crate::element::MapElement;
use crate::viewport::{MIN_SCALE, Physical};

/// Logical padding added on every side of the fitted box.
pub const FIT_PADDING: f64 = 20.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fit {
    pub center: Point,
    pub scale: f64,
}

/// Center and scale that frame every element inside `physical`.
///
/// `None` when there is nothing to frame.
pub fn fit(elements: &[MapElement], physical: Physical) -> Option<Fit> {
    let bounds = union_all(elements.iter().filter_map(MapElement::fit_bounds))?
        .inflate(FIT_PADDING);

    let center = bounds.center();
    let scale = (physical.width / bounds.width()).min(physical.height / bounds.height());

    Some(Fit {
        center,
        scale: if scale.is_finite() {
            scale.max(MIN_SCALE)
        } else {
            MIN_SCALE
        },
    })
}

#[cfg(test)]
mod tests {
    use super::{FIT_PADDING, fit};
    use crate::element::{MapElement, PointType, RegionType};
    use crate::picking::hit_test;
    use crate::viewport::{Physical, Viewport};
    use foundation::{Point, Region};

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "{a} != {b} (eps={eps})");
    }

    #[test]
    fn empty_input_has_no_fit() {
        assert_eq!(fit(&[], Physical::new(400.0, 200.0)), None);
    }

    #[test]
    fn point_and_circle() {
        let elements = [
            MapElement::point(Point::ORIGIN, PointType::Matcher),
            MapElement::region(
                Region::circle(Point::new(100.0, 0.0), 10.0),
                RegionType::Subscription,
            ),
        ];
        let f = fit(&elements, Physical::new(400.0, 200.0)).unwrap();
        // x: [-24, 130], y: [-30, 30]
        assert_close(f.center.x, 53.0, 1e-12);
        assert_close(f.center.y, 0.0, 1e-12);
        assert_close(f.scale, 400.0 / 154.0, 1e-12);
    }

    #[test]
    fn single_point_uses_margin() {
        let elements = [MapElement::point(Point::new(5.0, 5.0), PointType::Client)];
        let f = fit(&elements, Physical::new(96.0, 48.0)).unwrap();
        let side = 2.0 * (4.0 + FIT_PADDING);
        assert_close(f.center.x, 5.0, 1e-12);
        assert_close(f.scale, 48.0 / side, 1e-12);
    }

    #[test]
    fn polygon_extrema() {
        let poly = Region::polygon(vec![
            Point::new(-10.0, 0.0),
            Point::new(30.0, 5.0),
            Point::new(0.0, 40.0),
        ]);
        let f = fit(
            &[MapElement::region(poly, RegionType::Publication)],
            Physical::new(1000.0, 1000.0),
        )
        .unwrap();
        assert_close(f.center.x, 10.0, 1e-12);
        assert_close(f.center.y, 20.0, 1e-12);
        assert_close(f.scale, 1000.0 / 80.0, 1e-12);
    }

    #[test]
    fn fitted_view_contains_every_element() {
        let elements = [
            MapElement::point(Point::new(-300.0, 40.0), PointType::Client),
            MapElement::point(Point::new(250.0, -90.0), PointType::Matcher),
            MapElement::region(
                Region::circle(Point::new(10.0, 10.0), 75.0),
                RegionType::Subscription,
            ),
        ];
        let physical = Physical::new(640.0, 480.0);
        let f = fit(&elements, physical).unwrap();
        let vp = Viewport::new(f.center, f.scale, physical);
        for (i, e) in elements.iter().enumerate() {
            let anchor = match e {
                MapElement::Point { point, .. } => *point,
                MapElement::Region { region, .. } => match region {
                    Region::Circle { center, .. } => *center,
                    Region::Polygon { points } => points[0],
                },
            };
            let q = vp.to_physical(anchor);
            assert!(q.x >= 0.0 && q.x <= physical.width, "element {i} x={}", q.x);
            assert!(q.y >= 0.0 && q.y <= physical.height, "element {i} y={}", q.y);
            assert!(hit_test(anchor, &elements, &vp).contains(&i));
        }
    }
}
