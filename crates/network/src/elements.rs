use map::{MapElement, PointType, RegionType};

use crate::inspect::Inspection;
use crate::state::NetworkState;

/// Map elements in draw order: matchers, clients, subscriptions, then the
/// inspected publication so it is never covered.
pub fn map_elements(state: &NetworkState, inspection: &Inspection) -> Vec<MapElement> {
    let matchers = state
        .matchers
        .values()
        .map(|m| MapElement::point(m.pos, PointType::Matcher));
    let clients = state
        .clients
        .values()
        .map(|c| MapElement::point(c.pos, PointType::Client));
    let subscriptions = state
        .subscriptions
        .values()
        .map(|s| MapElement::region(s.aoi.clone(), RegionType::Subscription));
    let inspected = inspection
        .current()
        .map(|p| MapElement::region(p.aoi.clone(), RegionType::Publication));

    matchers
        .chain(clients)
        .chain(subscriptions)
        .chain(inspected)
        .collect()
}

/// Labels parallel to [`map_elements`], index for index.
pub fn hover_labels(state: &NetworkState, inspection: &Inspection) -> Vec<String> {
    let matchers = state.matchers.values().map(|m| format!("Matcher #{}", m.id));
    let clients = state.clients.values().map(|c| format!("Client '{}'", c.id));
    let subscriptions = state
        .subscriptions
        .values()
        .map(|s| format!("Subscription '{}'", s.id));
    let inspected = inspection
        .current()
        .map(|p| format!("Publication '{}'", p.pub_id));

    matchers
        .chain(clients)
        .chain(subscriptions)
        .chain(inspected)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{hover_labels, map_elements};
    use crate::fixtures::{client, hello, join, publication_record, sub, sub_new};
    use crate::inspect::Inspection;
    use crate::state::{NetworkState, replay};
    use foundation::Point;
    use map::{MapElement, Physical, PointType, RegionType, Viewport, hit_test};
    use pretty_assertions::assert_eq;

    #[test]
    fn order_and_labels_line_up() {
        let state = replay([
            hello(2, vec![client("B", 2, 1.0, 1.0)], vec![sub("s9", "B", "c", 2)]),
            hello(1, vec![], vec![]),
            join(3, "A", 1, 5.0, 5.0),
            sub_new(4, "s1", "A", "c"),
        ]);
        let mut inspection = Inspection::new();
        inspection.inspect(publication_record("p1", "A", "c"));

        let elements = map_elements(&state, &inspection);
        let labels = hover_labels(&state, &inspection);
        assert_eq!(elements.len(), labels.len());
        assert_eq!(
            labels,
            vec![
                "Matcher #1",
                "Matcher #2",
                "Client 'A'",
                "Client 'B'",
                "Subscription 's1'",
                "Subscription 's9'",
                "Publication 'p1'",
            ]
        );
        assert!(matches!(
            elements[0],
            MapElement::Point { point_type: PointType::Matcher, .. }
        ));
        assert!(matches!(
            elements[6],
            MapElement::Region { region_type: RegionType::Publication, .. }
        ));
    }

    #[test]
    fn hovered_indices_resolve_to_labels() {
        let state = replay([join(1, "A", 1, 0.0, 0.0), sub_new(2, "s1", "A", "c")]);
        let inspection = Inspection::new();
        let elements = map_elements(&state, &inspection);
        let labels = hover_labels(&state, &inspection);

        let vp = Viewport::new(Point::ORIGIN, 1.0, Physical::new(100.0, 100.0));
        let hovered: Vec<&str> = hit_test(Point::new(1.0, 1.0), &elements, &vp)
            .into_iter()
            .map(|i| labels[i].as_str())
            .collect();
        assert_eq!(hovered, vec!["Client 'A'", "Subscription 's1'"]);
    }

    #[test]
    fn empty_state_has_no_elements() {
        assert!(map_elements(&NetworkState::new(), &Inspection::new()).is_empty());
    }
}
