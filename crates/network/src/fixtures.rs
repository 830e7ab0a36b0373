//! Event builders shared by the unit tests.

use foundation::{Point, Region, timestamp_from_millis};
use streaming::{
    ClientRecord, DomainEvent, EventKind, MatcherId, MatcherInfo, PublicationRecord,
    SubscriptionRecord,
};

fn event(id: i64, kind: EventKind) -> DomainEvent {
    DomainEvent {
        id,
        time: timestamp_from_millis(1_700_000_000_000 + id).unwrap(),
        kind,
    }
}

pub fn client(id: &str, matcher: i64, x: f64, y: f64) -> ClientRecord {
    ClientRecord {
        id: id.to_string(),
        pos: Point::new(x, y),
        matcher_id: MatcherId(matcher),
    }
}

pub fn sub(id: &str, client: &str, channel: &str, host: i64) -> SubscriptionRecord {
    SubscriptionRecord {
        sub_id: id.to_string(),
        channel: channel.to_string(),
        aoi: Region::circle(Point::ORIGIN, 50.0),
        follow_client: false,
        client_id: client.to_string(),
        host_id: MatcherId(host),
    }
}

pub fn hello(
    matcher: i64,
    clients: Vec<ClientRecord>,
    subscriptions: Vec<SubscriptionRecord>,
) -> DomainEvent {
    event(
        matcher,
        EventKind::Info(MatcherInfo {
            id: MatcherId(matcher),
            alias: format!("m{matcher}"),
            pos: Point::new(matcher as f64 * 100.0, 0.0),
            aoi: Region::circle(Point::new(matcher as f64 * 100.0, 0.0), 100.0),
            clients,
            subscriptions,
        }),
    )
}

pub fn join(id: i64, client_id: &str, matcher: i64, x: f64, y: f64) -> DomainEvent {
    event(id, EventKind::ClientJoin(client(client_id, matcher, x, y)))
}

pub fn mv(id: i64, client_id: &str, matcher: i64, x: f64, y: f64) -> DomainEvent {
    event(id, EventKind::ClientMove(client(client_id, matcher, x, y)))
}

pub fn leave(id: i64, client_id: &str, matcher: i64) -> DomainEvent {
    event(id, EventKind::ClientLeave(client(client_id, matcher, 0.0, 0.0)))
}

pub fn sub_new(id: i64, sub_id: &str, client_id: &str, channel: &str) -> DomainEvent {
    event(id, EventKind::SubscriptionNew(sub(sub_id, client_id, channel, 1)))
}

pub fn sub_update(id: i64, record: SubscriptionRecord) -> DomainEvent {
    event(id, EventKind::SubscriptionUpdate(record))
}

pub fn sub_delete(id: i64, sub_id: &str, client_id: &str, channel: &str) -> DomainEvent {
    event(id, EventKind::SubscriptionDelete(sub(sub_id, client_id, channel, 1)))
}

pub fn dissemination(id: i64, sub_id: &str, client_id: &str, channel: &str, host: i64) -> DomainEvent {
    event(id, EventKind::Dissemination(sub(sub_id, client_id, channel, host)))
}

pub fn publication_record(pub_id: &str, client_id: &str, channel: &str) -> PublicationRecord {
    PublicationRecord {
        pub_id: pub_id.to_string(),
        channel: channel.to_string(),
        client_id: client_id.to_string(),
        matcher_id: MatcherId(1),
        aoi: Region::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]),
        payload: serde_json::json!({"text": "hello"}),
    }
}

pub fn publication(id: i64, pub_id: &str, client_id: &str, channel: &str) -> DomainEvent {
    event(
        id,
        EventKind::Publication(publication_record(pub_id, client_id, channel)),
    )
}
