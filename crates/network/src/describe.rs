//! Human-readable lines for the event log and the overview.

use foundation::Region;
use streaming::{DomainEvent, EventKind, PublicationRecord};

use crate::log::LogEntry;
use crate::state::{NetworkState, Subscription};

pub fn describe(event: &DomainEvent) -> String {
    match &event.kind {
        EventKind::Info(info) => format!("Inspector session started for matcher #{}", info.id),
        EventKind::ClientJoin(c) => {
            format!("Client '{}' joined on matcher #{}", c.id, c.matcher_id)
        }
        EventKind::ClientLeave(c) => format!("Client '{}' left matcher #{}", c.id, c.matcher_id),
        EventKind::ClientMove(c) => {
            format!("Client '{}' moved to ({}, {})", c.id, c.pos.x, c.pos.y)
        }
        EventKind::SubscriptionNew(s) => format!(
            "Client '{}' created subscription '{}' on channel '{}'",
            s.client_id, s.sub_id, s.channel
        ),
        EventKind::SubscriptionUpdate(s) => {
            format!("Client '{}' updated subscription '{}'", s.client_id, s.sub_id)
        }
        EventKind::SubscriptionDelete(s) => {
            format!("Client '{}' dropped subscription '{}'", s.client_id, s.sub_id)
        }
        EventKind::Publication(p) => format!(
            "Client '{}' published message on channel '{}'",
            p.client_id, p.channel
        ),
        EventKind::Dissemination(s) => format!(
            "Matcher #{} disseminated message on channel '{}' to '{}'",
            s.host_id, s.channel, s.sub_id
        ),
    }
}

/// `HH:MM:SS.mmm  <tag>  <description>` for plain-text logs.
pub fn log_line(entry: &LogEntry) -> String {
    format!(
        "{}  {:<13}  {}",
        entry.event.time.format("%H:%M:%S%.3f"),
        entry.tag.as_str(),
        describe(&entry.event)
    )
}

/// `Poly(vertices = n)` or `Circular(x = .., y = .., radius = ..)`.
pub fn describe_region(region: &Region) -> String {
    match region {
        Region::Polygon { points } => format!("Poly(vertices = {})", points.len()),
        Region::Circle { center, radius } => {
            format!("Circular(x = {}, y = {}, radius = {})", center.x, center.y, radius)
        }
    }
}

fn describe_subscription_region(s: &Subscription) -> String {
    let base = describe_region(&s.aoi);
    // Splice the follow flag in before the closing paren.
    let inner = base.strip_suffix(')').unwrap_or(&base);
    format!("{inner}, follow = {})", s.follow_client)
}

/// Indented matcher -> client -> subscription tree.
pub fn overview(state: &NetworkState) -> Vec<String> {
    let mut lines = Vec::new();
    for m in state.matchers.values() {
        lines.push(format!("Matcher #{} (known as {})", m.id, m.alias));
        for c in state.clients_of(m.id) {
            lines.push(format!("  Client {:?}", c.id));
            for s in state.subscriptions_of(&c.id) {
                lines.push(format!(
                    "    Subscription {} on '{}': {}",
                    s.id,
                    s.channel,
                    describe_subscription_region(s)
                ));
            }
        }
    }
    lines
}

/// Details shown for an inspected publication.
pub fn describe_publication(p: &PublicationRecord) -> Vec<String> {
    vec![
        format!("Inspecting publication {}", p.pub_id),
        format!("From client '{}' to matcher #{}", p.client_id, p.matcher_id),
        format!("Channel: {}", p.channel),
        format!("Region: {}. Shown on map.", describe_region(&p.aoi)),
        format!("Payload: {}", p.payload),
    ]
}
