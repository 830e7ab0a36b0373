use std::fmt;

use foundation::Timestamp;

use crate::protocol::{ClientRecord, MatcherInfo, PublicationRecord, SubscriptionRecord};

/// One validated network event, as emitted by an ingester.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainEvent {
    /// Source sequence number. Not unique across matchers; never a dedup key.
    pub id: i64,
    pub time: Timestamp,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Info(MatcherInfo),
    ClientJoin(ClientRecord),
    ClientMove(ClientRecord),
    ClientLeave(ClientRecord),
    SubscriptionNew(SubscriptionRecord),
    SubscriptionUpdate(SubscriptionRecord),
    SubscriptionDelete(SubscriptionRecord),
    Publication(PublicationRecord),
    Dissemination(SubscriptionRecord),
}

/// Payload-free tag of an [`EventKind`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventType {
    Info,
    ClientJoin,
    ClientMove,
    ClientLeave,
    SubscriptionNew,
    SubscriptionUpdate,
    SubscriptionDelete,
    Publication,
    Dissemination,
}

impl EventType {
    pub const ALL: [EventType; 9] = [
        EventType::Info,
        EventType::ClientJoin,
        EventType::ClientMove,
        EventType::ClientLeave,
        EventType::SubscriptionNew,
        EventType::SubscriptionUpdate,
        EventType::SubscriptionDelete,
        EventType::Publication,
        EventType::Dissemination,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Info => "info",
            EventType::ClientJoin => "client-join",
            EventType::ClientMove => "client-move",
            EventType::ClientLeave => "client-leave",
            EventType::SubscriptionNew => "sub-new",
            EventType::SubscriptionUpdate => "sub-update",
            EventType::SubscriptionDelete => "sub-delete",
            EventType::Publication => "pub",
            EventType::Dissemination => "dissemination",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        EventType::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Info(_) => EventType::Info,
            EventKind::ClientJoin(_) => EventType::ClientJoin,
            EventKind::ClientMove(_) => EventType::ClientMove,
            EventKind::ClientLeave(_) => EventType::ClientLeave,
            EventKind::SubscriptionNew(_) => EventType::SubscriptionNew,
            EventKind::SubscriptionUpdate(_) => EventType::SubscriptionUpdate,
            EventKind::SubscriptionDelete(_) => EventType::SubscriptionDelete,
            EventKind::Publication(_) => EventType::Publication,
            EventKind::Dissemination(_) => EventType::Dissemination,
        }
    }

    /// Client the event concerns, if any.
    pub fn client_id(&self) -> Option<&str> {
        match self {
            EventKind::Info(_) => None,
            EventKind::ClientJoin(c) | EventKind::ClientMove(c) | EventKind::ClientLeave(c) => {
                Some(&c.id)
            }
            EventKind::SubscriptionNew(s)
            | EventKind::SubscriptionUpdate(s)
            | EventKind::SubscriptionDelete(s)
            | EventKind::Dissemination(s) => Some(&s.client_id),
            EventKind::Publication(p) => Some(&p.client_id),
        }
    }

    /// Channel the event concerns, if any.
    pub fn channel(&self) -> Option<&str> {
        match self {
            EventKind::Info(_)
            | EventKind::ClientJoin(_)
            | EventKind::ClientMove(_)
            | EventKind::ClientLeave(_) => None,
            EventKind::SubscriptionNew(s)
            | EventKind::SubscriptionUpdate(s)
            | EventKind::SubscriptionDelete(s)
            | EventKind::Dissemination(s) => Some(&s.channel),
            EventKind::Publication(p) => Some(&p.channel),
        }
    }
}

impl DomainEvent {
    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }
}
