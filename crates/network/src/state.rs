//! Derived network state, folded from domain events.
//!
//! `NetworkState::apply` is the single mutation path. Tables are ordered
//! maps so everything derived from them (element lists, labels, summaries)
//! has a stable order.

use std::collections::BTreeMap;

use foundation::{Point, Region};
use streaming::{ClientRecord, DomainEvent, EventKind, MatcherId, MatcherInfo, SubscriptionRecord};

use crate::log::EventLog;

#[derive(Debug, Clone, PartialEq)]
pub struct Matcher {
    pub id: MatcherId,
    pub alias: String,
    pub pos: Point,
    pub aoi: Region,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: String,
    pub pos: Point,
    /// Last matcher the client was seen on.
    pub matcher_id: MatcherId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: String,
    pub channel: String,
    pub aoi: Region,
    /// As reported by the matcher; never recomputed here.
    pub follow_client: bool,
    pub client_id: String,
    pub matcher_id: MatcherId,
}

impl From<&MatcherInfo> for Matcher {
    fn from(info: &MatcherInfo) -> Self {
        Self {
            id: info.id,
            alias: info.alias.clone(),
            pos: info.pos,
            aoi: info.aoi.clone(),
        }
    }
}

impl From<&ClientRecord> for Client {
    fn from(c: &ClientRecord) -> Self {
        Self {
            id: c.id.clone(),
            pos: c.pos,
            matcher_id: c.matcher_id,
        }
    }
}

impl From<&SubscriptionRecord> for Subscription {
    fn from(s: &SubscriptionRecord) -> Self {
        Self {
            id: s.sub_id.clone(),
            channel: s.channel.clone(),
            aoi: s.aoi.clone(),
            follow_client: s.follow_client,
            client_id: s.client_id.clone(),
            matcher_id: s.host_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkState {
    pub matchers: BTreeMap<MatcherId, Matcher>,
    pub clients: BTreeMap<String, Client>,
    pub subscriptions: BTreeMap<String, Subscription>,
    pub log: EventLog,
}

impl NetworkState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the tables and prepend it to the log.
    ///
    /// Events are never deduplicated; references to unknown entities are
    /// no-ops.
    pub fn apply(&mut self, event: DomainEvent) {
        match &event.kind {
            EventKind::Info(info) => {
                self.matchers.insert(info.id, Matcher::from(info));
                for c in &info.clients {
                    self.upsert_client(c);
                }
                for s in &info.subscriptions {
                    self.upsert_subscription(s);
                }
            }
            EventKind::ClientJoin(c) => self.upsert_client(c),
            EventKind::ClientMove(c) => {
                if let Some(existing) = self.clients.get_mut(&c.id) {
                    existing.pos = c.pos;
                }
            }
            EventKind::ClientLeave(c) => {
                self.clients.remove(&c.id);
                self.subscriptions.retain(|_, s| s.client_id != c.id);
            }
            EventKind::SubscriptionNew(s) | EventKind::SubscriptionUpdate(s) => {
                self.upsert_subscription(s)
            }
            EventKind::SubscriptionDelete(s) => {
                self.subscriptions.remove(&s.sub_id);
            }
            EventKind::Publication(_) | EventKind::Dissemination(_) => {}
        }
        self.log.append(event);
    }

    fn upsert_client(&mut self, c: &ClientRecord) {
        self.clients.insert(c.id.clone(), Client::from(c));
    }

    fn upsert_subscription(&mut self, s: &SubscriptionRecord) {
        self.subscriptions.insert(s.sub_id.clone(), Subscription::from(s));
    }

    /// Clients whose last-seen matcher is `matcher_id`.
    pub fn clients_of(&self, matcher_id: MatcherId) -> impl Iterator<Item = &Client> {
        self.clients
            .values()
            .filter(move |c| c.matcher_id == matcher_id)
    }

    pub fn subscriptions_of<'a>(
        &'a self,
        client_id: &'a str,
    ) -> impl Iterator<Item = &'a Subscription> {
        self.subscriptions
            .values()
            .filter(move |s| s.client_id == client_id)
    }
}

/// Pure form of [`NetworkState::apply`].
pub fn reduce(mut state: NetworkState, event: DomainEvent) -> NetworkState {
    state.apply(event);
    state
}

/// Rebuild state from an ordered event sequence.
pub fn replay(events: impl IntoIterator<Item = DomainEvent>) -> NetworkState {
    events.into_iter().fold(NetworkState::new(), reduce)
}
