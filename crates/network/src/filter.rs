use std::collections::BTreeSet;

use streaming::{DomainEvent, EventType};

use crate::log::{EventLog, LogEntry};
use crate::state::NetworkState;

/// Which log entries are shown.
///
/// An entry passes when its type is enabled, and the client and channel it
/// concerns (when it has one) are not hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilter {
    enabled: BTreeSet<EventType>,
    hidden_clients: BTreeSet<String>,
    hidden_channels: BTreeSet<String>,
}

impl Default for LogFilter {
    fn default() -> Self {
        Self {
            enabled: EventType::ALL.into_iter().collect(),
            hidden_clients: BTreeSet::new(),
            hidden_channels: BTreeSet::new(),
        }
    }
}

impl LogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_type(&mut self, tag: EventType, enabled: bool) {
        if enabled {
            self.enabled.insert(tag);
        } else {
            self.enabled.remove(&tag);
        }
    }

    pub fn only(tags: impl IntoIterator<Item = EventType>) -> Self {
        Self {
            enabled: tags.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn is_type_enabled(&self, tag: EventType) -> bool {
        self.enabled.contains(&tag)
    }

    pub fn set_client_hidden(&mut self, client_id: impl Into<String>, hidden: bool) {
        let id = client_id.into();
        if hidden {
            self.hidden_clients.insert(id);
        } else {
            self.hidden_clients.remove(&id);
        }
    }

    pub fn set_channel_hidden(&mut self, channel: impl Into<String>, hidden: bool) {
        let channel = channel.into();
        if hidden {
            self.hidden_channels.insert(channel);
        } else {
            self.hidden_channels.remove(&channel);
        }
    }

    pub fn matches(&self, event: &DomainEvent) -> bool {
        if !self.enabled.contains(&event.event_type()) {
            return false;
        }
        if let Some(client) = event.kind.client_id()
            && self.hidden_clients.contains(client)
        {
            return false;
        }
        if let Some(channel) = event.kind.channel()
            && self.hidden_channels.contains(channel)
        {
            return false;
        }
        true
    }

    /// Visible entries, newest first.
    pub fn apply<'a>(&'a self, log: &'a EventLog) -> impl Iterator<Item = &'a LogEntry> {
        log.iter().filter(move |e| self.matches(&e.event))
    }
}

/// Every channel seen in current subscriptions or anywhere in the log,
/// sorted and de-duplicated.
pub fn known_channels(state: &NetworkState) -> Vec<String> {
    let mut set: BTreeSet<&str> = state
        .subscriptions
        .values()
        .map(|s| s.channel.as_str())
        .collect();
    set.extend(state.log.iter().filter_map(|e| e.event.kind.channel()));
    set.into_iter().map(str::to_string).collect()
}

/// Every client currently connected or mentioned in the log, sorted.
pub fn known_clients(state: &NetworkState) -> Vec<String> {
    let mut set: BTreeSet<&str> = state.clients.keys().map(String::as_str).collect();
    set.extend(state.log.iter().filter_map(|e| e.event.kind.client_id()));
    set.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::{LogFilter, known_channels, known_clients};
    use crate::fixtures::{hello, join, leave, publication, sub_delete, sub_new};
    use crate::state::replay;
    use pretty_assertions::assert_eq;
    use streaming::EventType;

    fn shown(filter: &LogFilter, state: &crate::NetworkState) -> Vec<u64> {
        filter.apply(&state.log).map(|e| e.seq).collect()
    }

    fn session() -> crate::NetworkState {
        replay([
            hello(1, vec![], vec![]),          // 0
            join(2, "A", 1, 0.0, 0.0),         // 1
            sub_new(3, "s1", "A", "chat"),     // 2
            publication(4, "p1", "A", "chat"), // 3
            join(5, "B", 1, 0.0, 0.0),         // 4
            publication(6, "p2", "B", "news"), // 5
        ])
    }

    #[test]
    fn default_shows_everything() {
        let state = session();
        assert_eq!(shown(&LogFilter::new(), &state), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn type_toggle() {
        let state = session();
        let mut f = LogFilter::new();
        f.set_type(EventType::Publication, false);
        assert!(!f.is_type_enabled(EventType::Publication));
        assert_eq!(shown(&f, &state), vec![4, 2, 1, 0]);

        let f = LogFilter::only([EventType::Publication]);
        assert_eq!(shown(&f, &state), vec![5, 3]);
    }

    #[test]
    fn hidden_client_and_channel() {
        let state = session();
        let mut f = LogFilter::new();
        f.set_client_hidden("A", true);
        assert_eq!(shown(&f, &state), vec![5, 4, 0]);

        f.set_client_hidden("A", false);
        f.set_channel_hidden("news", true);
        assert_eq!(shown(&f, &state), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn channels_include_history() {
        let state = replay([
            join(1, "A", 1, 0.0, 0.0),
            sub_new(2, "s1", "A", "zeta"),
            sub_new(3, "s2", "A", "alpha"),
            sub_delete(4, "s2", "A", "alpha"),
            publication(5, "p1", "A", "zeta"),
            leave(6, "A", 1),
        ]);
        assert!(state.subscriptions.is_empty());
        assert_eq!(known_channels(&state), vec!["alpha".to_string(), "zeta".to_string()]);
        assert_eq!(known_clients(&state), vec!["A".to_string()]);
    }
}
