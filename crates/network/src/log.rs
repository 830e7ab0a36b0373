use std::collections::VecDeque;

use streaming::{DomainEvent, EventType};

/// One immutable record of an applied event.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Session-local arrival sequence, starting at 0. Unlike the wire `id`
    /// this is unique within the session.
    pub seq: u64,
    pub tag: EventType,
    pub event: DomainEvent,
}

/// Append-only event log, iterated newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    next_seq: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, event: DomainEvent) -> &LogEntry {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push_front(LogEntry {
            seq,
            tag: event.event_type(),
            event,
        });
        &self.entries[0]
    }

    /// Entry `index` positions back from the newest.
    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Newest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Oldest first, i.e. arrival order.
    pub fn chronological(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a LogEntry;
    type IntoIter = std::collections::vec_deque::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
