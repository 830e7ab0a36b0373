use std::collections::BTreeMap;

use crate::decode::DecodeError;
use crate::event::DomainEvent;

/// Per-connection ingest counters.
///
/// Sorted maps keep snapshots stable so two runs over the same stream log
/// identical summaries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestMetrics {
    counters: BTreeMap<String, u64>,
    sizes: Histogram,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Histogram {
    pub count: u64,
    pub sum: u64,
    pub min: u64,
    pub max: u64,
}

impl Histogram {
    pub fn record(&mut self, value: u64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSnapshot {
    pub counters: Vec<(String, u64)>,
    pub message_bytes: Histogram,
}

pub const RECEIVED: &str = "messages.received";
pub const DECODED: &str = "messages.decoded";
pub const IGNORED: &str = "messages.ignored";
pub const MALFORMED: &str = "messages.malformed";
pub const INVALID: &str = "messages.invalid";

impl IngestMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    fn inc(&mut self, name: impl Into<String>) {
        *self.counters.entry(name.into()).or_insert(0) += 1;
    }

    /// Account for one raw message and the decoder's verdict on it.
    pub fn record(&mut self, raw_len: usize, outcome: &Result<Option<DomainEvent>, DecodeError>) {
        self.inc(RECEIVED);
        self.sizes.record(raw_len as u64);
        match outcome {
            Ok(Some(ev)) => {
                self.inc(DECODED);
                self.inc(format!("events.{}", ev.event_type()));
            }
            Ok(None) => self.inc(IGNORED),
            Err(e) if e.is_malformed() => self.inc(MALFORMED),
            Err(_) => self.inc(INVALID),
        }
    }

    pub fn merge(&mut self, other: &IngestMetrics) {
        for (k, v) in &other.counters {
            *self.counters.entry(k.clone()).or_insert(0) += v;
        }
        if other.sizes.count > 0 {
            if self.sizes.count == 0 {
                self.sizes = other.sizes;
            } else {
                self.sizes.min = self.sizes.min.min(other.sizes.min);
                self.sizes.max = self.sizes.max.max(other.sizes.max);
                self.sizes.count += other.sizes.count;
                self.sizes.sum += other.sizes.sum;
            }
        }
    }

    pub fn snapshot(&self) -> IngestSnapshot {
        IngestSnapshot {
            counters: self.counters.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            message_bytes: self.sizes,
        }
    }
}
