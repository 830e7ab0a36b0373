use streaming::{EventKind, PublicationRecord};

use crate::log::LogEntry;

/// At most one publication under inspection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inspection {
    current: Option<PublicationRecord>,
}

impl Inspection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was inspected before.
    pub fn inspect(&mut self, publication: PublicationRecord) {
        self.current = Some(publication);
    }

    /// Inspect the publication carried by a log entry. Returns `false` for
    /// any other kind of entry.
    pub fn inspect_entry(&mut self, entry: &LogEntry) -> bool {
        match &entry.event.kind {
            EventKind::Publication(p) => {
                self.inspect(p.clone());
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&PublicationRecord> {
        self.current.as_ref()
    }
}
