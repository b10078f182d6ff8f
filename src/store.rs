use std::sync::{Arc, PoisonError, RwLock};

use crate::record::RecordSet;

#[derive(Debug, Default)]
struct Slot {
    version: u64,
    records: Arc<RecordSet>,
}

/// Holder of the record set currently served to the dashboard
///
/// Each upload publishes a complete new set by swapping an `Arc`, so a
/// reader holds either the old set or the new one, never a mix.
#[derive(Debug, Default)]
pub struct RecordStore {
    slot: RwLock<Slot>,
}

impl RecordStore {
    /// Empty store at version 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a new record set, discarding the old one
    ///
    /// # Returns
    /// * `u64` - The version number of the published set
    pub fn replace(&self, records: RecordSet) -> u64 {
        let records = Arc::new(records);
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        slot.version += 1;
        slot.records = records;
        slot.version
    }

    /// The current record set
    pub fn snapshot(&self) -> Arc<RecordSet> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&slot.records)
    }

    /// Number of successful replacements so far
    pub fn version(&self) -> u64 {
        self.slot.read().unwrap_or_else(PoisonError::into_inner).version
    }
}
