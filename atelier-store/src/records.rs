//! Live data records, keyed by data model.

use atelier_types::{EntityId, Record};
use std::collections::HashMap;

use crate::collection::next_generation;

/// Ordered record sets per data model.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: HashMap<EntityId, Vec<Record>>,
    generation: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            generation: next_generation(),
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Records of a model, in insertion order. Unknown models have none.
    #[must_use]
    pub fn records_by_model_id(&self, model_id: &str) -> &[Record] {
        self.records
            .get(model_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replaces a model's records.
    pub fn set_records(&mut self, model_id: impl Into<EntityId>, records: Vec<Record>) {
        self.records.insert(model_id.into(), records);
        self.generation = next_generation();
    }

    pub fn push_record(&mut self, model_id: impl Into<EntityId>, record: Record) {
        self.records.entry(model_id.into()).or_default().push(record);
        self.generation = next_generation();
    }

    pub fn remove_model(&mut self, model_id: &str) -> Option<Vec<Record>> {
        let removed = self.records.remove(model_id)?;
        self.generation = next_generation();
        Some(removed)
    }

    pub fn model_ids(&self) -> impl Iterator<Item = &EntityId> {
        self.records.keys()
    }
}
