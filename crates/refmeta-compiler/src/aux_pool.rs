//! Per-class pool of auxiliary values referenced by descriptor records.

use indexmap::IndexSet;
use refmeta_format::{AuxIdx, AuxValue};
use tracing::trace;

/// Insertion-ordered set of distinct auxiliary values.
///
/// Equal values share one index; a new value gets the next index in
/// first-use order. The pool only grows.
#[derive(Debug, Default)]
pub struct AuxPool {
    values: IndexSet<AuxValue>,
}

impl AuxPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the index for a value.
    ///
    /// Slots past the encodable range get `AuxIdx::ABSENT`; `validate` rejects
    /// such a pool before any record is emitted.
    pub fn intern(&mut self, value: impl Into<AuxValue>) -> AuxIdx {
        let value = value.into();
        if let Some(index) = self.values.get_index_of(&value) {
            return AuxIdx::new(index).unwrap_or(AuxIdx::ABSENT);
        }

        trace!(index = self.values.len(), value = ?value, "interned aux value");
        let (index, _) = self.values.insert_full(value);
        AuxIdx::new(index).unwrap_or(AuxIdx::ABSENT)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: AuxIdx) -> Option<&AuxValue> {
        self.values.get_index(idx.index()?)
    }

    /// Check the pool against a maximum entry count. Returns the offending size.
    pub fn validate(&self, max_entries: usize) -> Result<(), usize> {
        if self.values.len() > max_entries.min(AuxIdx::MAX_ENTRIES) {
            return Err(self.values.len());
        }
        Ok(())
    }

    /// Values in index order, `None` when nothing was interned.
    pub fn into_table(self) -> Option<Vec<AuxValue>> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.into_iter().collect())
    }
}
