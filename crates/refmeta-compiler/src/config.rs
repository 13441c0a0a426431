//! Synthesis configuration.

use refmeta_format::{AuxIdx, METADATA_VERSION};

/// Configuration for metadata synthesis.
#[derive(Clone, Debug)]
pub struct Config {
    /// Format tag written into class records
    pub(crate) version: u32,
    /// Largest auxiliary table a class may produce
    pub(crate) max_aux_entries: usize,
    /// Whether to record generic signatures
    pub(crate) generic_signatures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: METADATA_VERSION,
            max_aux_entries: AuxIdx::MAX_ENTRIES,
            generic_signatures: true,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the format tag.
    pub fn version(mut self, value: u32) -> Self {
        self.version = value;
        self
    }

    /// Set the auxiliary table limit. Values above the index range are clamped.
    pub fn max_aux_entries(mut self, value: usize) -> Self {
        self.max_aux_entries = value.min(AuxIdx::MAX_ENTRIES);
        self
    }

    /// Set whether generic signatures are recorded.
    pub fn generic_signatures(mut self, value: bool) -> Self {
        self.generic_signatures = value;
        self
    }
}
