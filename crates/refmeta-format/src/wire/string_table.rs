//! String table builder for the wire form.

use std::collections::HashMap;

use super::encode::EncodeError;

/// Index into the string table. `StringId::NONE` encodes a `NULL` string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(transparent)]
pub struct StringId(pub u16);

impl StringId {
    pub const NONE: Self = Self(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Collects strings in first-use order and assigns compact ids.
///
/// Slot 0 is reserved for `StringId::NONE` and holds an empty string.
#[derive(Debug)]
pub struct StringTableBuilder {
    lookup: HashMap<String, StringId>,
    strings: Vec<String>,
}

impl StringTableBuilder {
    pub fn new() -> Self {
        Self {
            lookup: HashMap::new(),
            strings: vec![String::new()],
        }
    }

    pub fn intern(&mut self, s: &str) -> StringId {
        if let Some(&id) = self.lookup.get(s) {
            return id;
        }

        // Overflow is reported by `validate`; ids past the limit wrap and are never emitted.
        let id = StringId(self.strings.len() as u16);
        self.strings.push(s.to_string());
        self.lookup.insert(s.to_string(), id);
        id
    }

    /// Intern an optional string, mapping `None` to `StringId::NONE`.
    pub fn intern_opt(&mut self, s: Option<&str>) -> StringId {
        s.map_or(StringId::NONE, |s| self.intern(s))
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Validate that the string count fits in u16.
    pub fn validate(&self) -> Result<(), EncodeError> {
        // The table stores count+1 offsets.
        if self.strings.len() > 65534 {
            return Err(EncodeError::TooManyStrings(self.strings.len()));
        }
        Ok(())
    }

    pub fn get_str(&self, id: StringId) -> &str {
        &self.strings[id.0 as usize]
    }

    /// Emit the string blob and offset table.
    ///
    /// Returns (blob_bytes, table_bytes).
    pub fn emit(&self) -> (Vec<u8>, Vec<u8>) {
        let mut blob = Vec::new();
        let mut offsets: Vec<u32> = Vec::with_capacity(self.strings.len() + 1);

        for s in &self.strings {
            offsets.push(blob.len() as u32);
            blob.extend_from_slice(s.as_bytes());
        }
        offsets.push(blob.len() as u32);

        let table_bytes: Vec<u8> = offsets.iter().flat_map(|o| o.to_le_bytes()).collect();

        (blob, table_bytes)
    }
}

impl Default for StringTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
