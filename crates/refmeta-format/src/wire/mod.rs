//! Binary wire form of class metadata.
//!
//! Layout: Header → StringBlob → StringTable → Class → Methods → Fields → Aux.
//! Every section after the header starts on a `SECTION_ALIGN` boundary. The
//! aux section is variable-length and runs to the end of the buffer.

mod encode;
mod header;
mod module;
mod string_table;

#[cfg(test)]
mod header_tests;
#[cfg(test)]
mod module_tests;

pub use encode::EncodeError;
pub use header::{Header, SectionOffsets, flags};
pub use module::{Module, ModuleError};
pub use string_table::{StringId, StringTableBuilder};

/// Magic bytes at the start of every buffer.
pub const MAGIC: [u8; 4] = *b"RFMD";

/// Wire layout version (independent of the record format tag).
pub const VERSION: u32 = 1;

pub const SECTION_ALIGN: usize = 16;

pub const HEADER_SIZE: usize = 32;
pub const CLASS_RECORD_SIZE: usize = 24;
pub const METHOD_RECORD_SIZE: usize = 20;
pub const FIELD_RECORD_SIZE: usize = 24;

/// Round up to the next multiple of `SECTION_ALIGN`.
pub fn align_to_section(value: usize) -> usize {
    value.div_ceil(SECTION_ALIGN) * SECTION_ALIGN
}
