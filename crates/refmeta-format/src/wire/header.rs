//! Metadata buffer header (32 bytes).

use super::{
    CLASS_RECORD_SIZE, FIELD_RECORD_SIZE, HEADER_SIZE, MAGIC, METHOD_RECORD_SIZE, VERSION,
    align_to_section,
};

/// Presence bits: an absent array differs from an empty one.
pub mod flags {
    pub const HAS_METHODS: u8 = 1 << 0;
    pub const HAS_FIELDS: u8 = 1 << 1;
    pub const HAS_AUX: u8 = 1 << 2;
}

/// First 32 bytes of a metadata buffer.
///
/// - 0-19: identity and sizes (magic, version, checksum, total_size, str_blob_size)
/// - 20-27: counts (4 × u16), in section order
/// - 28: presence flags
/// - 29-31: reserved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// Magic bytes: b"RFMD"
    pub magic: [u8; 4],
    pub version: u32,
    /// CRC32 of everything after the header
    pub checksum: u32,
    /// Total buffer size in bytes
    pub total_size: u32,
    pub str_blob_size: u32,

    pub str_table_count: u16,
    pub methods_count: u16,
    pub fields_count: u16,
    pub aux_count: u16,

    pub flags: u8,
    pub _reserved: [u8; 3],
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            checksum: 0,
            total_size: 0,
            str_blob_size: 0,
            str_table_count: 0,
            methods_count: 0,
            fields_count: 0,
            aux_count: 0,
            flags: 0,
            _reserved: [0; 3],
        }
    }
}

/// Section offsets derived from header counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionOffsets {
    pub str_blob: usize,
    pub str_table: usize,
    pub class: usize,
    pub methods: usize,
    pub fields: usize,
    pub aux: usize,
}

impl Header {
    /// Decode a header. The caller guarantees at least `HEADER_SIZE` bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= HEADER_SIZE, "header too short");

        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            checksum: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            total_size: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
            str_blob_size: u32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]),
            str_table_count: u16::from_le_bytes([bytes[20], bytes[21]]),
            methods_count: u16::from_le_bytes([bytes[22], bytes[23]]),
            fields_count: u16::from_le_bytes([bytes[24], bytes[25]]),
            aux_count: u16::from_le_bytes([bytes[26], bytes[27]]),
            flags: bytes[28],
            _reserved: [bytes[29], bytes[30], bytes[31]],
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.total_size.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.str_blob_size.to_le_bytes());
        bytes[20..22].copy_from_slice(&self.str_table_count.to_le_bytes());
        bytes[22..24].copy_from_slice(&self.methods_count.to_le_bytes());
        bytes[24..26].copy_from_slice(&self.fields_count.to_le_bytes());
        bytes[26..28].copy_from_slice(&self.aux_count.to_le_bytes());
        bytes[28] = self.flags;
        bytes[29..32].copy_from_slice(&self._reserved);
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }

    pub fn has(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    /// Compute section offsets from counts and blob size.
    pub fn compute_offsets(&self) -> SectionOffsets {
        let str_blob = HEADER_SIZE;
        let str_table = align_to_section(str_blob + self.str_blob_size as usize);
        // One trailing sentinel offset closes the last string.
        let str_table_size = (self.str_table_count as usize + 1) * 4;

        let class = align_to_section(str_table + str_table_size);
        let methods = align_to_section(class + CLASS_RECORD_SIZE);
        let fields = align_to_section(methods + self.methods_count as usize * METHOD_RECORD_SIZE);
        let aux = align_to_section(fields + self.fields_count as usize * FIELD_RECORD_SIZE);

        SectionOffsets {
            str_blob,
            str_table,
            class,
            methods,
            fields,
            aux,
        }
    }
}
