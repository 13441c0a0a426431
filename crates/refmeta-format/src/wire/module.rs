//! Validating reader for the wire form.

use std::io;
use std::path::Path;

use crate::modifiers::Modifiers;
use crate::records::{
    AnnotationInfo, AuxConst, AuxIdx, AuxValue, ClassInfo, ClassMetadata, ConstantValue,
    ElementValue, FieldInfo, MethodInfo,
};

use super::encode::tag;
use super::header::{Header, SectionOffsets, flags};
use super::{CLASS_RECORD_SIZE, FIELD_RECORD_SIZE, HEADER_SIZE, METHOD_RECORD_SIZE, VERSION};

/// Deepest array nesting accepted in an aux constant.
pub const MAX_CONST_DEPTH: usize = 64;

/// Read a little-endian u16 from bytes at the given offset.
#[inline]
fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

/// Read a little-endian u32 from bytes at the given offset.
#[inline]
fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn read_u64_le(bytes: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(buf)
}

/// Module load error.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("invalid magic: expected RFMD")]
    InvalidMagic,
    #[error("unsupported version: {0} (expected {VERSION})")]
    UnsupportedVersion(u32),
    #[error("file too small: {0} bytes (minimum {HEADER_SIZE})")]
    FileTooSmall(usize),
    #[error("size mismatch: header says {header} bytes, got {actual}")]
    SizeMismatch { header: u32, actual: usize },
    #[error("checksum mismatch: header says {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
    #[error("section `{0}` extends past the end of the buffer")]
    Truncated(&'static str),
    #[error("invalid string id {0}")]
    InvalidString(u16),
    #[error("invalid aux index {index} (table has {len} entries)")]
    InvalidAuxIndex { index: i16, len: usize },
    #[error("unknown value tag {0}")]
    UnknownTag(u8),
    #[error("constant nesting exceeds {0} levels")]
    NestingTooDeep(usize),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A decoded metadata buffer.
#[derive(Debug)]
pub struct Module {
    header: Header,
    metadata: ClassMetadata,
}

impl Module {
    /// Validate and decode a buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ModuleError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ModuleError::FileTooSmall(bytes.len()));
        }

        let header = Header::from_bytes(bytes);
        if !header.validate_magic() {
            return Err(ModuleError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(ModuleError::UnsupportedVersion(header.version));
        }
        if header.total_size as usize != bytes.len() {
            return Err(ModuleError::SizeMismatch {
                header: header.total_size,
                actual: bytes.len(),
            });
        }
        let actual = crc32fast::hash(&bytes[HEADER_SIZE..]);
        if actual != header.checksum {
            return Err(ModuleError::ChecksumMismatch {
                expected: header.checksum,
                actual,
            });
        }

        let metadata = Decoder::new(bytes, &header)?.decode()?;
        Ok(Self { header, metadata })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModuleError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn metadata(&self) -> &ClassMetadata {
        &self.metadata
    }

    pub fn into_metadata(self) -> ClassMetadata {
        self.metadata
    }
}

struct Decoder<'a> {
    bytes: &'a [u8],
    header: &'a Header,
    offsets: SectionOffsets,
    strings: Vec<&'a str>,
}

impl<'a> Decoder<'a> {
    fn new(bytes: &'a [u8], header: &'a Header) -> Result<Self, ModuleError> {
        let offsets = header.compute_offsets();
        let str_count = header.str_table_count as usize;

        check_bounds(bytes, offsets.str_table, (str_count + 1) * 4, "string table")?;
        check_bounds(bytes, offsets.str_blob, header.str_blob_size as usize, "string blob")?;
        let blob = &bytes[offsets.str_blob..offsets.str_blob + header.str_blob_size as usize];

        let mut strings = Vec::with_capacity(str_count);
        for i in 0..str_count {
            let start = read_u32_le(bytes, offsets.str_table + i * 4) as usize;
            let end = read_u32_le(bytes, offsets.str_table + (i + 1) * 4) as usize;
            let raw = blob
                .get(start..end)
                .ok_or(ModuleError::InvalidString(i as u16))?;
            let s = std::str::from_utf8(raw).map_err(|_| ModuleError::InvalidString(i as u16))?;
            strings.push(s);
        }

        Ok(Self {
            bytes,
            header,
            offsets,
            strings,
        })
    }

    fn decode(&self) -> Result<ClassMetadata, ModuleError> {
        let h = self.header;
        let methods_count = h.methods_count as usize;
        let fields_count = h.fields_count as usize;

        check_bounds(self.bytes, self.offsets.class, CLASS_RECORD_SIZE, "class")?;
        check_bounds(
            self.bytes,
            self.offsets.methods,
            methods_count * METHOD_RECORD_SIZE,
            "methods",
        )?;
        check_bounds(
            self.bytes,
            self.offsets.fields,
            fields_count * FIELD_RECORD_SIZE,
            "fields",
        )?;

        let aux = self.decode_aux()?;
        let aux_len = aux.len();

        let b = self.bytes;
        let at = self.offsets.class;
        let class = ClassInfo {
            name: self.string(read_u16_le(b, at + 2))?,
            package: self.optional_string(read_u16_le(b, at + 4))?,
            annotations: self.idx(at + 6, aux_len)?,
            version: read_u32_le(b, at + 8),
            modifiers: Modifiers::from_bits_retain(read_u32_le(b, at + 12)),
            inner_classes: self.idx(at + 16, aux_len)?,
            enclosing_class: self.idx(at + 18, aux_len)?,
            enclosing_method: self.idx(at + 20, aux_len)?,
            generic_signature: self.idx(at + 22, aux_len)?,
        };
        let target_name = self.string(read_u16_le(b, at))?;

        let mut methods = Vec::with_capacity(methods_count);
        for i in 0..methods_count {
            let at = self.offsets.methods + i * METHOD_RECORD_SIZE;
            methods.push(MethodInfo {
                selector: self.string(read_u16_le(b, at))?,
                return_type: self.optional_string(read_u16_le(b, at + 2))?,
                modifiers: Modifiers::from_bits_retain(read_u32_le(b, at + 4)),
                param_types: self.idx(at + 8, aux_len)?,
                exceptions: self.idx(at + 10, aux_len)?,
                generic_signature: self.idx(at + 12, aux_len)?,
                declared_name: self.idx(at + 14, aux_len)?,
                annotation_default: self.idx(at + 16, aux_len)?,
                annotations: self.idx(at + 18, aux_len)?,
            });
        }

        let mut fields = Vec::with_capacity(fields_count);
        for i in 0..fields_count {
            let at = self.offsets.fields + i * FIELD_RECORD_SIZE;
            fields.push(FieldInfo {
                name: self.string(read_u16_le(b, at))?,
                type_signature: self.string(read_u16_le(b, at + 2))?,
                modifiers: Modifiers::from_bits_retain(read_u32_le(b, at + 4)),
                generic_signature: self.idx(at + 8, aux_len)?,
                enclosing_type: self.idx(at + 10, aux_len)?,
                annotations: self.idx(at + 12, aux_len)?,
                constant: self.constant(b[at + 14], read_u64_le(b, at + 16))?,
            });
        }

        Ok(ClassMetadata {
            target_name,
            class,
            methods: h.has(flags::HAS_METHODS).then_some(methods),
            fields: h.has(flags::HAS_FIELDS).then_some(fields),
            aux: h.has(flags::HAS_AUX).then_some(aux),
        })
    }

    fn decode_aux(&self) -> Result<Vec<AuxValue>, ModuleError> {
        let mut cursor = Cursor {
            bytes: self.bytes,
            pos: self.offsets.aux,
        };
        let mut values = Vec::with_capacity(self.header.aux_count as usize);
        for _ in 0..self.header.aux_count {
            let t = cursor.u8()?;
            let value = match t {
                tag::STR => AuxValue::Str(self.string(cursor.u16()?)?),
                tag::ANNOTATIONS => AuxValue::Annotations(self.annotations(&mut cursor)?),
                _ => AuxValue::Const(self.aux_const(t, &mut cursor, 0)?),
            };
            values.push(value);
        }
        Ok(values)
    }

    fn annotations(&self, cursor: &mut Cursor<'_>) -> Result<Vec<AnnotationInfo>, ModuleError> {
        let count = cursor.u16()?;
        let mut list = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let type_name = self.string(cursor.u16()?)?;
            let element_count = cursor.u16()?;
            let mut elements = Vec::with_capacity(element_count as usize);
            for _ in 0..element_count {
                let name = self.string(cursor.u16()?)?;
                let t = cursor.u8()?;
                let value = self.aux_const(t, cursor, 0)?;
                elements.push(ElementValue { name, value });
            }
            list.push(AnnotationInfo {
                type_name,
                elements,
            });
        }
        Ok(list)
    }

    fn aux_const(
        &self,
        t: u8,
        cursor: &mut Cursor<'_>,
        depth: usize,
    ) -> Result<AuxConst, ModuleError> {
        let value = match t {
            tag::BOOL => AuxConst::Bool(cursor.u8()? != 0),
            tag::BYTE => AuxConst::Byte(cursor.u8()? as i8),
            tag::CHAR => AuxConst::Char(cursor.u16()?),
            tag::SHORT => AuxConst::Short(cursor.u16()? as i16),
            tag::INT => AuxConst::Int(cursor.u32()? as i32),
            tag::LONG => AuxConst::Long(cursor.u64()? as i64),
            tag::FLOAT => AuxConst::Float(cursor.u32()?),
            tag::DOUBLE => AuxConst::Double(cursor.u64()?),
            tag::STRING => AuxConst::String(self.string(cursor.u16()?)?),
            tag::CLASS => AuxConst::Class(self.string(cursor.u16()?)?),
            tag::ENUM => AuxConst::Enum {
                class: self.string(cursor.u16()?)?,
                name: self.string(cursor.u16()?)?,
            },
            tag::ARRAY => {
                if depth >= MAX_CONST_DEPTH {
                    return Err(ModuleError::NestingTooDeep(MAX_CONST_DEPTH));
                }
                let len = cursor.u16()?;
                let mut items = Vec::with_capacity(len as usize);
                for _ in 0..len {
                    let item_tag = cursor.u8()?;
                    items.push(self.aux_const(item_tag, cursor, depth + 1)?);
                }
                AuxConst::Array(items)
            }
            other => return Err(ModuleError::UnknownTag(other)),
        };
        Ok(value)
    }

    fn constant(&self, t: u8, payload: u64) -> Result<ConstantValue, ModuleError> {
        let value = match t {
            0 => ConstantValue::None,
            tag::BOOL => ConstantValue::Bool(payload != 0),
            tag::BYTE => ConstantValue::Byte(payload as i8),
            tag::CHAR => ConstantValue::Char(payload as u16),
            tag::SHORT => ConstantValue::Short(payload as i16),
            tag::INT => ConstantValue::Int(payload as i32),
            tag::LONG => ConstantValue::Long(payload as i64),
            tag::FLOAT => ConstantValue::Float(f32::from_bits(payload as u32)),
            tag::DOUBLE => ConstantValue::Double(f64::from_bits(payload)),
            tag::STRING => ConstantValue::String(self.string(payload as u16)?),
            other => return Err(ModuleError::UnknownTag(other)),
        };
        Ok(value)
    }

    fn string(&self, id: u16) -> Result<String, ModuleError> {
        if id == 0 {
            return Err(ModuleError::InvalidString(id));
        }
        self.strings
            .get(id as usize)
            .map(|s| s.to_string())
            .ok_or(ModuleError::InvalidString(id))
    }

    fn optional_string(&self, id: u16) -> Result<Option<String>, ModuleError> {
        if id == 0 {
            return Ok(None);
        }
        self.string(id).map(Some)
    }

    /// Read an aux index and check it against the decoded table.
    fn idx(&self, offset: usize, aux_len: usize) -> Result<AuxIdx, ModuleError> {
        let raw = read_u16_le(self.bytes, offset) as i16;
        AuxIdx::from_raw(raw)
            .filter(|idx| idx.index().is_none_or(|i| i < aux_len))
            .ok_or(ModuleError::InvalidAuxIndex {
                index: raw,
                len: aux_len,
            })
    }
}

fn check_bounds(
    bytes: &[u8],
    offset: usize,
    len: usize,
    section: &'static str,
) -> Result<(), ModuleError> {
    if offset + len > bytes.len() {
        return Err(ModuleError::Truncated(section));
    }
    Ok(())
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn take(&mut self, n: usize) -> Result<&[u8], ModuleError> {
        let slice = self
            .bytes
            .get(self.pos..self.pos + n)
            .ok_or(ModuleError::Truncated("aux"))?;
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, ModuleError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ModuleError> {
        let b = self.take(2)?;
        Ok(read_u16_le(b, 0))
    }

    fn u32(&mut self) -> Result<u32, ModuleError> {
        let b = self.take(4)?;
        Ok(read_u32_le(b, 0))
    }

    fn u64(&mut self) -> Result<u64, ModuleError> {
        let b = self.take(8)?;
        Ok(read_u64_le(b, 0))
    }
}
