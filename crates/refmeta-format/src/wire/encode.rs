//! Serialization of `ClassMetadata` into the wire form.

use crate::records::{AnnotationInfo, AuxConst, AuxIdx, AuxValue, ClassMetadata, ConstantValue};

use super::header::{Header, flags};
use super::string_table::StringTableBuilder;
use super::{CLASS_RECORD_SIZE, FIELD_RECORD_SIZE, HEADER_SIZE, METHOD_RECORD_SIZE};

/// Error during wire encoding.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("too many strings: {0} (max 65534)")]
    TooManyStrings(usize),
    #[error("too many {section} entries: {count} (max 65535)")]
    TooManyEntries { section: &'static str, count: usize },
}

pub(super) mod tag {
    pub const STR: u8 = 0;
    pub const BOOL: u8 = 1;
    pub const BYTE: u8 = 2;
    pub const CHAR: u8 = 3;
    pub const SHORT: u8 = 4;
    pub const INT: u8 = 5;
    pub const LONG: u8 = 6;
    pub const FLOAT: u8 = 7;
    pub const DOUBLE: u8 = 8;
    pub const STRING: u8 = 9;
    pub const CLASS: u8 = 10;
    pub const ENUM: u8 = 11;
    pub const ARRAY: u8 = 12;
    pub const ANNOTATIONS: u8 = 13;
}

impl ClassMetadata {
    /// Encode into the binary wire form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut strings = StringTableBuilder::new();

        let target_name = strings.intern(&self.target_name);
        let class_name = strings.intern(&self.class.name);
        let package = strings.intern_opt(self.class.package.as_deref());

        let mut class_bytes = Vec::with_capacity(CLASS_RECORD_SIZE);
        put_u16(&mut class_bytes, target_name.0);
        put_u16(&mut class_bytes, class_name.0);
        put_u16(&mut class_bytes, package.0);
        put_idx(&mut class_bytes, self.class.annotations);
        class_bytes.extend_from_slice(&self.class.version.to_le_bytes());
        class_bytes.extend_from_slice(&self.class.modifiers.bits().to_le_bytes());
        for idx in [
            self.class.inner_classes,
            self.class.enclosing_class,
            self.class.enclosing_method,
            self.class.generic_signature,
        ] {
            put_idx(&mut class_bytes, idx);
        }
        debug_assert_eq!(class_bytes.len(), CLASS_RECORD_SIZE);

        let methods = self.methods();
        let mut methods_bytes = Vec::with_capacity(methods.len() * METHOD_RECORD_SIZE);
        for m in methods {
            put_u16(&mut methods_bytes, strings.intern(&m.selector).0);
            put_u16(&mut methods_bytes, strings.intern_opt(m.return_type.as_deref()).0);
            methods_bytes.extend_from_slice(&m.modifiers.bits().to_le_bytes());
            for idx in [
                m.param_types,
                m.exceptions,
                m.generic_signature,
                m.declared_name,
                m.annotation_default,
                m.annotations,
            ] {
                put_idx(&mut methods_bytes, idx);
            }
        }

        let fields = self.fields();
        let mut fields_bytes = Vec::with_capacity(fields.len() * FIELD_RECORD_SIZE);
        for f in fields {
            put_u16(&mut fields_bytes, strings.intern(&f.name).0);
            put_u16(&mut fields_bytes, strings.intern(&f.type_signature).0);
            fields_bytes.extend_from_slice(&f.modifiers.bits().to_le_bytes());
            put_idx(&mut fields_bytes, f.generic_signature);
            put_idx(&mut fields_bytes, f.enclosing_type);
            put_idx(&mut fields_bytes, f.annotations);
            let (const_tag, payload) = encode_constant(&f.constant, &mut strings);
            fields_bytes.push(const_tag);
            fields_bytes.push(0);
            fields_bytes.extend_from_slice(&payload.to_le_bytes());
        }

        let aux = self.aux.as_deref().unwrap_or_default();
        let mut aux_bytes = Vec::new();
        for value in aux {
            match value {
                AuxValue::Str(s) => {
                    aux_bytes.push(tag::STR);
                    put_u16(&mut aux_bytes, strings.intern(s).0);
                }
                AuxValue::Const(c) => encode_aux_const(c, &mut strings, &mut aux_bytes)?,
                AuxValue::Annotations(list) => {
                    encode_annotations(list, &mut strings, &mut aux_bytes)?
                }
            }
        }

        strings.validate()?;
        let methods_count = count_u16("method", methods.len())?;
        let fields_count = count_u16("field", fields.len())?;
        let aux_count = count_u16("aux", aux.len())?;

        let (str_blob, str_table) = strings.emit();

        let mut header = Header {
            str_blob_size: str_blob.len() as u32,
            str_table_count: strings.len() as u16,
            methods_count,
            fields_count,
            aux_count,
            flags: presence_flags(self),
            ..Header::default()
        };
        let offsets = header.compute_offsets();

        let mut out = vec![0u8; HEADER_SIZE];
        place(&mut out, offsets.str_blob, &str_blob);
        place(&mut out, offsets.str_table, &str_table);
        place(&mut out, offsets.class, &class_bytes);
        place(&mut out, offsets.methods, &methods_bytes);
        place(&mut out, offsets.fields, &fields_bytes);
        place(&mut out, offsets.aux, &aux_bytes);

        header.total_size = out.len() as u32;
        header.checksum = crc32fast::hash(&out[HEADER_SIZE..]);
        out[..HEADER_SIZE].copy_from_slice(&header.to_bytes());

        Ok(out)
    }
}

fn presence_flags(metadata: &ClassMetadata) -> u8 {
    let mut bits = 0;
    if metadata.methods.is_some() {
        bits |= flags::HAS_METHODS;
    }
    if metadata.fields.is_some() {
        bits |= flags::HAS_FIELDS;
    }
    if metadata.aux.is_some() {
        bits |= flags::HAS_AUX;
    }
    bits
}

fn count_u16(section: &'static str, count: usize) -> Result<u16, EncodeError> {
    u16::try_from(count).map_err(|_| EncodeError::TooManyEntries { section, count })
}

/// Pad `out` up to `offset` and append `bytes`.
fn place(out: &mut Vec<u8>, offset: usize, bytes: &[u8]) {
    debug_assert!(out.len() <= offset, "sections overlap");
    out.resize(offset, 0);
    out.extend_from_slice(bytes);
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_idx(out: &mut Vec<u8>, idx: AuxIdx) {
    out.extend_from_slice(&idx.get().to_le_bytes());
}

fn encode_constant(value: &ConstantValue, strings: &mut StringTableBuilder) -> (u8, u64) {
    match value {
        ConstantValue::None => (0, 0),
        ConstantValue::Bool(v) => (tag::BOOL, *v as u64),
        ConstantValue::Byte(v) => (tag::BYTE, *v as i64 as u64),
        ConstantValue::Char(v) => (tag::CHAR, *v as u64),
        ConstantValue::Short(v) => (tag::SHORT, *v as i64 as u64),
        ConstantValue::Int(v) => (tag::INT, *v as i64 as u64),
        ConstantValue::Long(v) => (tag::LONG, *v as u64),
        ConstantValue::Float(v) => (tag::FLOAT, v.to_bits() as u64),
        ConstantValue::Double(v) => (tag::DOUBLE, v.to_bits()),
        ConstantValue::String(s) => (tag::STRING, strings.intern(s).0 as u64),
    }
}

/// Count, then per annotation: type name, element count, and per element its
/// name followed by a tagged constant.
fn encode_annotations(
    list: &[AnnotationInfo],
    strings: &mut StringTableBuilder,
    out: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    out.push(tag::ANNOTATIONS);
    put_u16(out, count_u16("annotation", list.len())?);
    for annotation in list {
        put_u16(out, strings.intern(&annotation.type_name).0);
        put_u16(out, count_u16("annotation element", annotation.elements.len())?);
        for element in &annotation.elements {
            put_u16(out, strings.intern(&element.name).0);
            encode_aux_const(&element.value, strings, out)?;
        }
    }
    Ok(())
}

fn encode_aux_const(
    value: &AuxConst,
    strings: &mut StringTableBuilder,
    out: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    match value {
        AuxConst::Bool(v) => {
            out.push(tag::BOOL);
            out.push(*v as u8);
        }
        AuxConst::Byte(v) => {
            out.push(tag::BYTE);
            out.extend_from_slice(&v.to_le_bytes());
        }
        AuxConst::Char(v) => {
            out.push(tag::CHAR);
            put_u16(out, *v);
        }
        AuxConst::Short(v) => {
            out.push(tag::SHORT);
            out.extend_from_slice(&v.to_le_bytes());
        }
        AuxConst::Int(v) => {
            out.push(tag::INT);
            out.extend_from_slice(&v.to_le_bytes());
        }
        AuxConst::Long(v) => {
            out.push(tag::LONG);
            out.extend_from_slice(&v.to_le_bytes());
        }
        AuxConst::Float(bits) => {
            out.push(tag::FLOAT);
            out.extend_from_slice(&bits.to_le_bytes());
        }
        AuxConst::Double(bits) => {
            out.push(tag::DOUBLE);
            out.extend_from_slice(&bits.to_le_bytes());
        }
        AuxConst::String(s) => {
            out.push(tag::STRING);
            put_u16(out, strings.intern(s).0);
        }
        AuxConst::Class(descriptor) => {
            out.push(tag::CLASS);
            put_u16(out, strings.intern(descriptor).0);
        }
        AuxConst::Enum { class, name } => {
            out.push(tag::ENUM);
            put_u16(out, strings.intern(class).0);
            put_u16(out, strings.intern(name).0);
        }
        AuxConst::Array(items) => {
            out.push(tag::ARRAY);
            put_u16(out, count_u16("array element", items.len())?);
            for item in items {
                encode_aux_const(item, strings, out)?;
            }
        }
    }
    Ok(())
}

