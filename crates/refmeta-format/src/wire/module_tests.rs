use crate::{
    AnnotationInfo, AuxConst, AuxIdx, AuxValue, ClassInfo, ClassMetadata, ConstantValue,
    FieldInfo, METADATA_VERSION, MethodInfo, Modifiers,
};

use super::encode::tag;
use super::module::MAX_CONST_DEPTH;
use super::{HEADER_SIZE, Header, MAGIC, Module, ModuleError, flags};

fn idx(i: usize) -> AuxIdx {
    AuxIdx::new(i).unwrap()
}

fn sample() -> ClassMetadata {
    ClassMetadata {
        target_name: "A_1C".to_string(),
        class: ClassInfo {
            name: "C".to_string(),
            package: None,
            version: METADATA_VERSION,
            modifiers: Modifiers::empty(),
            inner_classes: idx(3),
            enclosing_class: idx(2),
            enclosing_method: idx(4),
            generic_signature: AuxIdx::ABSENT,
            annotations: AuxIdx::ABSENT,
        },
        methods: Some(vec![MethodInfo {
            selector: "initWithNSString:".to_string(),
            return_type: None,
            modifiers: Modifiers::empty(),
            param_types: idx(0),
            exceptions: AuxIdx::ABSENT,
            generic_signature: AuxIdx::ABSENT,
            declared_name: AuxIdx::ABSENT,
            annotation_default: AuxIdx::ABSENT,
            annotations: AuxIdx::ABSENT,
        }]),
        fields: Some(vec![
            FieldInfo {
                name: "count_".to_string(),
                type_signature: "I".to_string(),
                constant: ConstantValue::Int(-5),
                modifiers: Modifiers::STATIC | Modifiers::FINAL,
                generic_signature: AuxIdx::ABSENT,
                enclosing_type: idx(1),
                annotations: AuxIdx::ABSENT,
            },
            FieldInfo {
                name: "label_".to_string(),
                type_signature: "LNSString".to_string(),
                constant: ConstantValue::String("hi".to_string()),
                modifiers: Modifiers::STATIC | Modifiers::FINAL,
                generic_signature: AuxIdx::ABSENT,
                enclosing_type: idx(1),
                annotations: AuxIdx::ABSENT,
            },
        ]),
        aux: Some(vec![
            AuxValue::from("LNSString;"),
            AuxValue::from("LA_1C;"),
            AuxValue::from("LA"),
            AuxValue::from("LA_1C_D;"),
            AuxValue::from("initWithNSString:"),
            AuxValue::Const(AuxConst::Array(vec![
                AuxConst::double(-0.0),
                AuxConst::Enum {
                    class: "LFooColor;".to_string(),
                    name: "RED".to_string(),
                },
            ])),
        ]),
    }
}

#[test]
fn decode_restores_metadata() {
    let metadata = sample();
    let bytes = metadata.to_bytes().unwrap();

    let module = Module::from_bytes(&bytes).unwrap();
    assert_eq!(module.metadata(), &metadata);
    assert_eq!(module.header().methods_count, 1);
    assert_eq!(module.header().fields_count, 2);
    assert_eq!(module.header().aux_count, 6);
}

#[test]
fn annotation_slots_survive_decode() {
    let mut metadata = sample();
    let list = vec![
        AnnotationInfo::new("OrgJunitAfter"),
        AnnotationInfo::new("FooBar")
            .with_element("namespace__", AuxConst::String("mynames".to_string()))
            .with_element("sizes", AuxConst::Array(vec![AuxConst::Int(1)])),
    ];
    metadata.aux.as_mut().unwrap().push(AuxValue::Annotations(list));
    metadata.class.annotations = idx(6);
    metadata.methods.as_mut().unwrap()[0].annotations = idx(6);
    metadata.fields.as_mut().unwrap()[1].annotations = idx(6);

    let bytes = metadata.to_bytes().unwrap();
    let module = Module::from_bytes(&bytes).unwrap();

    assert_eq!(module.metadata(), &metadata);
    assert_eq!(module.metadata().fields()[1].constant, ConstantValue::String("hi".to_string()));
}

#[test]
fn absent_arrays_stay_absent() {
    let mut metadata = sample();
    metadata.methods = None;
    metadata.fields = None;
    metadata.aux = None;
    metadata.class.inner_classes = AuxIdx::ABSENT;
    metadata.class.enclosing_class = AuxIdx::ABSENT;
    metadata.class.enclosing_method = AuxIdx::ABSENT;

    let bytes = metadata.to_bytes().unwrap();
    let module = Module::from_bytes(&bytes).unwrap();

    assert_eq!(module.header().flags, 0);
    assert_eq!(module.into_metadata(), metadata);
}

#[test]
fn presence_flags_follow_arrays() {
    let bytes = sample().to_bytes().unwrap();
    let module = Module::from_bytes(&bytes).unwrap();
    assert!(module.header().has(flags::HAS_METHODS));
    assert!(module.header().has(flags::HAS_FIELDS));
    assert!(module.header().has(flags::HAS_AUX));
}

#[test]
fn encoding_is_deterministic() {
    assert_eq!(sample().to_bytes().unwrap(), sample().to_bytes().unwrap());
}

#[test]
fn rejects_short_buffer() {
    let err = Module::from_bytes(&[0; 8]).unwrap_err();
    assert!(matches!(err, ModuleError::FileTooSmall(8)));
}

#[test]
fn rejects_bad_magic() {
    let mut bytes = sample().to_bytes().unwrap();
    bytes[0] = b'X';
    assert!(matches!(
        Module::from_bytes(&bytes).unwrap_err(),
        ModuleError::InvalidMagic
    ));
    assert_eq!(&MAGIC, b"RFMD");
}

#[test]
fn rejects_corrupted_body() {
    let mut bytes = sample().to_bytes().unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xff;
    assert!(matches!(
        Module::from_bytes(&bytes).unwrap_err(),
        ModuleError::ChecksumMismatch { .. }
    ));
}

#[test]
fn rejects_size_mismatch() {
    let mut bytes = sample().to_bytes().unwrap();
    bytes.push(0);
    assert!(matches!(
        Module::from_bytes(&bytes).unwrap_err(),
        ModuleError::SizeMismatch { .. }
    ));
}

#[test]
fn rejects_dangling_aux_index() {
    let mut metadata = sample();
    metadata.class.generic_signature = idx(40);

    let bytes = metadata.to_bytes().unwrap();
    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err,
        ModuleError::InvalidAuxIndex { index: 40, len: 6 }
    ));
}

/// Rewrite the aux section of a one-entry buffer and fix up size and checksum.
fn with_aux_section(aux: &[u8]) -> Vec<u8> {
    let metadata = ClassMetadata {
        target_name: "Test".to_string(),
        class: ClassInfo {
            name: "Test".to_string(),
            package: None,
            version: METADATA_VERSION,
            modifiers: Modifiers::empty(),
            inner_classes: AuxIdx::ABSENT,
            enclosing_class: AuxIdx::ABSENT,
            enclosing_method: AuxIdx::ABSENT,
            generic_signature: AuxIdx::ABSENT,
            annotations: AuxIdx::ABSENT,
        },
        methods: None,
        fields: None,
        aux: Some(vec![AuxValue::Const(AuxConst::Bool(true))]),
    };
    let mut bytes = metadata.to_bytes().unwrap();
    let mut header = Header::from_bytes(&bytes);
    bytes.truncate(header.compute_offsets().aux);
    bytes.extend_from_slice(aux);
    header.total_size = bytes.len() as u32;
    header.checksum = crc32fast::hash(&bytes[HEADER_SIZE..]);
    bytes[..HEADER_SIZE].copy_from_slice(&header.to_bytes());
    bytes
}

fn nested_arrays(depth: usize) -> Vec<u8> {
    let mut aux = Vec::with_capacity(depth * 3 + 2);
    for _ in 0..depth {
        aux.extend_from_slice(&[tag::ARRAY, 1, 0]);
    }
    aux.extend_from_slice(&[tag::BOOL, 1]);
    aux
}

#[test]
fn accepts_nesting_up_to_limit() {
    let bytes = with_aux_section(&nested_arrays(MAX_CONST_DEPTH));
    let module = Module::from_bytes(&bytes).unwrap();

    let AuxValue::Const(mut value) = module.metadata().aux.as_ref().unwrap()[0].clone() else {
        panic!("expected a constant");
    };
    let mut depth = 0;
    while let AuxConst::Array(mut items) = value {
        value = items.pop().unwrap();
        depth += 1;
    }
    assert_eq!(depth, MAX_CONST_DEPTH);
    assert_eq!(value, AuxConst::Bool(true));
}

#[test]
fn rejects_deeply_nested_arrays() {
    let bytes = with_aux_section(&nested_arrays(200_000));
    let err = Module::from_bytes(&bytes).unwrap_err();

    assert!(matches!(err, ModuleError::NestingTooDeep(MAX_CONST_DEPTH)));
    assert_eq!(err.to_string(), "constant nesting exceeds 64 levels");
}

#[test]
fn module_error_display() {
    assert_eq!(
        ModuleError::InvalidMagic.to_string(),
        "invalid magic: expected RFMD"
    );
    assert!(ModuleError::UnsupportedVersion(99).to_string().contains("99"));
    assert!(
        ModuleError::FileTooSmall(12)
            .to_string()
            .contains(&HEADER_SIZE.to_string())
    );
}
