use super::*;

#[test]
fn header_default() {
    let h = Header::default();
    assert!(h.validate_magic());
    assert!(h.validate_version());
    assert_eq!(h.total_size, 0);
    assert!(!h.has(flags::HAS_METHODS));
}

#[test]
fn header_roundtrip() {
    let h = Header {
        magic: MAGIC,
        version: VERSION,
        checksum: 0x12345678,
        total_size: 1024,
        str_blob_size: 100,
        str_table_count: 10,
        methods_count: 3,
        fields_count: 2,
        aux_count: 7,
        flags: flags::HAS_METHODS | flags::HAS_AUX,
        _reserved: [0; 3],
    };

    let bytes = h.to_bytes();
    assert_eq!(bytes.len(), HEADER_SIZE);
    assert_eq!(Header::from_bytes(&bytes), h);
}

#[test]
fn section_offsets_are_aligned_and_ordered() {
    let h = Header {
        str_blob_size: 37,
        str_table_count: 5,
        methods_count: 3,
        fields_count: 1,
        ..Header::default()
    };
    let o = h.compute_offsets();

    assert_eq!(o.str_blob, HEADER_SIZE);
    // 32 + 37 = 69 → 80
    assert_eq!(o.str_table, 80);
    // 80 + 6 * 4 = 104 → 112
    assert_eq!(o.class, 112);
    assert_eq!(o.methods, 144);
    // 144 + 3 * 20 = 204 → 208
    assert_eq!(o.fields, 208);
    // 208 + 24 = 232 → 240
    assert_eq!(o.aux, 240);

    for offset in [o.str_table, o.class, o.methods, o.fields, o.aux] {
        assert_eq!(offset % SECTION_ALIGN, 0);
    }
}

#[test]
fn align_to_section_rounds_up() {
    assert_eq!(align_to_section(0), 0);
    assert_eq!(align_to_section(1), 16);
    assert_eq!(align_to_section(16), 16);
    assert_eq!(align_to_section(17), 32);
}
