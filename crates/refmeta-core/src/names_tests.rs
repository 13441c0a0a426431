use crate::model::{ClassType, PrimitiveType, TypeRef};
use crate::names::{
    class_target_name, element_name, is_reserved_selector, package_prefix, parameter_keyword,
    primitive_code, target_name,
};

#[test]
fn package_prefix_capitalizes_segments() {
    assert_eq!(package_prefix(Some("foo")), "Foo");
    assert_eq!(package_prefix(Some("java.util.concurrent")), "JavaUtilConcurrent");
    assert_eq!(package_prefix(Some("com.example")), "ComExample");
}

#[test]
fn package_prefix_keeps_inner_case() {
    assert_eq!(package_prefix(Some("org.junit")), "OrgJunit");
    assert_eq!(package_prefix(Some("myApp.ioUtils")), "MyAppIoUtils");
}

#[test]
fn package_prefix_default_package() {
    assert_eq!(package_prefix(None), "");
}

#[test]
fn target_name_nesting() {
    assert_eq!(target_name(None, "A"), "A");
    assert_eq!(target_name(None, "A$B"), "A_B");
    assert_eq!(target_name(None, "A$1C$D"), "A_1C_D");
    assert_eq!(target_name(Some("foo"), "Test"), "FooTest");
}

#[test]
fn target_name_well_known() {
    assert_eq!(target_name(Some("java.lang"), "Object"), "NSObject");
    assert_eq!(target_name(Some("java.lang"), "String"), "NSString");
    assert_eq!(target_name(Some("java.lang"), "Runnable"), "JavaLangRunnable");
    // Only java.lang gets the native mapping.
    assert_eq!(target_name(Some("foo"), "Object"), "FooObject");
}

#[test]
fn class_target_name_ignores_args() {
    let list = ClassType::new(Some("java.util"), "List")
        .interface()
        .with_args(vec![crate::model::TypeArg::Wildcard]);
    assert_eq!(class_target_name(&list), "JavaUtilList");
}

#[test]
fn reserved_selectors() {
    assert!(is_reserved_selector("hash"));
    assert!(is_reserved_selector("init"));
    assert!(!is_reserved_selector("hashCode"));
    assert!(!is_reserved_selector("run"));
    assert!(is_reserved_selector("namespace"));
    assert!(is_reserved_selector("register"));
}

#[test]
fn element_names() {
    assert_eq!(element_name("value"), "value");
    assert_eq!(element_name("namespace"), "namespace__");
    assert_eq!(element_name("hash"), "hash__");
}

#[test]
fn primitive_codes() {
    assert_eq!(primitive_code(PrimitiveType::Boolean), 'Z');
    assert_eq!(primitive_code(PrimitiveType::Long), 'J');
    assert_eq!(primitive_code(PrimitiveType::Void), 'V');
}

#[test]
fn parameter_keyword_primitives_and_objects() {
    assert_eq!(parameter_keyword(&TypeRef::primitive(PrimitiveType::Int)), "Int");
    assert_eq!(parameter_keyword(&TypeRef::object()), "Id");
    assert_eq!(parameter_keyword(&TypeRef::string()), "NSString");
    assert_eq!(
        parameter_keyword(&TypeRef::interface(Some("java.lang"), "Runnable")),
        "JavaLangRunnable"
    );
}

#[test]
fn parameter_keyword_arrays() {
    let objects = TypeRef::array_of(TypeRef::object());
    assert_eq!(parameter_keyword(&objects), "NSObjectArray");

    let ints = TypeRef::array_of(TypeRef::array_of(TypeRef::primitive(PrimitiveType::Int)));
    assert_eq!(parameter_keyword(&ints), "IntArray2");
}
