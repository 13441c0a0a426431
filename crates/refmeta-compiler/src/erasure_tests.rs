use refmeta_core::{ClassModel, ClassType, PrimitiveType, Scope, TypeArg, TypeParam, TypeRef};

use crate::erasure::{Erased, TypeEnv, type_list};
use crate::error::Malformed;

fn runnable() -> TypeRef {
    TypeRef::interface(Some("java.lang"), "Runnable")
}

#[test]
fn descriptors() {
    let env = TypeEnv::default();
    let cases = [
        (TypeRef::primitive(PrimitiveType::Byte), "B"),
        (TypeRef::primitive(PrimitiveType::Boolean), "Z"),
        (TypeRef::primitive(PrimitiveType::Long), "J"),
        (TypeRef::void(), "V"),
        (TypeRef::object(), "LNSObject;"),
        (TypeRef::string(), "LNSString;"),
        (TypeRef::class(Some("foo"), "Test$Inner"), "LFooTest_Inner;"),
        (TypeRef::array_of(TypeRef::object()), "[LNSObject;"),
        (
            TypeRef::array_of(TypeRef::array_of(TypeRef::primitive(PrimitiveType::Int))),
            "[[I",
        ),
    ];

    for (ty, expected) in cases {
        assert_eq!(env.erase(&ty).unwrap().descriptor(), expected);
    }
}

#[test]
fn value_signatures_drop_top_level_semicolon() {
    let env = TypeEnv::default();

    let object = env.erase(&TypeRef::object()).unwrap();
    let array = env.erase(&TypeRef::array_of(TypeRef::object())).unwrap();
    let primitive = env.erase(&TypeRef::primitive(PrimitiveType::Char)).unwrap();

    assert_eq!(object.value_signature(), "LNSObject");
    assert_eq!(array.value_signature(), "[LNSObject;");
    assert_eq!(primitive.value_signature(), "C");
}

#[test]
fn class_types_lose_arguments() {
    let list = ClassType::new(Some("java.util"), "List")
        .interface()
        .with_args(vec![TypeArg::Type(TypeRef::string())]);
    let erased = TypeEnv::default().erase(&TypeRef::Class(list)).unwrap();

    let Erased::Class(class) = &erased else {
        panic!("expected a class type");
    };
    assert!(class.args.is_empty());
    assert_eq!(erased.descriptor(), "LJavaUtilList;");
}

#[test]
fn type_variables_erase_to_first_bound() {
    let model = ClassModel::new(None, "Test").with_type_params(vec![
        TypeParam::new("T"),
        TypeParam::bounded("R", vec![runnable(), TypeRef::class(Some("foo"), "Marker")]),
        TypeParam::bounded("S", vec![TypeRef::var("R")]),
    ]);
    let env = TypeEnv::for_class(&model);

    assert_eq!(env.erase(&TypeRef::var("T")).unwrap().descriptor(), "LNSObject;");
    assert_eq!(
        env.erase(&TypeRef::var("R")).unwrap().descriptor(),
        "LJavaLangRunnable;"
    );
    assert_eq!(
        env.erase(&TypeRef::var("S")).unwrap().descriptor(),
        "LJavaLangRunnable;"
    );
    assert_eq!(
        env.erase(&TypeRef::array_of(TypeRef::var("T")))
            .unwrap()
            .descriptor(),
        "[LNSObject;"
    );
}

#[test]
fn method_params_shadow_class_params() {
    let model = ClassModel::new(None, "Test").with_type_params(vec![TypeParam::new("T")]);
    let method_params = [TypeParam::bounded("T", vec![TypeRef::string()])];
    let env = TypeEnv::for_class(&model);
    let method_env = env.with_method(&method_params);

    assert_eq!(env.erase(&TypeRef::var("T")).unwrap().descriptor(), "LNSObject;");
    assert_eq!(
        method_env.erase(&TypeRef::var("T")).unwrap().descriptor(),
        "LNSString;"
    );
}

#[test]
fn enclosing_scopes_are_visible() {
    let model = ClassModel::new(None, "Outer$1Local").with_scopes(vec![
        Scope::Class {
            class: ClassType::new(None, "Outer"),
            type_params: vec![TypeParam::bounded("E", vec![runnable()])],
        },
        Scope::Method {
            name: "run".to_string(),
            params: Vec::new(),
            constructor: false,
            type_params: vec![TypeParam::bounded("M", vec![TypeRef::string()])],
        },
    ]);
    let env = TypeEnv::for_class(&model);

    assert_eq!(
        env.erase(&TypeRef::var("E")).unwrap().descriptor(),
        "LJavaLangRunnable;"
    );
    assert_eq!(env.erase(&TypeRef::var("M")).unwrap().descriptor(), "LNSString;");
}

#[test]
fn bounds_resolve_where_declared() {
    // class Outer<T extends Number> { class Inner<S extends T> { <T> void m(S s) } }
    let number = TypeRef::class(Some("java.lang"), "Number");
    let model = ClassModel::new(None, "Outer$Inner")
        .with_scopes(vec![Scope::Class {
            class: ClassType::new(None, "Outer"),
            type_params: vec![TypeParam::bounded("T", vec![number])],
        }])
        .with_type_params(vec![TypeParam::bounded("S", vec![TypeRef::var("T")])]);
    let method_params = [TypeParam::new("T")];
    let env = TypeEnv::for_class(&model).with_method(&method_params);

    assert_eq!(env.erase(&TypeRef::var("S")).unwrap().descriptor(), "LNSNumber;");
    assert_eq!(env.erase(&TypeRef::var("T")).unwrap().descriptor(), "LNSObject;");
}

#[test]
fn array_bounds_resolve_where_declared() {
    let model = ClassModel::new(None, "Test").with_type_params(vec![
        TypeParam::bounded("E", vec![TypeRef::string()]),
        TypeParam::bounded("A", vec![TypeRef::array_of(TypeRef::var("E"))]),
    ]);
    let method_params = [TypeParam::new("E")];
    let env = TypeEnv::for_class(&model).with_method(&method_params);

    assert_eq!(env.erase(&TypeRef::var("A")).unwrap().descriptor(), "[LNSString;");
}

#[test]
fn unknown_type_variable() {
    let err = TypeEnv::default().erase(&TypeRef::var("U")).unwrap_err();
    assert_eq!(err, Malformed::UnknownTypeVar("U".to_string()));
}

#[test]
fn cyclic_bounds() {
    let model = ClassModel::new(None, "Test").with_type_params(vec![
        TypeParam::bounded("A", vec![TypeRef::var("B")]),
        TypeParam::bounded("B", vec![TypeRef::var("A")]),
    ]);
    let err = TypeEnv::for_class(&model)
        .erase(&TypeRef::var("A"))
        .unwrap_err();

    assert!(matches!(err, Malformed::CyclicTypeVar(_)));
}

#[test]
fn type_lists_concatenate() {
    let env = TypeEnv::default();
    let thrown = env
        .erase_all(&[
            TypeRef::class(Some("java.lang"), "InterruptedException"),
            TypeRef::class(Some("java.lang"), "Error"),
        ])
        .unwrap();

    assert_eq!(
        type_list(&thrown),
        "LJavaLangInterruptedException;LJavaLangError;"
    );
    assert_eq!(type_list(&[]), "");
}

#[test]
fn keywords() {
    let env = TypeEnv::default();
    let keyword = |ty: TypeRef| env.erase(&ty).unwrap().keyword();

    assert_eq!(keyword(TypeRef::primitive(PrimitiveType::Int)), "Int");
    assert_eq!(keyword(TypeRef::object()), "Id");
    assert_eq!(keyword(TypeRef::string()), "NSString");
    assert_eq!(keyword(TypeRef::array_of(TypeRef::object())), "NSObjectArray");
}
