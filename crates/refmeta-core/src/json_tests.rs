use indoc::indoc;

use crate::{
    ClassKind, ClassModel, ConstValue, Member, MethodKind, PrimitiveType, Retention, Scope,
    TypeRef, parse_class_models,
};

const LOCAL_CLASS: &str = indoc! {r#"
    {
        "binary_name": "A$1C",
        "simple_name": "C",
        "scopes": [
            { "class": { "class": { "name": "A" } } },
            {
                "method": {
                    "name": "test",
                    "params": [{ "primitive": "int" }, { "primitive": "long" }]
                }
            }
        ],
        "member_types": ["A$1C$D"],
        "members": [
            { "method": { "kind": "constructor" } },
            {
                "field": {
                    "name": "count",
                    "modifiers": ["static", "final"],
                    "type": { "primitive": "int" },
                    "constant": { "int": 5 }
                }
            }
        ]
    }
"#};

#[test]
fn parse_local_class() {
    let model = ClassModel::from_json(LOCAL_CLASS).unwrap();

    assert_eq!(model.binary_name, "A$1C");
    assert_eq!(model.package, None);
    assert_eq!(model.kind, ClassKind::Class);
    assert_eq!(model.scopes.len(), 2);
    assert!(matches!(
        &model.scopes[1],
        Scope::Method { name, constructor: false, .. } if name == "test"
    ));
    assert_eq!(model.member_types, vec!["A$1C$D"]);
}

#[test]
fn parse_members_in_declaration_order() {
    let model = ClassModel::from_json(LOCAL_CLASS).unwrap();

    let Member::Method(ctor) = &model.members[0] else {
        panic!("expected constructor first");
    };
    assert_eq!(ctor.kind, MethodKind::Constructor);
    assert!(ctor.return_type.is_none());

    let Member::Field(field) = &model.members[1] else {
        panic!("expected field second");
    };
    assert_eq!(field.ty, TypeRef::primitive(PrimitiveType::Int));
    assert_eq!(field.constant, Some(ConstValue::Int(5)));
}

#[test]
fn parse_many_models() {
    let json = indoc! {r#"
        [
            { "package": "foo", "binary_name": "Test", "simple_name": "Test" },
            { "binary_name": "Runner", "simple_name": "Runner", "kind": "interface" }
        ]
    "#};

    let models = parse_class_models(json).unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(models[0].package.as_deref(), Some("foo"));
    assert_eq!(models[1].kind, ClassKind::Interface);
}

#[test]
fn to_json_is_stable() {
    let model = ClassModel::from_json(LOCAL_CLASS).unwrap();
    let reparsed = ClassModel::from_json(&model.to_json().unwrap()).unwrap();

    assert_eq!(model, reparsed);
}

#[test]
fn parse_error_is_reported() {
    let err = ClassModel::from_json(r#"{ "simple_name": "NoBinaryName" }"#).unwrap_err();
    assert!(err.to_string().contains("binary_name"));
}

#[test]
fn simple_name_is_required() {
    let err = ClassModel::from_json(r#"{ "binary_name": "Test" }"#).unwrap_err();
    assert!(err.to_string().contains("simple_name"));
}

#[test]
fn empty_simple_name_is_anonymous() {
    let anonymous = ClassModel::from_json(r#"{ "binary_name": "A$1", "simple_name": "" }"#).unwrap();
    let named = ClassModel::from_json(r#"{ "binary_name": "A$B", "simple_name": "B" }"#).unwrap();

    assert!(anonymous.is_anonymous());
    assert!(!named.is_anonymous());
}

#[test]
fn parse_annotations() {
    let json = indoc! {r#"
        {
            "package": "foo",
            "binary_name": "Test",
            "simple_name": "Test",
            "annotations": [
                {
                    "type": { "package": "org.junit", "name": "Ignore" },
                    "elements": [{ "name": "value", "value": { "string": "" } }]
                },
                { "type": { "name": "Marker" }, "retention": "class" }
            ],
            "members": [
                {
                    "method": {
                        "name": "foo",
                        "return_type": { "primitive": "void" },
                        "annotations": [{ "type": { "package": "org.junit", "name": "After" } }]
                    }
                }
            ]
        }
    "#};
    let model = ClassModel::from_json(json).unwrap();

    let ignore = &model.annotations[0];
    assert_eq!(ignore.ty.name, "Ignore");
    assert!(ignore.is_runtime());
    assert_eq!(ignore.elements[0].name, "value");
    assert_eq!(ignore.elements[0].value, ConstValue::String(String::new()));
    assert_eq!(model.annotations[1].retention, Retention::Class);

    let method = model.methods().next().unwrap();
    assert_eq!(method.annotations[0].ty.name, "After");
    assert!(method.annotations[0].elements.is_empty());
}

#[test]
fn new_derives_simple_name() {
    assert_eq!(ClassModel::new(None, "A$1C").simple_name, "C");
    assert_eq!(ClassModel::new(None, "A$B").simple_name, "B");
    assert!(ClassModel::new(None, "A$1").is_anonymous());
}
