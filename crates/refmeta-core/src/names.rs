//! Target-language naming rules shared by the encoder and the emitter.

use crate::model::{ClassType, PrimitiveType, TypeRef};

/// Classes that map onto a native root type instead of a mangled name.
const WELL_KNOWN: &[(&str, &str)] = &[
    ("Object", "NSObject"),
    ("String", "NSString"),
    ("Number", "NSNumber"),
];

/// Selectors that clash with methods of the native root object.
const RESERVED_SELECTORS: &[&str] = &[
    "alloc",
    "autorelease",
    "class",
    "copy",
    "dealloc",
    "description",
    "hash",
    "init",
    "new",
    "release",
    "retain",
    "self",
    "superclass",
    "zone",
];

/// Capitalize the first letter of each package segment and join them.
///
/// # Examples
/// ```
/// use refmeta_core::names::package_prefix;
/// assert_eq!(package_prefix(Some("java.lang")), "JavaLang");
/// assert_eq!(package_prefix(Some("foo")), "Foo");
/// assert_eq!(package_prefix(None), "");
/// ```
pub fn package_prefix(package: Option<&str>) -> String {
    let Some(package) = package else {
        return String::new();
    };

    let mut result = String::with_capacity(package.len());
    for segment in package.split('.') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            result.push(first.to_ascii_uppercase());
            result.extend(chars);
        }
    }
    result
}

/// Full target name for a class given its package and binary name.
///
/// Nesting separators (`$`) become underscores: `A$1C$D` → `A_1C_D`.
pub fn target_name(package: Option<&str>, binary_name: &str) -> String {
    if package == Some(crate::model::JAVA_LANG)
        && let Some((_, native)) = WELL_KNOWN.iter().find(|(java, _)| *java == binary_name)
    {
        return (*native).to_string();
    }

    let mut result = package_prefix(package);
    result.push_str(&binary_name.replace('$', "_"));
    result
}

/// Full target name of a class type (type arguments ignored).
pub fn class_target_name(class: &ClassType) -> String {
    target_name(class.package.as_deref(), &class.name)
}

/// C and C++ keywords that are legal Java identifiers.
const RESERVED_C_NAMES: &[&str] = &[
    "and", "asm", "auto", "bool", "delete", "explicit", "extern", "friend", "id", "inline",
    "mutable", "namespace", "not", "operator", "or", "register", "signed", "sizeof", "struct",
    "template", "typedef", "typename", "union", "unsigned", "using", "virtual", "xor",
];

/// Whether a method name would shadow a native root selector or a C keyword.
pub fn is_reserved_selector(name: &str) -> bool {
    RESERVED_SELECTORS.contains(&name) || RESERVED_C_NAMES.contains(&name)
}

/// Target name of an annotation element: the declared name, with `__`
/// appended when it is reserved.
///
/// # Examples
/// ```
/// use refmeta_core::names::element_name;
/// assert_eq!(element_name("value"), "value");
/// assert_eq!(element_name("namespace"), "namespace__");
/// ```
pub fn element_name(name: &str) -> String {
    if is_reserved_selector(name) {
        format!("{name}__")
    } else {
        name.to_string()
    }
}

/// Single-letter descriptor code of a primitive type.
pub fn primitive_code(p: PrimitiveType) -> char {
    match p {
        PrimitiveType::Boolean => 'Z',
        PrimitiveType::Byte => 'B',
        PrimitiveType::Char => 'C',
        PrimitiveType::Short => 'S',
        PrimitiveType::Int => 'I',
        PrimitiveType::Long => 'J',
        PrimitiveType::Float => 'F',
        PrimitiveType::Double => 'D',
        PrimitiveType::Void => 'V',
    }
}

/// Capitalized keyword used for a primitive in selector segments.
pub fn primitive_keyword(p: PrimitiveType) -> &'static str {
    match p {
        PrimitiveType::Boolean => "Boolean",
        PrimitiveType::Byte => "Byte",
        PrimitiveType::Char => "Char",
        PrimitiveType::Short => "Short",
        PrimitiveType::Int => "Int",
        PrimitiveType::Long => "Long",
        PrimitiveType::Float => "Float",
        PrimitiveType::Double => "Double",
        PrimitiveType::Void => "Void",
    }
}

/// Selector keyword for an already-erased parameter type.
///
/// A bare `java.lang.Object` (and any leftover type variable) is `Id`;
/// arrays spell the element name out, so `Object[]` is `NSObjectArray`
/// and `int[][]` is `IntArray2`.
pub fn parameter_keyword(erased: &TypeRef) -> String {
    match erased {
        TypeRef::Primitive(p) => primitive_keyword(*p).to_string(),
        TypeRef::TypeVar(_) => "Id".to_string(),
        TypeRef::Class(class) if class.is_java_lang("Object") => "Id".to_string(),
        TypeRef::Class(class) => class_target_name(class),
        TypeRef::Array(_) => {
            let mut dimensions = 0usize;
            let mut element = erased;
            while let TypeRef::Array(inner) = element {
                dimensions += 1;
                element = inner;
            }
            let mut keyword = match element {
                TypeRef::Primitive(p) => primitive_keyword(*p).to_string(),
                TypeRef::Class(class) => class_target_name(class),
                TypeRef::TypeVar(_) | TypeRef::Array(_) => "NSObject".to_string(),
            };
            keyword.push_str("Array");
            if dimensions > 1 {
                keyword.push_str(&dimensions.to_string());
            }
            keyword
        }
    }
}
