//! Resolved class model handed over by the front end.
//!
//! Everything here is already type-checked: type references are resolved,
//! generic parameters are declared, and implicit members (such as the
//! default constructor) are present. The metadata pass only reads it.

use serde::{Deserialize, Serialize};

pub const JAVA_LANG: &str = "java.lang";

/// One translated class, interface, annotation type or enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassModel {
    /// Dotted package name, `None` for the default package.
    #[serde(default)]
    pub package: Option<String>,
    /// Package-relative binary name (`A$B`, `A$1C`, `A$1`).
    pub binary_name: String,
    /// Declared simple name, empty for anonymous classes. Required in JSON so
    /// that an omitted name is an error rather than an anonymous class.
    pub simple_name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub synthetic: bool,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    /// `None` means `java.lang.Object` (or no superclass for interfaces).
    #[serde(default)]
    pub superclass: Option<TypeRef>,
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    /// Enclosing declaration scopes, outermost first. Empty for top-level classes.
    #[serde(default)]
    pub scopes: Vec<Scope>,
    /// Binary names of directly declared member types, in declaration order.
    #[serde(default)]
    pub member_types: Vec<String>,
    /// Declared methods, constructors and fields, in declaration order.
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Annotation,
    Enum,
}

impl ClassKind {
    /// Interfaces and annotation types.
    pub fn is_interface(self) -> bool {
        matches!(self, Self::Interface | Self::Annotation)
    }
}

/// Source-level modifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Static,
    Final,
    Synchronized,
    Volatile,
    Transient,
    Native,
    Abstract,
    Strictfp,
    /// Interface default method.
    Default,
}

/// A declaration scope enclosing a nested class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Body of a class (member or local class declared inside it).
    Class {
        class: ClassType,
        #[serde(default)]
        type_params: Vec<TypeParam>,
    },
    /// Body of a method or constructor declared by the nearest enclosing class scope.
    Method {
        name: String,
        #[serde(default)]
        params: Vec<TypeRef>,
        #[serde(default)]
        constructor: bool,
        #[serde(default)]
        type_params: Vec<TypeParam>,
    },
    /// Instance or static initializer block.
    Initializer {
        #[serde(default, rename = "static")]
        is_static: bool,
    },
}

impl Scope {
    pub fn type_params(&self) -> &[TypeParam] {
        match self {
            Self::Class { type_params, .. } | Self::Method { type_params, .. } => type_params,
            Self::Initializer { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    Method(MethodModel),
    Field(FieldModel),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    #[default]
    Method,
    Constructor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodModel {
    /// Declared name. Ignored for constructors.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: MethodKind,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    #[serde(default)]
    pub params: Vec<TypeRef>,
    /// Required for methods, absent for constructors.
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub throws: Vec<TypeRef>,
    #[serde(default)]
    pub varargs: bool,
    #[serde(default)]
    pub synthetic: bool,
    #[serde(default)]
    pub bridge: bool,
    /// Default value of an annotation type element.
    #[serde(default)]
    pub annotation_default: Option<ConstValue>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl MethodModel {
    pub fn method(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind: MethodKind::Method,
            modifiers: Vec::new(),
            type_params: Vec::new(),
            params: Vec::new(),
            return_type: Some(return_type),
            throws: Vec::new(),
            varargs: false,
            synthetic: false,
            bridge: false,
            annotation_default: None,
            annotations: Vec::new(),
        }
    }

    pub fn constructor() -> Self {
        Self {
            name: String::new(),
            kind: MethodKind::Constructor,
            return_type: None,
            ..Self::method("", TypeRef::void())
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == MethodKind::Constructor
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    pub fn with_params(mut self, params: Vec<TypeRef>) -> Self {
        self.params = params;
        self
    }

    pub fn with_type_params(mut self, type_params: Vec<TypeParam>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_throws(mut self, throws: Vec<TypeRef>) -> Self {
        self.throws = throws;
        self
    }

    pub fn varargs(mut self) -> Self {
        self.varargs = true;
        self
    }

    pub fn with_default(mut self, value: ConstValue) -> Self {
        self.annotation_default = Some(value);
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldModel {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Compile-time constant initializer.
    #[serde(default)]
    pub constant: Option<ConstValue>,
    #[serde(default)]
    pub synthetic: bool,
    #[serde(default)]
    pub enum_constant: bool,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl FieldModel {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            ty,
            constant: None,
            synthetic: false,
            enum_constant: false,
            annotations: Vec::new(),
        }
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    pub fn with_constant(mut self, value: ConstValue) -> Self {
        self.constant = Some(value);
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

/// A resolved, possibly generic, type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Primitive(PrimitiveType),
    Class(ClassType),
    Array(Box<TypeRef>),
    TypeVar(String),
}

impl TypeRef {
    pub fn void() -> Self {
        Self::Primitive(PrimitiveType::Void)
    }

    pub fn primitive(p: PrimitiveType) -> Self {
        Self::Primitive(p)
    }

    pub fn object() -> Self {
        Self::Class(ClassType::new(Some(JAVA_LANG), "Object"))
    }

    pub fn string() -> Self {
        Self::Class(ClassType::new(Some(JAVA_LANG), "String"))
    }

    pub fn class(package: Option<&str>, name: &str) -> Self {
        Self::Class(ClassType::new(package, name))
    }

    pub fn interface(package: Option<&str>, name: &str) -> Self {
        Self::Class(ClassType::new(package, name).interface())
    }

    pub fn array_of(element: TypeRef) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn var(name: &str) -> Self {
        Self::TypeVar(name.to_string())
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Primitive(PrimitiveType::Void))
    }

    /// Whether the type mentions a type variable or type arguments anywhere.
    pub fn is_generic(&self) -> bool {
        match self {
            Self::Primitive(_) => false,
            Self::TypeVar(_) => true,
            Self::Array(element) => element.is_generic(),
            Self::Class(class) => !class.args.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassType {
    #[serde(default)]
    pub package: Option<String>,
    /// Package-relative binary name.
    pub name: String,
    #[serde(default)]
    pub interface: bool,
    #[serde(default)]
    pub args: Vec<TypeArg>,
}

impl ClassType {
    pub fn new(package: Option<&str>, name: &str) -> Self {
        Self {
            package: package.map(str::to_string),
            name: name.to_string(),
            interface: false,
            args: Vec::new(),
        }
    }

    pub fn interface(mut self) -> Self {
        self.interface = true;
        self
    }

    pub fn with_args(mut self, args: Vec<TypeArg>) -> Self {
        self.args = args;
        self
    }

    pub fn is_java_lang(&self, name: &str) -> bool {
        self.package.as_deref() == Some(JAVA_LANG) && self.name == name
    }

    /// Same class with type arguments dropped.
    pub fn erased(&self) -> Self {
        Self {
            package: self.package.clone(),
            name: self.name.clone(),
            interface: self.interface,
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeArg {
    Type(TypeRef),
    /// `?`
    Wildcard,
    /// `? extends T`
    Extends(TypeRef),
    /// `? super T`
    Super(TypeRef),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    /// Declared bounds; empty means `java.lang.Object`.
    #[serde(default)]
    pub bounds: Vec<TypeRef>,
}

impl TypeParam {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bounds: Vec::new(),
        }
    }

    pub fn bounded(name: &str, bounds: Vec<TypeRef>) -> Self {
        Self {
            name: name.to_string(),
            bounds,
        }
    }
}

/// A compile-time constant: field initializer or annotation element default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstValue {
    Bool(bool),
    Byte(i8),
    Char(u16),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Class(TypeRef),
    Enum { class: ClassType, name: String },
    Array(Vec<ConstValue>),
}

/// How long an annotation is kept. Only `Runtime` annotations reach the
/// metadata tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Retention {
    Source,
    Class,
    #[default]
    Runtime,
}

/// An annotation applied to a class, member or constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// The annotation type.
    #[serde(rename = "type")]
    pub ty: ClassType,
    #[serde(default)]
    pub retention: Retention,
    /// One value per element of the annotation type, in the type's
    /// declaration order, with defaults already filled in.
    #[serde(default)]
    pub elements: Vec<AnnotationElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationElement {
    pub name: String,
    pub value: ConstValue,
}

impl Annotation {
    pub fn new(ty: ClassType) -> Self {
        Self {
            ty,
            retention: Retention::Runtime,
            elements: Vec::new(),
        }
    }

    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_element(mut self, name: &str, value: ConstValue) -> Self {
        self.elements.push(AnnotationElement {
            name: name.to_string(),
            value,
        });
        self
    }

    pub fn is_runtime(&self) -> bool {
        self.retention == Retention::Runtime
    }
}

impl ClassModel {
    pub fn new(package: Option<&str>, binary_name: &str) -> Self {
        let simple_name = binary_name
            .rsplit('$')
            .next()
            .unwrap_or(binary_name)
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .to_string();
        Self {
            package: package.map(str::to_string),
            binary_name: binary_name.to_string(),
            simple_name,
            kind: ClassKind::Class,
            modifiers: Vec::new(),
            synthetic: false,
            type_params: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            scopes: Vec::new(),
            member_types: Vec::new(),
            members: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers.extend_from_slice(modifiers);
        self
    }

    pub fn with_type_params(mut self, type_params: Vec<TypeParam>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_scopes(mut self, scopes: Vec<Scope>) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn with_member_types(mut self, names: &[&str]) -> Self {
        self.member_types = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn method(mut self, method: MethodModel) -> Self {
        self.members.push(Member::Method(method));
        self
    }

    pub fn field(mut self, field: FieldModel) -> Self {
        self.members.push(Member::Field(field));
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Anonymous classes have no declared name.
    pub fn is_anonymous(&self) -> bool {
        self.simple_name.is_empty()
    }

    /// This class as a type reference (raw, without type arguments).
    pub fn as_class_type(&self) -> ClassType {
        ClassType {
            package: self.package.clone(),
            name: self.binary_name.clone(),
            interface: self.kind.is_interface(),
            args: Vec::new(),
        }
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodModel> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            Member::Field(_) => None,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldModel> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(field) => Some(field),
            Member::Method(_) => None,
        })
    }
}
