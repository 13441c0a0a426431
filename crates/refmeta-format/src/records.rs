//! Descriptor records produced for one translated class.

use std::fmt;

use crate::modifiers::Modifiers;

/// Format tag written into every class record.
pub const METADATA_VERSION: u32 = 7;

/// Index into the class's auxiliary value table (`ptrTable`).
///
/// `-1` is reserved for "no value"; every non-negative index refers to a
/// valid slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct AuxIdx(i16);

impl AuxIdx {
    pub const ABSENT: Self = Self(-1);

    /// Number of slots addressable by a non-negative index.
    pub const MAX_ENTRIES: usize = i16::MAX as usize + 1;

    /// Index for a pool slot, `None` when it does not fit the encoding.
    pub fn new(index: usize) -> Option<Self> {
        i16::try_from(index).ok().map(Self)
    }

    /// Decode a raw table value. Anything negative other than `-1` is rejected.
    pub fn from_raw(raw: i16) -> Option<Self> {
        (raw >= -1).then_some(Self(raw))
    }

    #[inline]
    pub fn get(self) -> i16 {
        self.0
    }

    #[inline]
    pub fn is_absent(self) -> bool {
        self.0 < 0
    }

    /// Slot position, `None` for the sentinel.
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl Default for AuxIdx {
    fn default() -> Self {
        Self::ABSENT
    }
}

impl fmt::Debug for AuxIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuxIdx({})", self.0)
    }
}

impl fmt::Display for AuxIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the auxiliary value table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AuxValue {
    /// Type list, signature, selector, or type reference.
    Str(String),
    /// Annotation element default.
    Const(AuxConst),
    /// Runtime annotations of one class, member or constructor.
    Annotations(Vec<AnnotationInfo>),
}

impl AuxValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Const(_) | Self::Annotations(_) => None,
        }
    }

    pub fn as_annotations(&self) -> Option<&[AnnotationInfo]> {
        match self {
            Self::Annotations(list) => Some(list),
            Self::Str(_) | Self::Const(_) => None,
        }
    }
}

impl From<&str> for AuxValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for AuxValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// Constant stored in the auxiliary table.
///
/// Floating-point values are kept as their bit patterns so equality and
/// hashing are total: `0.0` and `-0.0` are distinct, and a NaN equals itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AuxConst {
    Bool(bool),
    Byte(i8),
    Char(u16),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(u32),
    Double(u64),
    String(String),
    /// Class literal, as a type descriptor (`LFooBar;`).
    Class(String),
    /// Enum constant: declaring class descriptor and constant name.
    Enum { class: String, name: String },
    Array(Vec<AuxConst>),
}

impl AuxConst {
    pub fn float(value: f32) -> Self {
        Self::Float(value.to_bits())
    }

    pub fn double(value: f64) -> Self {
        Self::Double(value.to_bits())
    }
}

/// One annotation instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnnotationInfo {
    /// Target name of the annotation type (`OrgJunitIgnore`).
    pub type_name: String,
    /// Element values in the annotation type's declaration order.
    pub elements: Vec<ElementValue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementValue {
    /// Element name, with the reserved-name suffix applied.
    pub name: String,
    pub value: AuxConst,
}

impl AnnotationInfo {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, name: &str, value: AuxConst) -> Self {
        self.elements.push(ElementValue {
            name: name.to_string(),
            value,
        });
        self
    }
}

/// Compile-time constant value of a field.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ConstantValue {
    /// Not a constant; written as a zeroed union.
    #[default]
    None,
    Bool(bool),
    Byte(i8),
    Char(u16),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

impl ConstantValue {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Class-level record.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassInfo {
    /// Declared simple name, empty for anonymous classes.
    pub name: String,
    /// Dotted package name, `None` for the default package.
    pub package: Option<String>,
    pub version: u32,
    pub modifiers: Modifiers,
    pub inner_classes: AuxIdx,
    pub enclosing_class: AuxIdx,
    pub enclosing_method: AuxIdx,
    pub generic_signature: AuxIdx,
    pub annotations: AuxIdx,
}

/// Method or constructor record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodInfo {
    pub selector: String,
    /// `None` for constructors.
    pub return_type: Option<String>,
    pub modifiers: Modifiers,
    pub param_types: AuxIdx,
    pub exceptions: AuxIdx,
    pub generic_signature: AuxIdx,
    /// Declared name, only when it cannot be recovered from the selector.
    pub declared_name: AuxIdx,
    pub annotation_default: AuxIdx,
    pub annotations: AuxIdx,
}

/// Field record.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldInfo {
    /// Storage name: declared name with a trailing underscore.
    pub name: String,
    pub type_signature: String,
    pub constant: ConstantValue,
    pub modifiers: Modifiers,
    pub generic_signature: AuxIdx,
    pub enclosing_type: AuxIdx,
    pub annotations: AuxIdx,
}

/// Complete metadata for one class: class record, member arrays and
/// auxiliary table.
///
/// Empty arrays are `None` so "no members" stays distinct from an empty
/// placeholder.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassMetadata {
    /// Target-language class name (`FooTest`, `A_1C`).
    pub target_name: String,
    pub class: ClassInfo,
    pub methods: Option<Vec<MethodInfo>>,
    pub fields: Option<Vec<FieldInfo>>,
    pub aux: Option<Vec<AuxValue>>,
}

impl ClassMetadata {
    /// Look up an auxiliary value. The sentinel and out-of-range indices give `None`.
    pub fn aux_value(&self, idx: AuxIdx) -> Option<&AuxValue> {
        let index = idx.index()?;
        self.aux.as_ref()?.get(index)
    }

    /// String payload of an auxiliary slot.
    pub fn aux_str(&self, idx: AuxIdx) -> Option<&str> {
        self.aux_value(idx)?.as_str()
    }

    pub fn methods(&self) -> &[MethodInfo] {
        self.methods.as_deref().unwrap_or_default()
    }

    pub fn fields(&self) -> &[FieldInfo] {
        self.fields.as_deref().unwrap_or_default()
    }

    pub fn aux_len(&self) -> usize {
        self.aux.as_ref().map_or(0, Vec::len)
    }

    /// Find a method record by selector.
    pub fn method(&self, selector: &str) -> Option<&MethodInfo> {
        self.methods().iter().find(|m| m.selector == selector)
    }

    /// Find a field record by storage name.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Every auxiliary index held by the records, in record order.
    pub fn referenced_indices(&self) -> Vec<AuxIdx> {
        let mut out = Vec::new();
        for m in self.methods() {
            out.extend([
                m.param_types,
                m.exceptions,
                m.generic_signature,
                m.declared_name,
                m.annotation_default,
                m.annotations,
            ]);
        }
        for f in self.fields() {
            out.extend([f.generic_signature, f.enclosing_type, f.annotations]);
        }
        let c = &self.class;
        out.extend([
            c.inner_classes,
            c.enclosing_class,
            c.enclosing_method,
            c.generic_signature,
            c.annotations,
        ]);
        out
    }
}
