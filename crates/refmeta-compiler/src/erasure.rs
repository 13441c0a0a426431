//! Type erasure and runtime type encodings.
//!
//! Descriptors use one letter per primitive, `L<Name>;` for classes and a `[`
//! prefix per array dimension. Record columns drop the trailing `;` of a
//! top-level class type (`LNSObject`), arrays keep it (`[LNSObject;`).

use refmeta_core::model::JAVA_LANG;
use refmeta_core::names::{class_target_name, parameter_keyword, primitive_code};
use refmeta_core::{ClassModel, ClassType, PrimitiveType, Scope, TypeParam, TypeRef};

use crate::error::Malformed;

/// Upper bound on `T extends U extends ...` chains before a cycle is assumed.
const MAX_BOUND_DEPTH: usize = 64;

/// A type with all type variables and type arguments removed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Erased {
    Primitive(PrimitiveType),
    Class(ClassType),
    Array(Box<Erased>),
}

impl Erased {
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Primitive(PrimitiveType::Void))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Descriptor as used in type lists.
    pub fn descriptor(&self) -> String {
        let mut out = String::new();
        self.write_descriptor(&mut out);
        out
    }

    fn write_descriptor(&self, out: &mut String) {
        match self {
            Self::Primitive(p) => out.push(primitive_code(*p)),
            Self::Class(class) => {
                out.push('L');
                out.push_str(&class_target_name(class));
                out.push(';');
            }
            Self::Array(element) => {
                out.push('[');
                element.write_descriptor(out);
            }
        }
    }

    /// Encoding for return-type and field-type columns.
    pub fn value_signature(&self) -> String {
        match self {
            Self::Class(class) => format!("L{}", class_target_name(class)),
            Self::Primitive(_) | Self::Array(_) => self.descriptor(),
        }
    }

    /// Selector segment keyword.
    pub fn keyword(&self) -> String {
        parameter_keyword(&self.to_type())
    }

    fn to_type(&self) -> TypeRef {
        match self {
            Self::Primitive(p) => TypeRef::Primitive(*p),
            Self::Class(class) => TypeRef::Class(class.clone()),
            Self::Array(element) => TypeRef::array_of(element.to_type()),
        }
    }
}

/// Concatenated descriptors (`LJavaLangInterruptedException;LJavaLangError;`).
pub fn type_list(types: &[Erased]) -> String {
    let mut out = String::new();
    for ty in types {
        ty.write_descriptor(&mut out);
    }
    out
}

/// Type parameters visible at one point, innermost declaration first.
#[derive(Clone, Debug, Default)]
pub struct TypeEnv<'a> {
    frames: Vec<&'a [TypeParam]>,
}

impl<'a> TypeEnv<'a> {
    /// Parameters of the class itself, then of its enclosing scopes innermost-out.
    pub fn for_class(model: &'a ClassModel) -> Self {
        let mut frames = vec![model.type_params.as_slice()];
        frames.extend(model.scopes.iter().rev().map(|scope| scope.type_params()));
        Self { frames }
    }

    /// Parameters of the given enclosing scopes (outermost first), innermost-out.
    pub fn for_scopes(scopes: &'a [Scope]) -> Self {
        Self {
            frames: scopes.iter().rev().map(|scope| scope.type_params()).collect(),
        }
    }

    /// This environment with a method's own parameters in front.
    pub fn with_method(&self, params: &'a [TypeParam]) -> Self {
        let mut frames = Vec::with_capacity(self.frames.len() + 1);
        frames.push(params);
        frames.extend_from_slice(&self.frames);
        Self { frames }
    }

    /// Find `name` in frames `start..`, returning the declaring frame's index.
    fn lookup(&self, name: &str, start: usize) -> Result<(usize, &'a TypeParam), Malformed> {
        self.frames
            .iter()
            .enumerate()
            .skip(start)
            .find_map(|(i, frame)| frame.iter().find(|param| param.name == name).map(|p| (i, p)))
            .ok_or_else(|| Malformed::UnknownTypeVar(name.to_string()))
    }

    /// Erase a type: variables become their first bound, class types lose arguments.
    pub fn erase(&self, ty: &TypeRef) -> Result<Erased, Malformed> {
        self.erase_from(ty, 0, 0)
    }

    /// Erase with variable lookup starting at frame `start`. A bound is
    /// resolved where its parameter is declared, so a method parameter
    /// never shadows a name used in a class parameter's bound.
    fn erase_from(&self, ty: &TypeRef, start: usize, depth: usize) -> Result<Erased, Malformed> {
        match ty {
            TypeRef::Primitive(p) => Ok(Erased::Primitive(*p)),
            TypeRef::Class(class) => Ok(Erased::Class(class.erased())),
            TypeRef::Array(element) => Ok(Erased::Array(Box::new(
                self.erase_from(element, start, depth)?,
            ))),
            TypeRef::TypeVar(name) => {
                if depth > MAX_BOUND_DEPTH {
                    return Err(Malformed::CyclicTypeVar(name.to_string()));
                }
                let (frame, param) = self.lookup(name, start)?;
                match param.bounds.first() {
                    None => Ok(Erased::Class(ClassType::new(Some(JAVA_LANG), "Object"))),
                    Some(bound) => self.erase_from(bound, frame, depth + 1),
                }
            }
        }
    }

    pub fn erase_all(&self, types: &[TypeRef]) -> Result<Vec<Erased>, Malformed> {
        types.iter().map(|ty| self.erase(ty)).collect()
    }
}
