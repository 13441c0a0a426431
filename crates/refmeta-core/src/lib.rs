#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Resolved class model for reflection metadata synthesis.
//!
//! Two parts:
//! - **Model**: the fully resolved view of one class (members, types, generics,
//!   enclosing scopes) produced by the front end
//! - **Names**: how source-level names map onto target-language class names
//!   and selector keywords

pub mod json;
pub mod model;
pub mod names;

#[cfg(test)]
mod json_tests;
#[cfg(test)]
mod names_tests;

pub use json::{ModelError, parse_class_models};
pub use model::{
    Annotation, AnnotationElement, ClassKind, ClassModel, ClassType, ConstValue, FieldModel,
    Member, MethodKind, MethodModel, Modifier, PrimitiveType, Retention, Scope, TypeArg,
    TypeParam, TypeRef,
};
