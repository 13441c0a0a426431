#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Reflection metadata records and their serialized forms.
//!
//! This crate contains:
//! - Descriptor records (`ClassInfo`, `MethodInfo`, `FieldInfo`) and the
//!   auxiliary value table they index into
//! - The packed modifier bitmask
//! - C static-table rendering and the binary wire form with its reader

pub mod modifiers;
pub mod records;
pub mod render;
pub mod wire;


pub use modifiers::Modifiers;
pub use records::{
    AnnotationInfo, AuxConst, AuxIdx, AuxValue, ClassInfo, ClassMetadata, ConstantValue,
    ElementValue, FieldInfo, METADATA_VERSION, MethodInfo,
};
pub use render::c_string;
pub use wire::{EncodeError, Header, MAGIC, Module, ModuleError, VERSION};
