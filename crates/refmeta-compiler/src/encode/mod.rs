//! Modifier and selector encoding.
//!
//! Selectors encode the declared name and the erased parameter types, one
//! segment per parameter. Modifier masks combine source keywords with the
//! synthetic bits the runtime needs (varargs, bridge, synthetic, enum
//! constant, annotation default).

mod modifiers;
mod selector;


pub use modifiers::{class_modifiers, field_modifiers, keyword_modifiers, method_modifiers};
pub use selector::{SelectorTable, constructor_selector, method_selector, selector};
