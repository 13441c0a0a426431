#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Reflection metadata synthesis.
//!
//! Turns one resolved class model into the constant tables the runtime reads
//! for reflection:
//! - `extract` - method, field and class descriptors from the model
//! - `aux_pool` - deduplicated auxiliary values referenced by index
//! - `encode` - selectors and modifier masks
//! - `emit` - table assembly, one class or a whole translation unit
//!
//! Rendering to C source and the binary wire form live in `refmeta-format`.

pub mod aux_pool;
pub mod config;
pub mod emit;
pub mod encode;
pub mod erasure;
pub mod error;
pub mod extract;
pub mod signature;

#[cfg(test)]
mod erasure_tests;
#[cfg(test)]
pub mod test_utils;

pub use aux_pool::AuxPool;
pub use config::Config;
pub use emit::{synthesize, synthesize_all};
pub use error::{Malformed, SynthError};
