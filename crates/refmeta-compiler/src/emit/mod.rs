//! Table emission.
//!
//! Runs the extractor over a class model and assembles the result into one
//! `ClassMetadata`: class record, method and field arrays, auxiliary table.
//! Empty arrays and an empty pool are emitted as absent, not as empty tables.

mod emitter;


pub use emitter::{synthesize, synthesize_all};
