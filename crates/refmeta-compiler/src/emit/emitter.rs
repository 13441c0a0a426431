//! Core table assembly.

use rayon::prelude::*;
use refmeta_core::ClassModel;
use refmeta_format::ClassMetadata;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::SynthError;
use crate::extract::{Descriptors, extract};

/// Synthesize reflection metadata for one class.
///
/// Either the whole table is produced or an error naming the class is
/// returned; no partial metadata escapes.
pub fn synthesize(model: &ClassModel, config: &Config) -> Result<ClassMetadata, SynthError> {
    let Descriptors {
        target_name,
        class,
        methods,
        fields,
        pool,
    } = extract(model, config)?;

    if let Err(count) = pool.validate(config.max_aux_entries) {
        warn!(class = %target_name, count, max = config.max_aux_entries, "aux table overflow");
        return Err(SynthError::PoolOverflow {
            class: target_name,
            count,
            max: config.max_aux_entries,
        });
    }

    debug!(
        class = %target_name,
        methods = methods.len(),
        fields = fields.len(),
        aux = pool.len(),
        "synthesized metadata"
    );

    Ok(ClassMetadata {
        target_name,
        class,
        methods: non_empty(methods),
        fields: non_empty(fields),
        aux: pool.into_table(),
    })
}

/// Synthesize every class of a translation unit.
///
/// Classes share no state, so they run in parallel; results keep input order.
pub fn synthesize_all(
    models: &[ClassModel],
    config: &Config,
) -> Vec<Result<ClassMetadata, SynthError>> {
    models
        .par_iter()
        .map(|model| synthesize(model, config))
        .collect()
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
