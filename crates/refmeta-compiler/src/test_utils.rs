//! Test helpers for synthesized tables.

use refmeta_core::ClassModel;

use crate::{Config, SynthError, synthesize};

/// Synthesize with the default configuration and render the C tables.
pub fn render(model: &ClassModel) -> String {
    render_with(model, &Config::default())
}

pub fn render_with(model: &ClassModel, config: &Config) -> String {
    match synthesize(model, config) {
        Ok(metadata) => metadata.render(),
        Err(err) => panic!("synthesis failed: {err}"),
    }
}

/// Parse a JSON class model and render it.
pub fn render_json(json: &str) -> String {
    let model = ClassModel::from_json(json).expect("valid class model");
    render(&model)
}

/// Synthesize with the default configuration, expecting a failure.
pub fn synth_error(model: &ClassModel) -> SynthError {
    synthesize(model, &Config::default()).expect_err("expected synthesis to fail")
}
