//! JSON hand-off format for resolved class models.

use crate::model::ClassModel;

/// Error while reading a class model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClassModel {
    /// Parse a single class model from JSON.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize back to JSON (pretty-printed, stable field order).
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse a JSON array of class models, one per translated class.
pub fn parse_class_models(json: &str) -> Result<Vec<ClassModel>, ModelError> {
    Ok(serde_json::from_str(json)?)
}
