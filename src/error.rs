//! Typed failures surfaced by the loader and the feature engine.
//! Per-row data damage (bad timestamp, non-numeric count) is absorbed with
//! default substitutions and never appears here.

/// The archive document does not match any supported shape.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("failed reading archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive is not valid JSON in any supported shape: {0}")]
    Json(String),

    #[error("unsupported archive structure: {0}")]
    Unsupported(String),
}

/// A required semantic concept could not be resolved to a column under any
/// known naming variant.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("no {concept} column found (tried: {tried})")]
    MissingConcept { concept: &'static str, tried: String },
}

impl SchemaError {
    pub(crate) fn missing(concept: &'static str, aliases: &[&str]) -> Self {
        SchemaError::MissingConcept { concept, tried: aliases.join(", ") }
    }
}
