mod config;
mod date;
mod error;
mod progress;
mod table;
mod util;

mod archive;
mod schema;

mod detect;
mod identity;
mod stats;
mod threads;

mod engine;
mod sample;
mod mutuals;

pub use crate::config::FeatureConfig;
pub use crate::date::YearMonth;
pub use crate::engine::ArchiveFeatures;
pub use crate::error::{FormatError, SchemaError};
pub use crate::table::{Row, Table};

// Expose the operations as free functions for one-off use.
pub use crate::archive::load_archive;
pub use crate::mutuals::extract_mutual_ids;
pub use crate::sample::core_sample;

// Expose schema resolution so callers can inspect what the probing found.
pub use crate::schema::Schema;

// Expose row accessors used by downstream reporting code.
pub use crate::table::{has_struct, is_null, value_count, value_str, value_truthy};

// Expose progress helpers for application code that drives its own bars.
pub use crate::progress::ProgressScope;

// Expose thread primitives for callers that only need root resolution.
pub use crate::threads::{build_parent_map, RootResolver};
