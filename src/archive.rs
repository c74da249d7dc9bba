//! Archive loading: accepts the handful of shapes the export has shipped in
//! over the years and normalizes all of them into one flat row table.

use crate::engine::ArchiveFeatures;
use crate::error::FormatError;
use crate::progress::ProgressScope;
use crate::table::{Row, Table};
use crate::util::init_tracing_once;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Load a tweet archive into a row table. Supported shapes:
/// - JSON Lines, one record per line;
/// - a top-level array of record objects;
/// - a top-level object with a `tweets` array;
/// - any of the above with records wrapped as `{"tweet": {...}}`.
///
/// Nested objects are flattened into dotted-path columns (`user.id`,
/// `entities.hashtags`). An empty document is an empty table, not an error.
pub fn load_archive(path: &Path) -> Result<Table, FormatError> {
    init_tracing_once();
    load_with_progress(path, None)
}

impl ArchiveFeatures {
    /// `load_archive` with this builder's progress settings applied.
    pub fn load(&self, path: &Path) -> Result<Table, FormatError> {
        init_tracing_once();
        let pb = if self.cfg.progress {
            let total = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            let label = self.cfg.progress_label.as_deref().unwrap_or("Loading archive");
            Some(ProgressScope::bytes(label, total))
        } else {
            None
        };
        let out = load_with_progress(path, pb.as_ref());
        if let Some(pb) = pb {
            pb.finish("load done");
        }
        out
    }
}

fn load_with_progress(path: &Path, pb: Option<&ProgressScope>) -> Result<Table, FormatError> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        tracing::info!(path = %path.display(), "archive is empty; producing empty table");
        return Ok(Table::default());
    }

    let table = match parse_jsonl(&content, pb)? {
        Some(t) => t,
        None => parse_document(&content)?,
    };
    tracing::info!(path = %path.display(), records = table.len(), "loaded archive");
    Ok(table)
}

/// JSON Lines attempt: only taken when there are at least two non-empty
/// lines and every one of them parses on its own. A pretty-printed document
/// fails the per-line parse and falls through to the whole-document path.
fn parse_jsonl(content: &str, pb: Option<&ProgressScope>) -> Result<Option<Table>, FormatError> {
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Ok(None);
    }

    let mut values = Vec::with_capacity(lines.len());
    for line in &lines {
        match serde_json::from_str::<Value>(line) {
            Ok(v) => values.push(v),
            Err(_) => return Ok(None),
        }
    }

    let mut rows = Vec::with_capacity(values.len());
    for (v, line) in values.into_iter().zip(&lines) {
        match v {
            Value::Object(obj) => rows.push(normalize_record(obj)),
            other => {
                return Err(FormatError::Unsupported(format!(
                    "JSON Lines record is {}, expected an object",
                    kind_name(&other)
                )))
            }
        }
        if let Some(pb) = pb {
            pb.inc(line.len() as u64 + 1);
        }
    }
    Ok(Some(Table::from_rows(rows)))
}

fn parse_document(content: &str) -> Result<Table, FormatError> {
    let doc: Value =
        serde_json::from_str(content).map_err(|e| FormatError::Json(e.to_string()))?;

    match doc {
        Value::Array(items) => rows_from_items(items),
        Value::Object(mut map) => {
            if let Some(tweets) = map.remove("tweets") {
                match tweets {
                    Value::Array(items) => rows_from_items(items),
                    other => Err(FormatError::Unsupported(format!(
                        "`tweets` is {}, expected an array",
                        kind_name(&other)
                    ))),
                }
            } else {
                // Degenerate single-record document.
                Ok(Table::from_rows(vec![normalize_record(map)]))
            }
        }
        other => Err(FormatError::Unsupported(format!(
            "top-level {}, expected records",
            kind_name(&other)
        ))),
    }
}

fn rows_from_items(items: Vec<Value>) -> Result<Table, FormatError> {
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(obj) => rows.push(normalize_record(obj)),
            other => {
                return Err(FormatError::Unsupported(format!(
                    "array contains {}, expected record objects",
                    kind_name(&other)
                )))
            }
        }
    }
    Ok(Table::from_rows(rows))
}

/// Unwrap the platform's `{"tweet": {...}}` envelope, then flatten nested
/// objects into dotted-path columns. Arrays and scalars are kept as values.
fn normalize_record(mut obj: Map<String, Value>) -> Row {
    if let Some(Value::Object(_)) = obj.get("tweet") {
        if let Some(Value::Object(inner)) = obj.remove("tweet") {
            obj = inner;
        }
    }
    let mut row = Row::new();
    flatten_into("", obj, &mut row);
    row
}

fn flatten_into(prefix: &str, obj: Map<String, Value>, out: &mut Row) {
    for (k, v) in obj {
        let key = if prefix.is_empty() { k } else { format!("{prefix}.{k}") };
        match v {
            Value::Object(inner) => flatten_into(&key, inner, out),
            other => {
                out.insert(key, other);
            }
        }
    }
}

fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
