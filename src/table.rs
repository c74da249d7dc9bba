use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// One loaded record: a flattened JSON object keyed by dotted-path columns.
pub type Row = Map<String, Value>;

/// Row-oriented table over flattened tweet records. Columns are sparse: a row
/// simply lacks the keys its source object never had.
#[derive(Clone, Debug, Default)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Union of column names across all rows, in sorted order. This is the
    /// probing order for alias resolution, so it is deterministic.
    pub fn column_names(&self) -> BTreeSet<String> {
        let mut cols = BTreeSet::new();
        for row in &self.rows {
            for k in row.keys() {
                if !cols.contains(k) {
                    cols.insert(k.clone());
                }
            }
        }
        cols
    }
}

/// True when the row lacks the column or holds an explicit null.
pub fn is_null(row: &Row, col: &str) -> bool {
    matches!(row.get(col), None | Some(Value::Null))
}

/// String coercion for id-like values: strings pass through, numbers and
/// bools are rendered, null/missing is `None`.
pub fn value_str(row: &Row, col: &str) -> Option<String> {
    match row.get(col)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Integer coercion for count-like values; anything unusable becomes 0.
pub fn value_count(row: &Row, col: &str) -> i64 {
    match row.get(col) {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>().or_else(|_| s.parse::<f64>().map(|f| f as i64)).unwrap_or(0)
        }
        Some(Value::Bool(b)) => *b as i64,
        _ => 0,
    }
}

/// Loose boolean reading for explicit flag columns.
pub fn value_truthy(row: &Row, col: &str) -> bool {
    match row.get(col) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f != 0.0),
        Some(Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "true" => true,
            "false" | "" => false,
            _ => true,
        },
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(_)) => true,
        _ => false,
    }
}

/// Structural presence: the column itself is non-null, or any flattened
/// descendant (`col.…`) is. Lets callers probe either the flat or dotted form.
pub fn has_struct(row: &Row, col: &str) -> bool {
    if !is_null(row, col) {
        return true;
    }
    let prefix = format!("{col}.");
    row.iter().any(|(k, v)| k.starts_with(&prefix) && !v.is_null())
}
