//! Self-identifier resolution. Failure here never aborts the engine; it
//! degrades `reply_type` to `{none, reply_other}` and logs a warning.

use crate::config::FeatureConfig;
use crate::schema::Schema;
use crate::table::{value_str, Row};
use ahash::AHashMap;

/// Resolve the archive owner's user id.
///
/// Ladder: explicit config value; screen-name hint mapped through the most
/// frequent matching author id; most frequent author id overall; most
/// frequent reply-target id. Empty string when everything comes up dry.
pub fn resolve_self_id(rows: &[Row], schema: &Schema, cfg: &FeatureConfig) -> String {
    if let Some(id) = &cfg.self_user_id {
        if !id.is_empty() {
            return id.clone();
        }
    }

    if let (Some(hint), Some(screen_col), Some(id_col)) =
        (&cfg.username_hint, &schema.screen_name, &schema.author_id)
    {
        let matching = rows.iter().filter_map(|row| {
            let name = value_str(row, screen_col)?;
            if name.to_lowercase() == *hint {
                value_str(row, id_col)
            } else {
                None
            }
        });
        if let Some(id) = most_frequent(matching) {
            return id;
        }
    }

    if let Some(id_col) = &schema.author_id {
        if let Some(id) = most_frequent(rows.iter().filter_map(|row| value_str(row, id_col))) {
            return id;
        }
    }

    if let Some(reply_col) = &schema.reply_to_user_id {
        if let Some(id) = most_frequent(rows.iter().filter_map(|row| value_str(row, reply_col))) {
            return id;
        }
    }

    tracing::warn!(
        "could not resolve a self user id; reply_type will never be reply_own"
    );
    String::new()
}

/// Most frequent value, ties broken by first appearance in row order.
fn most_frequent(values: impl Iterator<Item = String>) -> Option<String> {
    let mut counts: AHashMap<String, (usize, usize)> = AHashMap::new();
    for (idx, v) in values.enumerate() {
        let entry = counts.entry(v).or_insert((0, idx));
        entry.0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(v, _)| v)
}
