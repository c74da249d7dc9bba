//! Thread reconstruction: a parent-pointer walk with an explicit visited set
//! and a memoized root cache, then step indices in chronological order.
//!
//! `thread_step_index` reflects the table's sort order (time of recording),
//! not reconstructed reply depth. Backfilled replies get their index from
//! when they were recorded.

use crate::table::{is_null, value_str, Row};
use ahash::{AHashMap, AHashSet};
use serde_json::Value;

/// Build the child-id → parent-id map from rows carrying a non-null reply
/// pointer. Duplicate child ids are last-write-wins in row order; the source
/// format does not promise unique ids and shadowing is the documented choice
/// here rather than a hard failure.
pub fn build_parent_map(rows: &[Row], id_col: &str, reply_col: &str) -> AHashMap<String, String> {
    let mut map: AHashMap<String, String> = AHashMap::with_capacity(rows.len() / 4 + 1);
    for row in rows {
        if is_null(row, reply_col) {
            continue;
        }
        let (Some(id), Some(parent)) = (value_str(row, id_col), value_str(row, reply_col)) else {
            continue;
        };
        map.insert(id, parent);
    }
    map
}

/// Memoized root lookup over a fixed parent map. Each walk carries its own
/// visited set; every node on a finished walk is cached, so N records with
/// average chain depth D cost O(N·D) once and O(N) thereafter.
pub struct RootResolver<'a> {
    parents: &'a AHashMap<String, String>,
    cache: AHashMap<String, String>,
}

impl<'a> RootResolver<'a> {
    pub fn new(parents: &'a AHashMap<String, String>) -> Self {
        Self { parents, cache: AHashMap::with_capacity(parents.len()) }
    }

    /// Follow parent pointers until an id with no parent entry (the root,
    /// possibly a record absent from the table) or a repeat visit (a cycle).
    /// A cycle's root is the smallest id among its members, which keeps the
    /// assignment independent of row order.
    pub fn root_of(&mut self, id: &str) -> String {
        if let Some(r) = self.cache.get(id) {
            return r.clone();
        }

        let mut path: Vec<String> = Vec::new();
        let mut seen: AHashSet<String> = AHashSet::new();
        let mut curr = id.to_string();
        let root: String;
        loop {
            if let Some(cached) = self.cache.get(&curr) {
                root = cached.clone();
                break;
            }
            if seen.contains(&curr) {
                let start = path.iter().position(|p| p == &curr).unwrap_or(0);
                root = path[start..].iter().min().cloned().unwrap_or(curr);
                break;
            }
            seen.insert(curr.clone());
            path.push(curr.clone());
            match self.parents.get(&curr) {
                Some(parent) => curr = parent.clone(),
                None => {
                    root = curr;
                    break;
                }
            }
        }
        for node in path {
            self.cache.insert(node, root.clone());
        }
        root
    }
}

/// Assign `thread_id`, `thread_step_index`, and `is_thread_starter` in place.
/// Rows must already be in the engine's chronological order; step indices are
/// the 0-based arrival order within each thread.
pub fn assign_threads(rows: &mut [Row], id_col: &str, reply_col: &str) {
    let parents = build_parent_map(rows, id_col, reply_col);
    let mut resolver = RootResolver::new(&parents);
    let mut steps: AHashMap<String, i64> = AHashMap::new();

    for row in rows.iter_mut() {
        let id = value_str(row, id_col).unwrap_or_default();
        let root = resolver.root_of(&id);
        let step = steps.entry(root.clone()).or_insert(0);
        row.insert("thread_id".into(), Value::String(root));
        row.insert("thread_step_index".into(), Value::from(*step));
        row.insert("is_thread_starter".into(), Value::Bool(*step == 0));
        *step += 1;
    }
}
