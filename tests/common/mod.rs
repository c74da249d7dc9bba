use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fresh temp dir for a test; keep the guard alive for the test's duration.
pub fn tmp_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Write records as JSON Lines (the most common archive shape).
pub fn write_jsonl(dir: &Path, name: &str, records: &[Value]) -> PathBuf {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut f = File::create(&path).unwrap();
    for r in records {
        writeln!(&mut f, "{}", r).unwrap();
    }
    path
}

/// Write a single JSON document (array, object, whatever the test needs).
pub fn write_json(dir: &Path, name: &str, doc: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut f = File::create(&path).unwrap();
    write!(&mut f, "{}", serde_json::to_string_pretty(doc).unwrap()).unwrap();
    path
}

/// A plain original tweet by the archive owner (user id "100", screen name
/// "chris"). Tests splice extra fields in as needed.
pub fn base_tweet(id: &str, text: &str, created_at: &str) -> Value {
    json!({
        "id_str": id,
        "full_text": text,
        "created_at": created_at,
        "user": { "id_str": "100", "screen_name": "chris" },
        "favorite_count": 0,
        "retweet_count": 0
    })
}

/// `base_tweet` replying to another status/user.
pub fn reply_tweet(
    id: &str,
    text: &str,
    created_at: &str,
    reply_to_id: &str,
    reply_to_user: &str,
) -> Value {
    let mut t = base_tweet(id, text, created_at);
    let obj = t.as_object_mut().unwrap();
    obj.insert("in_reply_to_status_id_str".into(), json!(reply_to_id));
    obj.insert("in_reply_to_user_id_str".into(), json!(reply_to_user));
    t
}

/// Set or replace a field on a tweet value.
pub fn with_field(mut t: Value, key: &str, v: Value) -> Value {
    t.as_object_mut().unwrap().insert(key.into(), v);
    t
}

/// Pull a named column out of every row, in table order.
pub fn column(table: &xaf::Table, col: &str) -> Vec<Value> {
    table
        .rows()
        .iter()
        .map(|r| r.get(col).cloned().unwrap_or(Value::Null))
        .collect()
}

/// Map of id column -> named column, for order-insensitive assertions.
pub fn column_by_id(table: &xaf::Table, col: &str) -> std::collections::BTreeMap<String, Value> {
    table
        .rows()
        .iter()
        .map(|r| {
            (
                r.get("id_str").and_then(|v| v.as_str()).unwrap().to_string(),
                r.get(col).cloned().unwrap_or(Value::Null),
            )
        })
        .collect()
}
