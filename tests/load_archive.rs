#[path = "common/mod.rs"]
mod common;

use common::*;
use serde_json::json;
use std::fs::File;
use std::io::Write;
use xaf::{load_archive, FormatError};

/// All four supported shapes must load into the same logical table:
/// JSON Lines, a top-level array, `{"tweets": [...]}`, and each of those
/// with records wrapped as `{"tweet": {...}}`.
#[test]
fn loads_all_supported_shapes() {
    let dir = tmp_dir();
    let records = vec![
        base_tweet("1", "first", "2023-01-01T00:00:00Z"),
        base_tweet("2", "second", "2023-01-01T01:00:00Z"),
    ];

    let jsonl = write_jsonl(dir.path(), "a.jsonl", &records);
    let array = write_json(dir.path(), "b.json", &json!(records.clone()));
    let object = write_json(dir.path(), "c.json", &json!({ "tweets": records.clone() }));
    let wrapped: Vec<_> = records.iter().map(|r| json!({ "tweet": r })).collect();
    let wrapped_jsonl = write_jsonl(dir.path(), "d.jsonl", &wrapped);
    let wrapped_object = write_json(dir.path(), "e.json", &json!({ "tweets": wrapped }));

    for path in [jsonl, array, object, wrapped_jsonl, wrapped_object] {
        let table = load_archive(&path).unwrap();
        assert_eq!(table.len(), 2, "shape {} lost records", path.display());
        let ids: Vec<_> = table
            .rows()
            .iter()
            .map(|r| r.get("id_str").unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}

#[test]
fn flattens_nested_objects_into_dotted_columns() {
    let dir = tmp_dir();
    let records = vec![
        with_field(
            base_tweet("1", "tagged", "2023-01-01T00:00:00Z"),
            "entities",
            json!({ "hashtags": [{"text": "rust"}], "urls": [] }),
        ),
        base_tweet("2", "plain", "2023-01-01T01:00:00Z"),
    ];
    let path = write_jsonl(dir.path(), "a.jsonl", &records);
    let table = load_archive(&path).unwrap();

    let row = &table.rows()[0];
    assert_eq!(row["user.id_str"], "100");
    assert!(row["entities.hashtags"].is_array());
    assert!(row.get("entities").is_none(), "parent object must be flattened away");
    assert!(row.get("user").is_none());
}

#[test]
fn empty_document_is_an_empty_table() {
    let dir = tmp_dir();
    let path = dir.path().join("empty.json");
    File::create(&path).unwrap().write_all(b"  \n").unwrap();
    let table = load_archive(&path).unwrap();
    assert!(table.is_empty());

    let path = write_json(dir.path(), "empty_array.json", &json!([]));
    assert!(load_archive(&path).unwrap().is_empty());
}

#[test]
fn unsupported_structures_fail_with_format_error() {
    let dir = tmp_dir();

    let scalar = write_json(dir.path(), "scalar.json", &json!(42));
    match load_archive(&scalar) {
        Err(FormatError::Unsupported(msg)) => assert!(msg.contains("number"), "got: {msg}"),
        other => panic!("expected Unsupported, got {:?}", other.map(|t| t.len())),
    }

    let mixed = write_json(dir.path(), "mixed.json", &json!(["not-a-record", 1]));
    assert!(matches!(load_archive(&mixed), Err(FormatError::Unsupported(_))));

    let bad_tweets = write_json(dir.path(), "bad.json", &json!({ "tweets": "nope" }));
    assert!(matches!(load_archive(&bad_tweets), Err(FormatError::Unsupported(_))));

    let garbage = dir.path().join("garbage.json");
    File::create(&garbage).unwrap().write_all(b"{ not json").unwrap();
    assert!(matches!(load_archive(&garbage), Err(FormatError::Json(_))));
}

/// A single bare record object is the degenerate one-row table.
#[test]
fn single_object_document_loads_as_one_row() {
    let dir = tmp_dir();
    let path = write_json(
        dir.path(),
        "one.json",
        &json!({ "tweet": base_tweet("9", "solo", "2023-01-01T00:00:00Z") }),
    );
    let table = load_archive(&path).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0]["id_str"], "9");
}
