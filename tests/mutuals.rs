#[path = "common/mod.rs"]
mod common;

use common::*;
use serde_json::json;
use xaf::extract_mutual_ids;

#[test]
fn intersects_following_and_followers() {
    let dir = tmp_dir();
    let export = json!({
        "following": [
            { "following": { "accountId": "1", "userLink": "https://twitter.com/intent/user?user_id=1" } },
            { "following": { "accountId": "2" } },
            { "following": { "accountId": "3" } },
            {}
        ],
        "follower": [
            { "follower": { "accountId": "3" } },
            { "follower": { "accountId": "1" } },
            { "follower": { "accountId": "9" } }
        ]
    });
    let path = write_json(dir.path(), "relationships.json", &export);

    let mutuals = extract_mutual_ids(&path).unwrap();
    assert_eq!(mutuals, vec!["1".to_string(), "3".to_string()], "sorted, deterministic");

    // Re-running yields the identical list.
    assert_eq!(extract_mutual_ids(&path).unwrap(), mutuals);
}

#[test]
fn missing_lists_are_a_shape_error() {
    let dir = tmp_dir();
    let export = json!({ "following": [] });
    let path = write_json(dir.path(), "relationships.json", &export);
    let err = extract_mutual_ids(&path).unwrap_err();
    assert!(err.to_string().contains("follower"), "got: {err}");
}
