//! Mutual-follower extraction from the relationship half of the export:
//! accounts that appear in both the `following` and `follower` lists.

use crate::engine::ArchiveFeatures;
use crate::util::init_tracing_once;
use ahash::AHashSet;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Minimal schema for the relationship export. Extra fields are ignored;
/// entries missing the nested account object are skipped.
#[derive(Debug, Deserialize)]
struct RelationshipExport {
    following: Option<Vec<FollowingEntry>>,
    follower: Option<Vec<FollowerEntry>>,
}

#[derive(Debug, Deserialize)]
struct FollowingEntry {
    following: Option<Account>,
}

#[derive(Debug, Deserialize)]
struct FollowerEntry {
    follower: Option<Account>,
}

#[derive(Debug, Deserialize)]
struct Account {
    #[serde(rename = "accountId")]
    account_id: String,
}

/// Intersect following and follower account ids. Output is sorted so
/// repeated runs over the same export are byte-identical.
pub fn extract_mutual_ids(path: &Path) -> Result<Vec<String>> {
    init_tracing_once();

    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let export: RelationshipExport = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse relationship export {}", path.display()))?;

    let following = export
        .following
        .ok_or_else(|| anyhow!("relationship export has no `following` list"))?;
    let follower = export
        .follower
        .ok_or_else(|| anyhow!("relationship export has no `follower` list"))?;

    let following_ids: AHashSet<String> =
        following.into_iter().filter_map(|e| e.following.map(|a| a.account_id)).collect();
    let follower_ids: AHashSet<String> =
        follower.into_iter().filter_map(|e| e.follower.map(|a| a.account_id)).collect();

    let mut mutuals: Vec<String> =
        following_ids.intersection(&follower_ids).cloned().collect();
    mutuals.sort();

    tracing::info!(
        following = following_ids.len(),
        followers = follower_ids.len(),
        mutuals = mutuals.len(),
        "extracted mutual ids"
    );
    Ok(mutuals)
}

impl ArchiveFeatures {
    pub fn mutual_ids(&self, path: &Path) -> Result<Vec<String>> {
        extract_mutual_ids(path)
    }
}
