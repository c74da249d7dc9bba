//! Per-row signal detection: retweets, quote tweets, links, media, entity
//! counts. Each classifier is a disjunction of its signals; an explicit
//! `false` flag does not veto the structural or text heuristics.

use crate::schema::Schema;
use crate::table::{has_struct, is_null, value_truthy, Row};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// The platform's canonical shortened-URL marker.
pub const SHORT_URL_MARKER: &str = "https://t.co/";

const RETWEET_TEXT_PREFIX: &str = "RT @";
const RETWEETED_STATUS_BASES: &[&str] = &["retweeted_status", "tweet.retweeted_status"];

fn status_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"twitter\.com/[^/\s]+/status/").unwrap())
}

/// Explicit flag true, a nested retweeted-status object present, or the
/// legacy `RT @` text prefix.
pub fn is_retweet(row: &Row, schema: &Schema, text: &str) -> bool {
    if let Some(col) = &schema.retweet_flag {
        if value_truthy(row, col) {
            return true;
        }
    }
    if RETWEETED_STATUS_BASES.iter().any(|base| has_struct(row, base)) {
        return true;
    }
    text.starts_with(RETWEET_TEXT_PREFIX)
}

/// Explicit flag true, a quoted-status id present, or a URL entity expanding
/// to a status link.
pub fn is_quote_tweet(row: &Row, schema: &Schema) -> bool {
    if let Some(col) = &schema.quote_flag {
        if value_truthy(row, col) {
            return true;
        }
    }
    if let Some(col) = &schema.quoted_status_id {
        if !is_null(row, col) {
            return true;
        }
    }
    if let Some(col) = &schema.urls {
        if let Some(Value::Array(urls)) = row.get(col) {
            for u in urls {
                let expanded = u.get("expanded_url").and_then(|x| x.as_str()).unwrap_or("");
                if status_link_re().is_match(expanded) {
                    return true;
                }
            }
        }
    }
    false
}

pub fn has_link(text: &str) -> bool {
    text.contains(SHORT_URL_MARKER)
}

/// Attached-media presence: a non-empty media list, or any non-null nested
/// media reference under the resolved column.
pub fn has_media(row: &Row, schema: &Schema) -> bool {
    let Some(col) = &schema.media else {
        return false;
    };
    match row.get(col) {
        Some(Value::Array(media)) => !media.is_empty(),
        Some(v) => !v.is_null(),
        None => has_struct(row, col),
    }
}

/// Entity-list length; 0 when the column is absent or not a list.
pub fn entity_count(row: &Row, col: Option<&String>) -> i64 {
    match col.and_then(|c| row.get(c)) {
        Some(Value::Array(items)) => items.len() as i64,
        _ => 0,
    }
}
