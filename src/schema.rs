//! Column resolution across historical schema variants. Every semantic
//! concept carries an ordered alias list; resolution runs once per table
//! (never per row) and produces a canonical `Schema`.

use crate::error::SchemaError;
use crate::table::Table;
use std::collections::BTreeSet;

const ID_ALIASES: &[&str] = &["id_str", "tweet.id_str", "id", "tweet.id"];
const TEXT_ALIASES: &[&str] = &["full_text", "text", "tweet.full_text", "tweet.text"];
const TEXT_TOKENS: &[&str] = &["full_text", "text"];
const CREATED_ALIASES: &[&str] = &["created_at", "tweet.created_at", "time", "date"];
const CREATED_TOKENS: &[&str] = &["created_at"];

const REPLY_ID_ALIASES: &[&str] = &[
    "in_reply_to_status_id_str",
    "tweet.in_reply_to_status_id_str",
    "in_reply_to_status_id",
    "tweet.in_reply_to_status_id",
];
const REPLY_USER_ALIASES: &[&str] = &[
    "in_reply_to_user_id_str",
    "tweet.in_reply_to_user_id_str",
    "in_reply_to_user_id",
    "tweet.in_reply_to_user_id",
];
const AUTHOR_ID_ALIASES: &[&str] =
    &["user.id_str", "user.id", "tweet.user.id_str", "tweet.user.id"];
const SCREEN_NAME_ALIASES: &[&str] = &[
    "user.screen_name",
    "user.screen_name_str",
    "screen_name",
    "tweet.user.screen_name",
];

const RETWEET_FLAG_ALIASES: &[&str] = &["retweeted", "tweet.retweeted"];
const QUOTE_FLAG_ALIASES: &[&str] = &["is_quote_status", "tweet.is_quote_status"];
const QUOTED_ID_ALIASES: &[&str] =
    &["quoted_status_id_str", "tweet.quoted_status_id_str", "quoted_status_id"];

const LIKES_ALIASES: &[&str] = &["favorite_count", "tweet.favorite_count"];
const RETWEETS_ALIASES: &[&str] = &["retweet_count", "tweet.retweet_count"];
const REPLIES_ALIASES: &[&str] = &["reply_count", "tweet.reply_count"];
const BOOKMARKS_ALIASES: &[&str] = &["bookmark_count", "tweet.bookmark_count"];

const HASHTAGS_ALIASES: &[&str] = &["entities.hashtags", "tweet.entities.hashtags", "hashtags"];
const MENTIONS_ALIASES: &[&str] =
    &["entities.user_mentions", "tweet.entities.user_mentions", "user_mentions"];
const URLS_ALIASES: &[&str] = &["entities.urls", "tweet.entities.urls"];
const MEDIA_ALIASES: &[&str] =
    &["extended_entities.media", "tweet.extended_entities.media", "entities.media"];

/// Canonical column names for one loaded table. `id`, `text`, and
/// `created_at` are required; everything else degrades to `None` and the
/// dependent features fall back to their documented defaults.
#[derive(Clone, Debug)]
pub struct Schema {
    pub id: String,
    pub text: String,
    pub created_at: String,

    pub reply_to_id: Option<String>,
    pub reply_to_user_id: Option<String>,
    pub author_id: Option<String>,
    pub screen_name: Option<String>,

    pub retweet_flag: Option<String>,
    pub quote_flag: Option<String>,
    pub quoted_status_id: Option<String>,

    pub likes: Option<String>,
    pub retweets: Option<String>,
    pub replies: Option<String>,
    pub bookmarks: Option<String>,

    pub hashtags: Option<String>,
    pub mentions: Option<String>,
    pub urls: Option<String>,
    pub media: Option<String>,
}

impl Schema {
    pub fn resolve(table: &Table) -> Result<Self, SchemaError> {
        let cols = table.column_names();

        let id = find(&cols, ID_ALIASES, &[])
            .ok_or_else(|| SchemaError::missing("id", ID_ALIASES))?;
        let text = find(&cols, TEXT_ALIASES, TEXT_TOKENS)
            .ok_or_else(|| SchemaError::missing("text", TEXT_ALIASES))?;
        let created_at = find(&cols, CREATED_ALIASES, CREATED_TOKENS)
            .ok_or_else(|| SchemaError::missing("timestamp", CREATED_ALIASES))?;

        Ok(Self {
            id,
            text,
            created_at,
            reply_to_id: find(&cols, REPLY_ID_ALIASES, &[]),
            reply_to_user_id: find(&cols, REPLY_USER_ALIASES, &[]),
            author_id: find(&cols, AUTHOR_ID_ALIASES, &[]),
            screen_name: find(&cols, SCREEN_NAME_ALIASES, &[]),
            retweet_flag: find(&cols, RETWEET_FLAG_ALIASES, &[]),
            quote_flag: find(&cols, QUOTE_FLAG_ALIASES, &[]),
            quoted_status_id: find(&cols, QUOTED_ID_ALIASES, &[]),
            likes: find(&cols, LIKES_ALIASES, &[]),
            retweets: find(&cols, RETWEETS_ALIASES, &[]),
            replies: find(&cols, REPLIES_ALIASES, &[]),
            bookmarks: find(&cols, BOOKMARKS_ALIASES, &[]),
            hashtags: find(&cols, HASHTAGS_ALIASES, &[]),
            mentions: find(&cols, MENTIONS_ALIASES, &[]),
            urls: find(&cols, URLS_ALIASES, &[]),
            media: find(&cols, MEDIA_ALIASES, &[]),
        })
    }
}

/// Exact aliases first (in listed priority), then the first column containing
/// a recognized token, in the table's sorted column order.
fn find(cols: &BTreeSet<String>, aliases: &[&str], tokens: &[&str]) -> Option<String> {
    for a in aliases {
        if cols.contains(*a) {
            return Some((*a).to_string());
        }
    }
    for t in tokens {
        if let Some(c) = cols.iter().find(|c| c.contains(t)) {
            return Some(c.clone());
        }
    }
    None
}
