//! The analysis-ready subset: originals and replies to other people, with
//! retweets, quote tweets, and self-replies excluded.

use crate::engine::ArchiveFeatures;
use crate::table::{value_str, value_truthy, Row, Table};

/// Pure predicate over a fully feature-engineered table: keep rows where
/// `is_retweet` and `is_quote_tweet` are false and `reply_type` is `none` or
/// `reply_other`. Applying it twice yields the same result as applying it
/// once.
pub fn core_sample(table: &Table) -> Table {
    let rows = table.rows().iter().filter(|row| keep(row)).cloned().collect();
    Table::from_rows(rows)
}

impl ArchiveFeatures {
    pub fn core_sample(&self, table: &Table) -> Table {
        core_sample(table)
    }
}

fn keep(row: &Row) -> bool {
    if value_truthy(row, "is_retweet") || value_truthy(row, "is_quote_tweet") {
        return false;
    }
    matches!(
        value_str(row, "reply_type").as_deref(),
        Some("none") | Some("reply_other")
    )
}
