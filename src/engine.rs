use crate::config::FeatureConfig;
use crate::date::{parse_timestamp, tier_label, weekday_name, YearMonth};
use crate::detect;
use crate::error::SchemaError;
use crate::identity::resolve_self_id;
use crate::progress::ProgressScope;
use crate::schema::Schema;
use crate::stats::winsorize_cap;
use crate::table::{is_null, value_count, value_str, Row, Table};
use crate::threads::assign_threads;
use crate::util::init_tracing_once;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Entry point for the toolkit: a `FeatureConfig` plus the operations that
/// consume it. `load`, `core_sample`, and `mutual_ids` live in their own
/// modules as further `impl` blocks.
#[derive(Clone, Default)]
pub struct ArchiveFeatures {
    pub(crate) cfg: FeatureConfig,
}

impl ArchiveFeatures {
    pub fn new() -> Self {
        Self { cfg: FeatureConfig::default() }
    }

    pub fn with_config(cfg: FeatureConfig) -> Self {
        Self { cfg }
    }

    // -------- Builder methods --------
    pub fn self_user_id(mut self, id: impl Into<String>) -> Self { self.cfg = self.cfg.with_self_user_id(id); self }
    pub fn username_hint(mut self, name: impl AsRef<str>) -> Self { self.cfg = self.cfg.with_username_hint(name); self }
    pub fn tier_cutovers(mut self, upgraded: time::Date, post_upgrade: time::Date) -> Self { self.cfg = self.cfg.with_tier_cutovers(upgraded, post_upgrade); self }
    pub fn winsorize_quantile(mut self, q: f64) -> Self { self.cfg = self.cfg.with_winsorize_quantile(q); self }
    pub fn progress(mut self, yes: bool) -> Self { self.cfg = self.cfg.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.cfg = self.cfg.with_progress_label(label); self }

    /// Derive the full feature set over a loaded table.
    ///
    /// Returns a new table: original columns preserved, derived columns
    /// added, rows re-ordered into the chronological sort (null timestamps
    /// last, stable). The input is never mutated. Fails with `SchemaError`
    /// when no id, text, or timestamp column resolves; per-row damage is
    /// absorbed with default substitutions instead.
    pub fn engineer(&self, table: &Table) -> Result<Table, SchemaError> {
        init_tracing_once();
        let schema = Schema::resolve(table)?;

        // Normalize and sort by time before anything that depends on order.
        let mut pairs: Vec<(Option<OffsetDateTime>, Row)> = table
            .rows()
            .iter()
            .map(|row| {
                let ts = row.get(&schema.created_at).and_then(parse_timestamp);
                (ts, row.clone())
            })
            .collect();
        pairs.sort_by(|a, b| match (&a.0, &b.0) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let (tss, sorted_rows): (Vec<Option<OffsetDateTime>>, Vec<Row>) =
            pairs.into_iter().unzip();

        let self_id = resolve_self_id(&sorted_rows, &schema, &self.cfg);

        // Engagement totals first: the winsorization cap is computed over
        // the whole table before per-row assignment.
        let totals: Vec<i64> = sorted_rows
            .iter()
            .map(|row| {
                count_or_zero(row, schema.likes.as_deref())
                    + count_or_zero(row, schema.retweets.as_deref())
                    + count_or_zero(row, schema.replies.as_deref())
                    + count_or_zero(row, schema.bookmarks.as_deref())
            })
            .collect();
        let cap = winsorize_cap(&totals, self.cfg.winsorize_quantile);

        let pb = if self.cfg.progress {
            let label = self.cfg.progress_label.as_deref().unwrap_or("Engineering features");
            Some(ProgressScope::count(label, sorted_rows.len() as u64))
        } else {
            None
        };

        let mut rows: Vec<Row> = Vec::with_capacity(sorted_rows.len());
        for ((ts, mut row), total) in tss.into_iter().zip(sorted_rows).zip(totals) {
            let text = row
                .get(&schema.text)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            // Detection flags
            let is_retweet = detect::is_retweet(&row, &schema, &text);
            let is_quote = detect::is_quote_tweet(&row, &schema);
            let media = detect::has_media(&row, &schema);
            let num_hashtags = detect::entity_count(&row, schema.hashtags.as_ref());
            let num_mentions = detect::entity_count(&row, schema.mentions.as_ref());
            let reply_type = classify_reply(&row, &schema, &self_id);

            // Time features
            let (weekday, hour, month) = match ts {
                Some(t) => (
                    Value::String(weekday_name(t)),
                    Value::from(t.hour() as i64),
                    Value::String(YearMonth::from_date(t.date()).to_string()),
                ),
                None => (Value::Null, Value::Null, Value::Null),
            };
            let tier =
                tier_label(ts, self.cfg.tier_upgraded_start, self.cfg.tier_post_upgrade_start);

            // Engagement
            let likes = count_or_zero(&row, schema.likes.as_deref());
            let retweets = count_or_zero(&row, schema.retweets.as_deref());
            let replies = count_or_zero(&row, schema.replies.as_deref());
            let bookmarks = count_or_zero(&row, schema.bookmarks.as_deref());
            let winsorized = cap.map_or(total as f64, |c| (total as f64).min(c));

            row.insert(
                "post_datetime".into(),
                ts.and_then(|t| t.format(&Rfc3339).ok()).map_or(Value::Null, Value::String),
            );
            row.insert("is_retweet".into(), Value::Bool(is_retweet));
            row.insert("is_quote_tweet".into(), Value::Bool(is_quote));
            row.insert("has_link".into(), Value::Bool(detect::has_link(&text)));
            row.insert("has_media".into(), Value::Bool(media));
            row.insert("text_length_chars".into(), Value::from(text.chars().count() as i64));
            row.insert("num_hashtags".into(), Value::from(num_hashtags));
            row.insert("num_mentions".into(), Value::from(num_mentions));
            row.insert("has_question_mark".into(), Value::Bool(text.contains('?')));
            row.insert("reply_type".into(), Value::String(reply_type.to_string()));
            row.insert("weekday".into(), weekday);
            row.insert("hour_of_day".into(), hour);
            row.insert("month".into(), month);
            row.insert("account_tier".into(), Value::String(tier.to_string()));
            row.insert("likes".into(), Value::from(likes));
            row.insert("retweets".into(), Value::from(retweets));
            row.insert("replies".into(), Value::from(replies));
            row.insert("bookmarks".into(), Value::from(bookmarks));
            row.insert("total_engagement".into(), Value::from(total));
            row.insert("winsorized_engagement".into(), Value::from(winsorized));

            rows.push(row);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }

        // Thread features, on the chronologically sorted rows.
        assign_threads(
            &mut rows,
            &schema.id,
            schema.reply_to_id.as_deref().unwrap_or("in_reply_to_status_id_str"),
        );

        if let Some(pb) = pb {
            pb.finish("features done");
        }
        tracing::info!(records = rows.len(), "feature engineering complete");
        Ok(Table::from_rows(rows))
    }
}

fn count_or_zero(row: &Row, col: Option<&str>) -> i64 {
    col.map_or(0, |c| value_count(row, c))
}

fn classify_reply(row: &Row, schema: &Schema, self_id: &str) -> &'static str {
    let Some(col) = &schema.reply_to_user_id else {
        return "none";
    };
    if is_null(row, col) {
        return "none";
    }
    let target = value_str(row, col).unwrap_or_default();
    if !self_id.is_empty() && target == self_id {
        "reply_own"
    } else {
        "reply_other"
    }
}
