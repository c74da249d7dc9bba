use time::macros::date;
use time::Date;

/// User-facing options with sensible defaults and builder chaining.
///
/// Everything the engine would otherwise pick up from ambient constants lives
/// here: the archive owner's identity, the account-tier cutover dates, and
/// the winsorization quantile.
#[derive(Clone, Debug)]
pub struct FeatureConfig {
    pub self_user_id: Option<String>,    // explicit owner id; skips inference
    pub username_hint: Option<String>,   // lowercased screen name used for inference
    pub tier_upgraded_start: Date,       // inclusive start of the "upgraded" tier
    pub tier_post_upgrade_start: Date,   // inclusive end of the "upgraded" tier
    pub winsorize_quantile: f64,         // engagement cap quantile, 0..=1
    pub progress: bool,                  // show progress bars
    pub progress_label: Option<String>,  // optional label for progress bars
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            self_user_id: None,
            username_hint: None,
            tier_upgraded_start: date!(2023 - 09 - 12),
            tier_post_upgrade_start: date!(2024 - 09 - 12),
            winsorize_quantile: 0.95,
            progress: false,
            progress_label: None,
        }
    }
}

impl FeatureConfig {
    pub fn with_self_user_id(mut self, id: impl Into<String>) -> Self {
        self.self_user_id = Some(id.into());
        self
    }
    pub fn with_username_hint(mut self, name: impl AsRef<str>) -> Self {
        let mut s = name.as_ref().trim().to_lowercase();
        if let Some(rest) = s.strip_prefix('@') {
            s = rest.to_string();
        }
        self.username_hint = Some(s);
        self
    }
    pub fn with_tier_cutovers(mut self, upgraded_start: Date, post_upgrade_start: Date) -> Self {
        self.tier_upgraded_start = upgraded_start;
        self.tier_post_upgrade_start = post_upgrade_start;
        self
    }
    pub fn with_winsorize_quantile(mut self, q: f64) -> Self {
        self.winsorize_quantile = q.clamp(0.0, 1.0);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
}
