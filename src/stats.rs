//! Small numeric helpers for the engagement features.

/// Linear-interpolation percentile over a pre-sorted slice, matching the
/// default dataframe quantile convention. `None` on an empty slice.
pub fn percentile_linear(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Winsorization cap for a set of engagement totals: the `q`-quantile of the
/// values themselves, recomputed per call. Ties at the cap are kept at the
/// cap, not dropped.
pub fn winsorize_cap(values: &[i64], q: f64) -> Option<f64> {
    let mut v: Vec<f64> = values.iter().map(|&x| x as f64).collect();
    v.sort_by(|a, b| a.total_cmp(b));
    percentile_linear(&v, q)
}
