use std::collections::BTreeMap;

use crate::analyzers::utility::{MeanAccumulator, share_pct};

/// Synthetic key that absorbs long-tail groups.
pub const OTHER_KEY: &str = "Other";

/// Number of items per key.
pub fn count_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(key(&item)).or_insert(0) += 1;
    }
    counts
}

/// Number of items per inner key, nested under their outer key.
pub fn count_by_nested<T, K1, K2, F1, F2>(
    items: impl IntoIterator<Item = T>,
    mut outer: F1,
    mut inner: F2,
) -> BTreeMap<K1, BTreeMap<K2, usize>>
where
    K1: Ord,
    K2: Ord,
    F1: FnMut(&T) -> K1,
    F2: FnMut(&T) -> K2,
{
    let mut counts: BTreeMap<K1, BTreeMap<K2, usize>> = BTreeMap::new();
    for item in items {
        *counts
            .entry(outer(&item))
            .or_default()
            .entry(inner(&item))
            .or_insert(0) += 1;
    }
    counts
}

/// Arithmetic mean of `value` per key, in one pass.
///
/// Items whose value is absent or non-finite are skipped. A key whose items
/// were all skipped is left out of the result rather than mapped to NaN.
pub fn mean_by<T, K, F, V>(
    items: impl IntoIterator<Item = T>,
    mut key: F,
    mut value: V,
) -> BTreeMap<K, f64>
where
    K: Ord,
    F: FnMut(&T) -> K,
    V: FnMut(&T) -> Option<f64>,
{
    let mut groups: BTreeMap<K, MeanAccumulator> = BTreeMap::new();
    for item in items {
        let acc = groups.entry(key(&item)).or_default();
        if let Some(v) = value(&item) {
            acc.push(v);
        }
    }

    groups
        .into_iter()
        .filter_map(|(k, acc)| acc.mean().map(|m| (k, m)))
        .collect()
}

/// Merges every key whose share of the total is below `threshold_pct` into
/// [`OTHER_KEY`].
///
/// The total is computed over the full input first, so the merge does not
/// depend on iteration order. Counts are conserved, and an existing `"Other"`
/// key is kept and absorbs the merged counts.
pub fn collapse_long_tail(
    counts: BTreeMap<String, usize>,
    threshold_pct: f64,
) -> BTreeMap<String, usize> {
    let total: usize = counts.values().sum();

    let mut collapsed = BTreeMap::new();
    let mut other = 0;
    for (key, count) in counts {
        if key == OTHER_KEY || share_pct(count, total) < threshold_pct {
            other += count;
        } else {
            collapsed.insert(key, count);
        }
    }

    if other > 0 {
        collapsed.insert(OTHER_KEY.to_string(), other);
    }
    collapsed
}

/// Keeps the `n` largest inner counts of each group. Ties go to the smaller key.
pub fn top_n_per_group<K1, K2>(
    nested: BTreeMap<K1, BTreeMap<K2, usize>>,
    n: usize,
) -> BTreeMap<K1, Vec<(K2, usize)>>
where
    K1: Ord,
    K2: Ord,
{
    nested
        .into_iter()
        .map(|(outer, inner)| {
            let mut ranked: Vec<(K2, usize)> = inner.into_iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            ranked.truncate(n);
            (outer, ranked)
        })
        .collect()
}
