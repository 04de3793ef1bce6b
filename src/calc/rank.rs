use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How ties advance the next rank.
///
/// `Dense` gives 1,1,2 and is the default. `Competition` gives 1,1,3 for
/// callers still matching older exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankingStyle {
    #[default]
    Dense,
    Competition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankInput {
    pub id: String,
    pub ordering_key: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub id: String,
    pub ordering_key: f64,
    pub rank: u32,
}

// -0.0 and 0.0 must tie.
fn normalize_key(k: f64) -> f64 {
    if k == 0.0 {
        0.0
    } else {
        k
    }
}

/// Ranks `keys` descending. Returns `(original_index, rank)` in sorted
/// order; equal keys keep their input order and share a rank.
pub fn rank_positions(keys: &[f64], style: RankingStyle) -> Vec<(usize, u32)> {
    let keys: Vec<f64> = keys.iter().copied().map(normalize_key).collect();
    let mut order: Vec<usize> = (0..keys.len()).collect();
    // sort_by is stable.
    order.sort_by(|&a, &b| keys[b].total_cmp(&keys[a]));

    let mut out: Vec<(usize, u32)> = Vec::with_capacity(order.len());
    let mut prev: Option<(f64, u32)> = None;
    for (pos, idx) in order.into_iter().enumerate() {
        let key = keys[idx];
        let rank = match prev {
            None => 1,
            Some((prev_key, prev_rank)) if prev_key.total_cmp(&key) == Ordering::Equal => {
                prev_rank
            }
            Some((_, prev_rank)) => match style {
                RankingStyle::Dense => prev_rank + 1,
                RankingStyle::Competition => (pos as u32) + 1,
            },
        };
        prev = Some((key, rank));
        out.push((idx, rank));
    }
    out
}

pub fn rank(rows: &[RankInput]) -> Vec<RankedEntry> {
    rank_with_style(rows, RankingStyle::Dense)
}

pub fn rank_with_style(rows: &[RankInput], style: RankingStyle) -> Vec<RankedEntry> {
    let keys: Vec<f64> = rows.iter().map(|r| r.ordering_key).collect();
    rank_positions(&keys, style)
        .into_iter()
        .map(|(idx, rank)| RankedEntry {
            id: rows[idx].id.clone(),
            ordering_key: rows[idx].ordering_key,
            rank,
        })
        .collect()
}
