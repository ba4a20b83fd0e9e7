//! Duplicate-name detection
//!
//! Advisory only: warnings are reported, nothing is refused. Names compare
//! case-insensitively after trimming; lengths count `char`s, not bytes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Similarity must be strictly greater than this for a near-duplicate
pub const NEAR_DUPLICATE_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKind {
    Exact,
    Near,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateWarning {
    /// Position of the candidate in the input batch
    pub index: usize,
    /// Name as given by the caller
    pub candidate: String,
    /// Existing (or earlier in the batch) name it collides with
    pub matched: String,
    pub kind: DuplicateKind,
    pub similarity: f64,
    /// Later positions in the batch holding the same name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repeated_at: Vec<usize>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Edit distance over chars (insert, delete, substitute all cost 1)
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// `(max_len - distance) / max_len` on normalized names, in `[0, 1]`
pub fn similarity(a: &str, b: &str) -> f64 {
    let (a, b) = (normalize(a), normalize(b));
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    (max_len - levenshtein(&a, &b)) as f64 / max_len as f64
}

/// Compare candidates against the roster and against earlier candidates
///
/// A name is reported once: the first copy carries the warning (exact wins,
/// otherwise the most similar near match) and later copies of the same name
/// are listed in `repeated_at`. A name whose first copy matched nothing gets
/// an exact warning at its second copy.
pub fn find_duplicates<S, E>(candidates: &[S], existing: &[E]) -> Vec<DuplicateWarning>
where
    S: AsRef<str>,
    E: AsRef<str>,
{
    let mut warnings: Vec<DuplicateWarning> = Vec::new();
    let existing: Vec<(&str, String)> = existing
        .iter()
        .map(|e| (e.as_ref(), normalize(e.as_ref())))
        .collect();
    // normalized name -> (first index, warning slot)
    let mut seen: HashMap<String, (usize, Option<usize>)> = HashMap::new();

    for (index, candidate) in candidates.iter().enumerate() {
        let raw = candidate.as_ref();
        let norm = normalize(raw);
        if norm.is_empty() {
            continue;
        }

        if let Some((first, slot)) = seen.get_mut(&norm) {
            match *slot {
                Some(pos) => warnings[pos].repeated_at.push(index),
                None => {
                    *slot = Some(warnings.len());
                    warnings.push(DuplicateWarning {
                        index,
                        candidate: raw.to_string(),
                        matched: candidates[*first].as_ref().to_string(),
                        kind: DuplicateKind::Exact,
                        similarity: 1.0,
                        repeated_at: Vec::new(),
                    });
                }
            }
            continue;
        }

        let warning = match existing.iter().find(|(_, n)| *n == norm) {
            Some((matched, _)) => Some(DuplicateWarning {
                index,
                candidate: raw.to_string(),
                matched: matched.to_string(),
                kind: DuplicateKind::Exact,
                similarity: 1.0,
                repeated_at: Vec::new(),
            }),
            None => existing
                .iter()
                .map(|(name, n)| (*name, similarity(n, &norm)))
                .filter(|(_, s)| *s > NEAR_DUPLICATE_THRESHOLD)
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(matched, similarity)| DuplicateWarning {
                    index,
                    candidate: raw.to_string(),
                    matched: matched.to_string(),
                    kind: DuplicateKind::Near,
                    similarity,
                    repeated_at: Vec::new(),
                }),
        };
        let slot = warning.map(|w| {
            warnings.push(w);
            warnings.len() - 1
        });
        seen.insert(norm, (index, slot));
    }

    warnings
}
