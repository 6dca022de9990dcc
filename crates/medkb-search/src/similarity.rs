//! Fuzzy string similarity on a 0–100 scale.
//!
//! The symptom matcher and disease lookup depend only on [`Similarity`], so the
//! scoring algorithm can be swapped without touching them.

/// Approximate string similarity.
///
/// Implementations return 100 for identical inputs and decrease as the inputs
/// diverge. Inputs are expected to be normalized by the caller.
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Best-window similarity of the shorter string against the longer one.
///
/// A shorter string found verbatim inside the longer one scores 100. Otherwise
/// every window of the longer string with the shorter string's length is
/// scored by the indel ratio `200 * lcs / (len_a + len_b)` and the best window
/// wins. Comparison is per `char`, so Vietnamese diacritics count as one unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl Similarity for PartialRatio {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

        if shorter.is_empty() {
            return 0.0;
        }
        if longer
            .windows(shorter.len())
            .any(|window| window == shorter.as_slice())
        {
            return 100.0;
        }

        longer
            .windows(shorter.len())
            .map(|window| indel_ratio(&shorter, window))
            .fold(0.0, f64::max)
    }
}

#[allow(clippy::cast_precision_loss)]
fn indel_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * longest_common_subsequence(a, b) as f64 / total as f64
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
