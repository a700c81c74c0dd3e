//! Word-set lexical similarity, shared by the scorer's style-variance check.
//!
//! Deliberately crude — lowercased word-set Jaccard overlap. Good enough to
//! tell "three commenters who all write the same way" from organic variety.

use std::collections::HashSet;

fn word_set(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Jaccard similarity of the two texts' word sets, in [0, 1].
pub fn jaccard(a: &str, b: &str) -> f32 {
    let sa = word_set(a);
    let sb = word_set(b);
    if sa.is_empty() && sb.is_empty() {
        return 1.0;
    }
    let intersection = sa.intersection(&sb).count() as f32;
    let union = sa.union(&sb).count() as f32;
    intersection / union
}

/// Average pairwise lexical *distance* across texts, in [0, 1].
/// Higher means more stylistic variety. Fewer than two texts scores 0.
pub fn style_variance(texts: &[&str]) -> f32 {
    if texts.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    let mut pairs = 0u32;
    for i in 0..texts.len() {
        for j in (i + 1)..texts.len() {
            total += 1.0 - jaccard(texts[i], texts[j]);
            pairs += 1;
        }
    }
    total / pairs as f32
}
