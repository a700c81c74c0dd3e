//! Target community descriptors. Immutable reference data.

use serde::{Deserialize, Serialize};

/// How much promotional content a community tolerates before the mods
/// (or the downvotes) arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionTolerance {
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubredditContext {
    /// Without the r/ prefix.
    pub name: String,
    /// 0.0 = memes welcome, 1.0 = stack-overflow formal.
    pub formality: f32,
    /// Culture tag ("practitioner", "hobbyist", "war-stories").
    pub culture: String,
    pub accepted_language: Vec<String>,
    pub avoided_language: Vec<String>,
    /// 0.0 = unmoderated, 1.0 = heavy-handed.
    pub moderation_strictness: f32,
    pub promotion_tolerance: PromotionTolerance,
    pub common_topics: Vec<String>,
}
