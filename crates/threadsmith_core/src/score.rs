//! Quality-score data types. The scoring logic itself lives in
//! `threadsmith_scoring`; these types cross the crate boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Excellent,
    Good,
    NeedsImprovement,
    Poor,
}

impl Grade {
    /// Threshold table: >=90 excellent, >=70 good, >=50 needs_improvement.
    pub fn from_score(score: f32) -> Self {
        if score >= 90.0 {
            Grade::Excellent
        } else if score >= 70.0 {
            Grade::Good
        } else if score >= 50.0 {
            Grade::NeedsImprovement
        } else {
            Grade::Poor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// Typed issue categories the scorer can flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    PromotionIntolerant,
    OffTopic,
    ToolFishing,
    VaguePost,
    AiPatterns,
    UncontractedPhrasing,
    OverlongComments,
    UniformStyle,
    PostProductMention,
    FirstCommentProductMention,
    PromotionalSuperlatives,
    NoQuestion,
    NoOpFollowUp,
    LowCommenterDiversity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
        }
    }
}

/// The five dimension sub-scores. Each is bounded by its own point budget
/// by construction of the sub-scorers (relevance <=20, specificity <=20,
/// authenticity <=25, value_first <=20, engagement <=15).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DimensionScores {
    pub relevance: f32,
    pub specificity: f32,
    pub authenticity: f32,
    pub value_first: f32,
    pub engagement: f32,
}

impl DimensionScores {
    pub fn sum(&self) -> f32 {
        self.relevance + self.specificity + self.authenticity + self.value_first + self.engagement
    }
}

/// Full scoring output. Computed fresh on every call, never partially
/// updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityScore {
    pub overall: f32,
    pub dimensions: DimensionScores,
    pub grade: Grade,
    pub issues: Vec<Issue>,
    pub strengths: Vec<String>,
    /// At most five, severity-prioritized.
    pub suggestions: Vec<String>,
}
