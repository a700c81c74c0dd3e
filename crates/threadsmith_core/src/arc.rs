//! Narrative arc types and the static conversation templates built on them.
//!
//! `ArcType` is a closed enum: string input is parsed exactly once at the
//! boundary and everything downstream matches exhaustively, so the emotional
//! engine, frustration generator, and designer can never disagree about
//! which arcs exist.

use crate::emotion::Emotion;
use crate::error::ThreadsmithError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcType {
    Discovery,
    Comparison,
    ProblemSolver,
    WarStory,
    SkepticConvert,
    QuickWin,
    CommunityHelp,
}

impl ArcType {
    pub const ALL: [ArcType; 7] = [
        ArcType::Discovery,
        ArcType::Comparison,
        ArcType::ProblemSolver,
        ArcType::WarStory,
        ArcType::SkepticConvert,
        ArcType::QuickWin,
        ArcType::CommunityHelp,
    ];

    /// The single fallible string → arc conversion. Unknown names are a
    /// configuration error, not a silent fallback.
    pub fn parse(s: &str) -> Result<Self, ThreadsmithError> {
        match s {
            "discovery" => Ok(ArcType::Discovery),
            "comparison" => Ok(ArcType::Comparison),
            "problem_solver" => Ok(ArcType::ProblemSolver),
            "war_story" => Ok(ArcType::WarStory),
            "skeptic_convert" => Ok(ArcType::SkepticConvert),
            "quick_win" => Ok(ArcType::QuickWin),
            "community_help" => Ok(ArcType::CommunityHelp),
            other => Err(ThreadsmithError::UnknownArcType(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArcType::Discovery => "discovery",
            ArcType::Comparison => "comparison",
            ArcType::ProblemSolver => "problem_solver",
            ArcType::WarStory => "war_story",
            ArcType::SkepticConvert => "skeptic_convert",
            ArcType::QuickWin => "quick_win",
            ArcType::CommunityHelp => "community_help",
        }
    }
}

impl std::fmt::Display for ArcType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which slot of a thread a template describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Post,
    Comment,
    Reply,
}

/// Static per-slot writing directions.
#[derive(Debug, Clone, Serialize)]
pub struct SlotTemplate {
    pub kind: SlotKind,
    pub tone: &'static str,
    pub purpose: &'static str,
    pub emotion: Emotion,
    /// Posting-delay range in minutes after the previous slot.
    pub timing_minutes: (u32, u32),
    /// Whether this slot is allowed to mention the product. The designer
    /// force-clears this on the first comment slot regardless.
    pub product_mention: bool,
}

/// A reply slot plus the index of the top-level comment it answers.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyTemplate {
    pub slot: SlotTemplate,
    pub parent_index: usize,
}

/// A complete static conversation shape.
#[derive(Debug, Clone, Serialize)]
pub struct ArcTemplate {
    pub arc: ArcType,
    pub post: SlotTemplate,
    pub comments: Vec<SlotTemplate>,
    pub replies: Vec<ReplyTemplate>,
}

fn slot(
    kind: SlotKind,
    tone: &'static str,
    purpose: &'static str,
    emotion: Emotion,
    timing_minutes: (u32, u32),
    product_mention: bool,
) -> SlotTemplate {
    SlotTemplate {
        kind,
        tone,
        purpose,
        emotion,
        timing_minutes,
        product_mention,
    }
}

impl ArcTemplate {
    /// Look up the built-in conversation template for an arc.
    ///
    /// Only the three canonical arcs ship full conversation templates; asking
    /// for any other arc is a caller error (the emotional engine still covers
    /// all seven).
    pub fn builtin(arc: ArcType) -> Result<ArcTemplate, ThreadsmithError> {
        match arc {
            ArcType::Discovery => Ok(Self::discovery()),
            ArcType::Comparison => Ok(Self::comparison()),
            ArcType::ProblemSolver => Ok(Self::problem_solver()),
            other => Err(ThreadsmithError::MissingArcTemplate(other)),
        }
    }

    /// OP hits a wall, the thread surfaces the product organically mid-way.
    fn discovery() -> ArcTemplate {
        use Emotion::*;
        ArcTemplate {
            arc: ArcType::Discovery,
            post: slot(
                SlotKind::Post,
                "worn down, specific",
                "describe the recurring problem with concrete numbers",
                Frustration,
                (0, 0),
                false,
            ),
            comments: vec![
                slot(
                    SlotKind::Comment,
                    "commiserating",
                    "empathize, share the same pain, no solutions yet",
                    Frustration,
                    (10, 45),
                    false,
                ),
                slot(
                    SlotKind::Comment,
                    "practical",
                    "suggest a workaround that only half-solves it",
                    Curiosity,
                    (20, 60),
                    false,
                ),
                slot(
                    SlotKind::Comment,
                    "casual, offhand",
                    "mention the product as what finally worked, one caveat included",
                    CautiousOptimism,
                    (30, 90),
                    true,
                ),
                slot(
                    SlotKind::Comment,
                    "relieved",
                    "report back after trying the mentioned fix on a smaller setup",
                    Relief,
                    (40, 120),
                    false,
                ),
                slot(
                    SlotKind::Comment,
                    "settled",
                    "summarize what stuck, for future searchers",
                    Satisfaction,
                    (90, 300),
                    false,
                ),
            ],
            replies: vec![
                ReplyTemplate {
                    slot: slot(
                        SlotKind::Reply,
                        "relieved",
                        "OP reports trying the suggestion, partial success",
                        Relief,
                        (60, 180),
                        false,
                    ),
                    parent_index: 2,
                },
                ReplyTemplate {
                    slot: slot(
                        SlotKind::Reply,
                        "settled",
                        "OP closes the loop a day later, it stuck",
                        Satisfaction,
                        (120, 480),
                        false,
                    ),
                    parent_index: 3,
                },
            ],
        }
    }

    /// OP openly compares alternatives; product mentions are on the table
    /// from the start, including in the post.
    fn comparison() -> ArcTemplate {
        use Emotion::*;
        ArcTemplate {
            arc: ArcType::Comparison,
            post: slot(
                SlotKind::Post,
                "methodical, slightly tired",
                "lay out the two or three options being weighed and the constraint that matters",
                Skepticism,
                (0, 0),
                true,
            ),
            comments: vec![
                slot(
                    SlotKind::Comment,
                    "opinionated",
                    "argue for the incumbent option from experience",
                    Skepticism,
                    (10, 40),
                    false,
                ),
                slot(
                    SlotKind::Comment,
                    "balanced",
                    "compare trade-offs honestly, product comes out ahead on one axis only",
                    CautiousOptimism,
                    (20, 70),
                    true,
                ),
                slot(
                    SlotKind::Comment,
                    "been-there",
                    "describe migrating between the options and what broke",
                    Disappointment,
                    (30, 90),
                    false,
                ),
                slot(
                    SlotKind::Comment,
                    "pragmatic",
                    "point out the deciding factor nobody mentioned",
                    Curiosity,
                    (20, 80),
                    false,
                ),
            ],
            replies: vec![
                ReplyTemplate {
                    slot: slot(
                        SlotKind::Reply,
                        "appreciative",
                        "OP weighs the trade-off comment against their constraint",
                        CautiousOptimism,
                        (40, 120),
                        false,
                    ),
                    parent_index: 1,
                },
                ReplyTemplate {
                    slot: slot(
                        SlotKind::Reply,
                        "decided",
                        "OP announces the pick and why",
                        Satisfaction,
                        (120, 360),
                        false,
                    ),
                    parent_index: 3,
                },
            ],
        }
    }

    /// OP brings a concrete broken thing; the thread debugs it and the
    /// product shows up as part of one commenter's fix.
    fn problem_solver() -> ArcTemplate {
        use Emotion::*;
        ArcTemplate {
            arc: ArcType::ProblemSolver,
            post: slot(
                SlotKind::Post,
                "urgent but precise",
                "describe the failing setup with versions, numbers, what was tried",
                Frustration,
                (0, 0),
                false,
            ),
            comments: vec![
                slot(
                    SlotKind::Comment,
                    "diagnostic",
                    "ask a clarifying question about the environment",
                    Curiosity,
                    (5, 30),
                    false,
                ),
                slot(
                    SlotKind::Comment,
                    "confident",
                    "propose the likely root cause",
                    Curiosity,
                    (15, 50),
                    false,
                ),
                slot(
                    SlotKind::Comment,
                    "war-torn",
                    "share how they hit the same wall and what their fix stack looks like, product included",
                    Relief,
                    (25, 80),
                    true,
                ),
                slot(
                    SlotKind::Comment,
                    "skeptical",
                    "push back on the root-cause theory with a counterexample",
                    Skepticism,
                    (20, 70),
                    false,
                ),
                slot(
                    SlotKind::Comment,
                    "closing",
                    "summarize the working fix for future searchers",
                    Satisfaction,
                    (60, 240),
                    false,
                ),
            ],
            replies: vec![
                ReplyTemplate {
                    slot: slot(
                        SlotKind::Reply,
                        "responsive",
                        "OP answers the clarifying question with the missing detail",
                        Frustration,
                        (10, 40),
                        false,
                    ),
                    parent_index: 0,
                },
                ReplyTemplate {
                    slot: slot(
                        SlotKind::Reply,
                        "grateful",
                        "OP confirms the fix worked and what the actual cause was",
                        Relief,
                        (60, 240),
                        false,
                    ),
                    parent_index: 2,
                },
            ],
        }
    }
}
