//! Authenticity: does the thread read like people, or like a model doing
//! people? Point budget: 25 (10 AI-pattern tier + 8 style variance + 7
//! casual markers, minus penalties for stiff phrasing and essay-length
//! comments).

use crate::patterns;
use crate::DimensionResult;
use threadsmith_core::similarity::style_variance;
use threadsmith_core::{ConversationThread, Issue, IssueKind, Severity};

/// Uncontracted phrases tolerated before the penalty kicks in.
const CONTRACTION_TOLERANCE: usize = 2;
/// Average comment length above which the thread reads as essays.
const COMMENT_LENGTH_CEILING: usize = 300;

pub(crate) fn score(thread: &ConversationThread) -> DimensionResult {
    let mut result = DimensionResult::default();
    let text = thread.full_text();

    // Tiered AI-pattern score: the fewer matches, the more human.
    let matches = patterns::ai_pattern_matches(&text);
    result.points += match matches {
        0 => 10.0,
        1..=2 => 7.0,
        3..=4 => 3.0,
        _ => 0.0,
    };
    if matches > 0 {
        result.issues.push(Issue::new(
            IssueKind::AiPatterns,
            if matches > 4 {
                Severity::High
            } else {
                Severity::Medium
            },
            format!("{} machine-generation patterns detected", matches),
        ));
    } else {
        result
            .strengths
            .push("no stock machine-generation phrasing".to_string());
    }

    // Stiff, uncontracted phrasing beyond the tolerance.
    let uncontracted = patterns::UNCONTRACTED.find_iter(&text).count();
    if uncontracted > CONTRACTION_TOLERANCE {
        result.points -= 3.0;
        result.issues.push(Issue::new(
            IssueKind::UncontractedPhrasing,
            Severity::Medium,
            format!(
                "{} uncontracted phrases — people write \"don't\", not \"do not\"",
                uncontracted
            ),
        ));
    }

    // Essay-length comments.
    if !thread.top_level_comments.is_empty() {
        let avg_len = thread
            .top_level_comments
            .iter()
            .map(|c| c.body.len())
            .sum::<usize>()
            / thread.top_level_comments.len();
        if avg_len > COMMENT_LENGTH_CEILING {
            result.points -= 3.0;
            result.issues.push(Issue::new(
                IssueKind::OverlongComments,
                Severity::Medium,
                format!("average comment length {} chars reads as essays", avg_len),
            ));
        }
    }

    // Lexical variety across commenters.
    let bodies: Vec<&str> = thread
        .top_level_comments
        .iter()
        .map(|c| c.body.as_str())
        .collect();
    let variance = style_variance(&bodies);
    if bodies.len() >= 2 {
        if variance > 0.5 {
            result.points += 8.0;
            result
                .strengths
                .push("commenters have distinct voices".to_string());
        } else if variance > 0.3 {
            result.points += 5.0;
        } else {
            result.issues.push(Issue::new(
                IssueKind::UniformStyle,
                Severity::Medium,
                "commenters write suspiciously alike",
            ));
        }
    }

    // Casual markers and deliberate imperfections.
    let casual = patterns::CASUAL_MARKERS.find_iter(&text).count();
    result.points += match casual {
        0 => 0.0,
        1..=2 => 4.0,
        _ => 7.0,
    };

    result.points = result.points.max(0.0);
    result
}
