//! Problem specificity: real problems come with numbers, timelines, and a
//! first-person narrator. Point budget: 20 (8 concreteness + 7 first-person
//! + 5 not-tool-fishing).

use crate::patterns;
use crate::DimensionResult;
use threadsmith_core::{ConversationThread, Issue, IssueKind, Severity};

pub(crate) fn score(thread: &ConversationThread) -> DimensionResult {
    let mut result = DimensionResult::default();
    let post = format!("{}\n{}", thread.post.title, thread.post.body);

    // Concreteness: numerals, time references, quantifiers. Up to 8.
    let mut concreteness = 0.0;
    if patterns::NUMERAL.is_match(&post) {
        concreteness += 3.0;
    }
    if patterns::TIME_WORDS.is_match(&post) {
        concreteness += 3.0;
    }
    if patterns::QUANTIFIERS.is_match(&post) {
        concreteness += 2.0;
    }
    if concreteness >= 6.0 {
        result
            .strengths
            .push("post grounds the problem in concrete numbers and timeframes".to_string());
    } else if concreteness == 0.0 {
        result.issues.push(Issue::new(
            IssueKind::VaguePost,
            Severity::Medium,
            "post has no numbers, timeframes, or quantities",
        ));
    }
    result.points += concreteness;

    // A narrator who was actually there. Up to 7.
    if patterns::FIRST_PERSON.is_match(&post) {
        result.points += if post.len() > 100 { 7.0 } else { 4.0 };
    }

    // Tool-fishing zeroes its sub-score; an honest problem earns it.
    if patterns::TOOL_FISHING.is_match(&post) {
        result.issues.push(Issue::new(
            IssueKind::ToolFishing,
            Severity::High,
            "post reads as bait for product recommendations",
        ));
    } else {
        result.points += 5.0;
    }

    result
}
