//! Subreddit relevance: does this thread belong in this community?
//! Point budget: 20 (15 keyword/topic + 5 formality fit), zeroed outright
//! when a zero-tolerance community gets a product mention.

use crate::DimensionResult;
use threadsmith_core::{
    CompanyContext, ConversationThread, Issue, IssueKind, PromotionTolerance, Severity,
    SubredditContext,
};

/// Flat award when any declared campaign keyword appears in the thread.
const KEYWORD_POINTS: f32 = 15.0;
const FORMALITY_POINTS: f32 = 5.0;

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Does any comment mention the product, by flag or by name in text?
fn any_comment_mentions(thread: &ConversationThread, company: Option<&CompanyContext>) -> bool {
    thread.top_level_comments.iter().any(|c| {
        c.product_mention
            || company
                .map(|co| co.mentioned_in(&c.body))
                .unwrap_or(false)
    }) || thread.replies.iter().any(|r| {
        r.product_mention
            || company
                .map(|co| co.mentioned_in(&r.body))
                .unwrap_or(false)
    })
}

pub(crate) fn score(
    thread: &ConversationThread,
    subreddit: &SubredditContext,
    op_formality: f32,
    company: Option<&CompanyContext>,
) -> DimensionResult {
    let mut result = DimensionResult::default();

    // Hard gate first: a product mention in a zero-tolerance community
    // makes everything else moot.
    if subreddit.promotion_tolerance == PromotionTolerance::None
        && any_comment_mentions(thread, company)
    {
        result.issues.push(Issue::new(
            IssueKind::PromotionIntolerant,
            Severity::High,
            format!(
                "r/{} has zero promotion tolerance and the thread mentions the product",
                subreddit.name
            ),
        ));
        return result;
    }

    let text = thread.full_text();

    // Campaign keywords take priority over community topics.
    let keyword_hit = company
        .map(|co| co.keywords.iter().any(|k| contains_ci(&text, k)))
        .unwrap_or(false);

    if keyword_hit {
        result.points += KEYWORD_POINTS;
        result
            .strengths
            .push("thread covers a declared campaign keyword".to_string());
    } else {
        // Tiered community-topic overlap.
        let exact = subreddit
            .common_topics
            .iter()
            .filter(|t| contains_ci(&text, t))
            .count();
        // Partial: any single word of a multi-word topic appears.
        let partial = subreddit
            .common_topics
            .iter()
            .filter(|t| {
                t.split_whitespace()
                    .any(|word| word.len() > 3 && contains_ci(&text, word))
            })
            .count();

        result.points += if exact >= 2 {
            result
                .strengths
                .push("thread sits squarely in the community's usual topics".to_string());
            10.0
        } else if exact == 1 {
            8.0
        } else if partial >= 1 {
            6.0
        } else {
            result.issues.push(Issue::new(
                IssueKind::OffTopic,
                Severity::Medium,
                "thread doesn't touch any of the community's common topics",
            ));
            3.0
        };
    }

    // Formality distance between the OP's voice and the community.
    result.points += (1.0 - (op_formality - subreddit.formality).abs()) * FORMALITY_POINTS;

    result
}
