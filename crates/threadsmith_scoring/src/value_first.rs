//! Value-first ordering: the thread has to earn the product mention.
//! Point budget: 20 (8 clean post + 6 clean first comment + 6 no
//! superlative shilling).

use crate::patterns;
use crate::DimensionResult;
use threadsmith_core::{
    ArcType, CompanyContext, ConversationThread, Issue, IssueKind, Severity,
};

fn mentions(text: &str, flag: bool, company: Option<&CompanyContext>) -> bool {
    flag || company.map(|co| co.mentioned_in(text)).unwrap_or(false)
}

pub(crate) fn score(
    thread: &ConversationThread,
    company: Option<&CompanyContext>,
) -> DimensionResult {
    let mut result = DimensionResult::default();

    // The post itself should not sell. Comparison arcs get half credit for
    // naming the product, because an honest comparison has to.
    let post_text = format!("{} {}", thread.post.title, thread.post.body);
    let post_mentions = mentions(&post_text, thread.post.product_mention, company);
    if !post_mentions {
        result.points += 8.0;
        result
            .strengths
            .push("post leads with the problem, not the product".to_string());
    } else if thread.arc == ArcType::Comparison {
        result.points += 4.0;
    } else {
        result.issues.push(Issue::new(
            IssueKind::PostProductMention,
            Severity::High,
            "post itself mentions the product",
        ));
    }

    // The first comment must never be where the product shows up first.
    let first_comment_mentions = thread
        .top_level_comments
        .first()
        .map(|c| mentions(&c.body, c.product_mention, company))
        .unwrap_or(false);
    if first_comment_mentions {
        result.issues.push(Issue::new(
            IssueKind::FirstCommentProductMention,
            Severity::Critical,
            "first comment is the first product mention — the oldest shill pattern there is",
        ));
    } else {
        result.points += 6.0;
    }

    // Superlative language in any product-mentioning slot.
    let shilling = thread
        .top_level_comments
        .iter()
        .map(|c| (c.body.as_str(), c.product_mention))
        .chain(thread.replies.iter().map(|r| (r.body.as_str(), r.product_mention)))
        .any(|(body, flag)| mentions(body, flag, company) && patterns::SUPERLATIVES.is_match(body));
    if shilling {
        result.issues.push(Issue::new(
            IssueKind::PromotionalSuperlatives,
            Severity::Critical,
            "product mention uses promotional superlatives",
        ));
    } else {
        result.points += 6.0;
    }

    result
}
