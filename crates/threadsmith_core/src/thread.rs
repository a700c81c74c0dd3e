//! Assembled conversation threads, multi-pass results, and schedule records.

use crate::arc::ArcType;
use crate::error::ThreadsmithError;
use crate::score::QualityScore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadPost {
    pub title: String,
    pub body: String,
    /// Persona id of the author.
    pub author: String,
    pub product_mention: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadComment {
    pub id: Uuid,
    pub author: String,
    pub body: String,
    pub product_mention: bool,
    /// Minutes after the post.
    pub offset_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadReply {
    pub id: Uuid,
    pub parent_comment_id: Uuid,
    pub author: String,
    pub body: String,
    pub product_mention: bool,
    /// Minutes after the parent comment.
    pub offset_minutes: u32,
}

/// A complete generated thread.
///
/// Invariants: every reply's parent id references a top-level comment, and
/// the first top-level comment never carries a product mention — the
/// designer enforces both at assembly time; `validate` re-checks them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationThread {
    pub id: Uuid,
    pub post: ThreadPost,
    pub top_level_comments: Vec<ThreadComment>,
    pub replies: Vec<ThreadReply>,
    pub arc: ArcType,
    pub subreddit: String,
    #[serde(default)]
    pub quality: Option<QualityScore>,
}

impl ConversationThread {
    pub fn validate(&self) -> Result<(), ThreadsmithError> {
        if let Some(first) = self.top_level_comments.first() {
            if first.product_mention {
                return Err(ThreadsmithError::FirstCommentProductMention);
            }
        }
        for reply in &self.replies {
            if !self
                .top_level_comments
                .iter()
                .any(|c| c.id == reply.parent_comment_id)
            {
                return Err(ThreadsmithError::OrphanReply {
                    reply: reply.id,
                    parent: reply.parent_comment_id,
                });
            }
        }
        Ok(())
    }

    /// All text in posting order, for whole-thread scans.
    pub fn full_text(&self) -> String {
        let mut parts = vec![self.post.title.clone(), self.post.body.clone()];
        parts.extend(self.top_level_comments.iter().map(|c| c.body.clone()));
        parts.extend(self.replies.iter().map(|r| r.body.clone()));
        parts.join("\n")
    }

    /// Distinct comment authors, excluding the OP.
    pub fn distinct_commenters(&self) -> usize {
        let mut authors: Vec<&str> = self
            .top_level_comments
            .iter()
            .map(|c| c.author.as_str())
            .filter(|a| *a != self.post.author)
            .collect();
        authors.sort_unstable();
        authors.dedup();
        authors.len()
    }

    /// Replies written by the original poster.
    pub fn op_follow_ups(&self) -> usize {
        self.replies
            .iter()
            .filter(|r| r.author == self.post.author)
            .count()
    }
}

/// Snapshots of each multi-pass stage that actually ran.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassSnapshots {
    pub raw: Option<String>,
    pub authentic: Option<String>,
    pub validated: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassMetadata {
    pub attempts: u32,
    pub duration_ms: u64,
    pub passed_validation: bool,
}

/// The outcome of one multi-pass generation unit. Produced once, consumed
/// immediately by the designer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiPassResult {
    pub final_content: String,
    pub passes: PassSnapshots,
    /// The validator's own 0-100 judgement, not the thread-level score.
    pub quality_score: u8,
    pub metadata: PassMetadata,
}

/// Persisted schedule record for the storage collaborator. Timestamps only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledConversation {
    pub conversation: ConversationThread,
    pub scheduled_time: DateTime<Utc>,
    pub comment_timings: Vec<DateTime<Utc>>,
    pub reply_timings: Vec<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(author: &str, mention: bool) -> ThreadComment {
        ThreadComment {
            id: Uuid::new_v4(),
            author: author.into(),
            body: "body".into(),
            product_mention: mention,
            offset_minutes: 10,
        }
    }

    fn thread() -> ConversationThread {
        ConversationThread {
            id: Uuid::new_v4(),
            post: ThreadPost {
                title: "title".into(),
                body: "body".into(),
                author: "op".into(),
                product_mention: false,
            },
            top_level_comments: vec![comment("a", false), comment("b", true)],
            replies: vec![],
            arc: ArcType::Discovery,
            subreddit: "sysadmin".into(),
            quality: None,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(thread().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_first_comment_mention() {
        let mut t = thread();
        t.top_level_comments[0].product_mention = true;
        assert!(matches!(
            t.validate(),
            Err(ThreadsmithError::FirstCommentProductMention)
        ));
    }

    #[test]
    fn test_validate_rejects_orphan_reply() {
        let mut t = thread();
        t.replies.push(ThreadReply {
            id: Uuid::new_v4(),
            parent_comment_id: Uuid::new_v4(),
            author: "op".into(),
            body: "reply".into(),
            product_mention: false,
            offset_minutes: 5,
        });
        assert!(matches!(
            t.validate(),
            Err(ThreadsmithError::OrphanReply { .. })
        ));
    }

    #[test]
    fn test_distinct_commenters_excludes_op() {
        let mut t = thread();
        t.top_level_comments.push(comment("op", false));
        t.top_level_comments.push(comment("a", false));
        assert_eq!(t.distinct_commenters(), 2);
    }

    #[test]
    fn test_op_follow_ups() {
        let mut t = thread();
        let parent = t.top_level_comments[0].id;
        t.replies.push(ThreadReply {
            id: Uuid::new_v4(),
            parent_comment_id: parent,
            author: "op".into(),
            body: "thanks, trying it".into(),
            product_mention: false,
            offset_minutes: 30,
        });
        assert_eq!(t.op_follow_ups(), 1);
    }
}
