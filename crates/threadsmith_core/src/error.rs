use crate::arc::ArcType;
use thiserror::Error;

/// Typed configuration/programmer errors.
///
/// Transient generation failures never surface through this type — the
/// multi-pass controller degrades to fallback content instead. Everything
/// here indicates a caller bug or bad configuration and is not recovered.
#[derive(Debug, Error)]
pub enum ThreadsmithError {
    #[error("unknown arc type: {0}")]
    UnknownArcType(String),

    #[error("no conversation template for arc type {0}")]
    MissingArcTemplate(ArcType),

    #[error("unknown persona id: {0}")]
    UnknownPersona(String),

    #[error("unknown subreddit: {0}")]
    UnknownSubreddit(String),

    #[error("persona roster is empty")]
    EmptyRoster,

    #[error("reply {reply} references missing parent comment {parent}")]
    OrphanReply { reply: uuid::Uuid, parent: uuid::Uuid },

    #[error("first top-level comment must not carry a product mention")]
    FirstCommentProductMention,

    #[error("config error: {0}")]
    Config(String),
}
