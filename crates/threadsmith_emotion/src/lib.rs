//! Emotional modeling for synthetic conversations.
//!
//! Pure, deterministic functions over immutable persona/subreddit inputs:
//! arc generation, frustration curves, and the humor/vulnerability moment
//! detectors that parameterize downstream prompts. Safe to call
//! concurrently — nothing here holds state.

pub mod arc_engine;
pub mod frustration;
pub mod humor;
pub mod vulnerability;

pub use arc_engine::generate_emotional_arc;
pub use frustration::generate_frustration_curve;
pub use humor::{identify_humor_opportunities, ConversationPhase, HumorBeat, HumorOpportunity};
pub use vulnerability::{
    identify_vulnerability_moments, VulnerabilityKind, VulnerabilityMoment,
};
