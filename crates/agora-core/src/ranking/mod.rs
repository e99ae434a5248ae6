//! Ranking module.
//!
//! Pure scoring of public profiles; no store access.

mod score;

pub use score::{
    NO_VOTE_SENTINEL_DAYS, RECENCY_NUMERATOR, RECENCY_WEIGHT, RECENT_VOTES_WEIGHT,
    VERIFICATION_WEIGHT, compute_score_top, days_since_last_vote, rank_by_score,
};
