//! "Top" score for public profiles.
//!
//! The score favours profiles that voted publicly a lot in the last 30 days,
//! are verified, and voted recently:
//!
//! ```text
//! score = 0.5 * recent_votes + 0.3 * verification + 0.2 * (100 / days_since_last_vote)
//! ```
//!
//! `days_since_last_vote` is clamped to at least one day, and a profile that
//! never voted publicly uses [`NO_VOTE_SENTINEL_DAYS`]. The score has no upper
//! bound; an extreme 30-day count dominates everything else.
//!
//! The sentinel is a fixed 999 days, not "infinitely stale": a profile whose
//! last public vote is more than 999 days old gets a smaller recency term than
//! one that never voted, and so ranks below it when the other inputs are equal.

use crate::profile::{Profile, RankedProfile};
use chrono::{DateTime, Utc};

pub const RECENT_VOTES_WEIGHT: f64 = 0.5;
pub const VERIFICATION_WEIGHT: f64 = 0.3;
pub const RECENCY_WEIGHT: f64 = 0.2;

/// Recency boost for a vote cast within the last day.
pub const RECENCY_NUMERATOR: f64 = 100.0;

/// Days assumed for a profile with no public vote on record.
pub const NO_VOTE_SENTINEL_DAYS: f64 = 999.0;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Days between the last public vote and `now`, never below one.
pub fn days_since_last_vote(profile: &Profile, now: DateTime<Utc>) -> f64 {
    match profile.last_public_vote_at {
        Some(last) => {
            let elapsed = (now - last).num_milliseconds() as f64 / MILLIS_PER_DAY;
            elapsed.max(1.0)
        }
        None => NO_VOTE_SENTINEL_DAYS,
    }
}

/// Computes the ranking score of a profile at instant `now`.
///
/// Pure and deterministic for a given `now`; every input has a default so
/// there is no failure path.
///
/// # Examples
///
/// ```
/// use agora_core::profile::Profile;
/// use agora_core::ranking::compute_score_top;
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let active = Profile {
///     public_vote_count_30d: 50,
///     verification_level: 3,
///     last_public_vote_at: Some(now),
///     ..Default::default()
/// };
/// assert!((compute_score_top(&active, now) - 45.9).abs() < 1e-9);
/// ```
pub fn compute_score_top(profile: &Profile, now: DateTime<Utc>) -> f64 {
    let recent = profile.public_vote_count_30d as f64;
    let verification = f64::from(profile.verification_level);
    let recency_boost = (RECENCY_NUMERATOR / days_since_last_vote(profile, now)).max(0.0);

    RECENT_VOTES_WEIGHT * recent
        + VERIFICATION_WEIGHT * verification
        + RECENCY_WEIGHT * recency_boost
}

/// Scores every profile, sorts by descending score and keeps the first `limit`.
///
/// The sort is stable, so equal scores keep the order they arrived in.
pub fn rank_by_score(
    profiles: impl IntoIterator<Item = Profile>,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<RankedProfile> {
    let mut ranked: Vec<RankedProfile> = profiles
        .into_iter()
        .map(|profile| {
            let score_top = compute_score_top(&profile, now);
            RankedProfile { profile, score_top }
        })
        .collect();

    ranked.sort_by(|a, b| b.score_top.total_cmp(&a.score_top));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
    }

    fn profile(recent: u64, verification: u32, days_ago: Option<i64>) -> Profile {
        Profile {
            id: format!("p-{}-{}-{:?}", recent, verification, days_ago),
            is_directory_opt_in: true,
            public_vote_count_30d: recent,
            verification_level: verification,
            last_public_vote_at: days_ago.map(|d| now() - Duration::days(d)),
            ..Default::default()
        }
    }

    #[test]
    fn test_active_verified_profile_outranks_quiet_one() {
        let a = compute_score_top(&profile(50, 3, Some(0)), now());
        let b = compute_score_top(&profile(10, 1, Some(30)), now());

        assert!((a - 45.9).abs() < 1e-9);
        assert!((b - (5.0 + 0.3 + 0.2 * (100.0 / 30.0))).abs() < 1e-9);
        assert!(a > b);
    }

    #[test]
    fn test_empty_profile_scores_small_finite_value() {
        let score = compute_score_top(&Profile::default(), now());
        assert!(score.is_finite());
        assert!(score >= 0.0);
        assert!((score - 0.2 * (100.0 / 999.0)).abs() < 1e-12);
    }

    #[test]
    fn test_future_vote_is_clamped_to_one_day() {
        let future = profile(0, 0, Some(-3));
        assert_eq!(days_since_last_vote(&future, now()), 1.0);
        assert!((compute_score_top(&future, now()) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_monotonic_in_recent_votes() {
        let mut previous = f64::MIN;
        for recent in [0, 1, 5, 20, 1_000] {
            let score = compute_score_top(&profile(recent, 1, Some(10)), now());
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_votes_older_than_sentinel_rank_below_never_voted() {
        let never = compute_score_top(&profile(0, 0, None), now());
        let at_sentinel = compute_score_top(&profile(0, 0, Some(999)), now());
        let ancient = compute_score_top(&profile(0, 0, Some(2000)), now());

        assert!((never - at_sentinel).abs() < 1e-9);
        assert!(ancient < never);
        assert!((ancient - RECENCY_WEIGHT * RECENCY_NUMERATOR / 2000.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_is_monotonic_in_verification() {
        let mut previous = f64::MIN;
        for level in 0..6 {
            let score = compute_score_top(&profile(3, level, Some(10)), now());
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_score_is_monotonic_in_recency() {
        let never = compute_score_top(&profile(3, 1, None), now());
        let mut previous = never;
        for days_ago in [500, 100, 30, 7, 1, 0] {
            let score = compute_score_top(&profile(3, 1, Some(days_ago)), now());
            assert!(score >= previous, "{} days ago scored lower", days_ago);
            previous = score;
        }
    }

    #[test]
    fn test_rank_by_score_sorts_and_truncates() {
        let ranked = rank_by_score(
            vec![
                profile(1, 0, None),
                profile(40, 2, Some(1)),
                profile(10, 1, Some(5)),
            ],
            now(),
            2,
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].profile.public_vote_count_30d, 40);
        assert_eq!(ranked[1].profile.public_vote_count_30d, 10);
        assert!(ranked[0].score_top >= ranked[1].score_top);
    }

    #[test]
    fn test_rank_by_score_keeps_fetch_order_on_ties() {
        let mut first = profile(5, 1, Some(2));
        first.id = "first".to_string();
        let mut second = profile(5, 1, Some(2));
        second.id = "second".to_string();

        let ranked = rank_by_score(vec![first, second], now(), 10);
        assert_eq!(ranked[0].profile.id, "first");
        assert_eq!(ranked[1].profile.id, "second");
    }
}
