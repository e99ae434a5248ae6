//! Profile domain model.
//!
//! A profile is the public face of a voter or politician. Profiles are
//! created and mutated elsewhere (sign-up, vote casting); this crate only
//! reads and ranks them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Fallback shown when a profile has no usable name at all.
pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous";

/// Verification tier at which consumers show the "verified" badge.
pub const VERIFIED_BADGE_LEVEL: u32 = 2;

/// Self-declared gender of a profile owner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNot,
}

/// Optional links shown on a public profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        self.linkedin.is_none() && self.facebook.is_none() && self.x.is_none()
    }
}

/// A public profile as read from the document store.
///
/// Every field except `id` is optional in the stored document; absent or
/// malformed values decode to the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Store-assigned identifier, immutable
    pub id: String,
    /// Resolved display string (see [`Profile::derive_display_name`])
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    /// Only opted-in profiles may be listed or ranked
    pub is_directory_opt_in: bool,
    pub is_politician: bool,
    /// Free-text office label, present by convention only for politicians
    #[serde(skip_serializing_if = "Option::is_none")]
    pub politician_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub public_vote_count_30d: u64,
    pub public_vote_count_all: u64,
    /// Absent means the profile never voted publicly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_public_vote_at: Option<DateTime<Utc>>,
    /// 0 = unverified, higher = more verified
    pub verification_level: u32,
    #[serde(skip_serializing_if = "SocialLinks::is_empty")]
    pub social_links: SocialLinks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo_url: Option<String>,
    /// Seeded demonstration data
    pub is_demo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Resolves the display name shown for a profile.
    ///
    /// Uses the explicit display name when it is non-blank, otherwise joins
    /// given and family name, otherwise falls back to `"Anonymous"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use agora_core::profile::Profile;
    ///
    /// assert_eq!(Profile::derive_display_name(Some("Ada L."), Some("Ada"), None), "Ada L.");
    /// assert_eq!(
    ///     Profile::derive_display_name(None, Some("Ada"), Some("Lovelace")),
    ///     "Ada Lovelace"
    /// );
    /// assert_eq!(Profile::derive_display_name(Some("  "), None, None), "Anonymous");
    /// ```
    pub fn derive_display_name(
        explicit: Option<&str>,
        name: Option<&str>,
        surname: Option<&str>,
    ) -> String {
        if let Some(explicit) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
            return explicit.to_string();
        }

        let joined = [name, surname]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if joined.is_empty() {
            ANONYMOUS_DISPLAY_NAME.to_string()
        } else {
            joined
        }
    }

    /// Whether this profile may appear in directory and top-N results.
    pub fn is_eligible(&self) -> bool {
        self.is_directory_opt_in
    }

    /// Whether consumers should render the verified badge.
    pub fn is_verified(&self) -> bool {
        self.verification_level >= VERIFIED_BADGE_LEVEL
    }

    /// Milliseconds since the epoch of the last public vote, 0 when absent.
    ///
    /// Used as the recency sort key: profiles without a timestamp sort as if
    /// they voted at epoch zero.
    pub fn last_vote_sort_key(&self) -> i64 {
        self.last_public_vote_at
            .map(|at| at.timestamp_millis())
            .unwrap_or(0)
    }
}

/// A profile together with its transient ranking score.
///
/// The score is recomputed for every ranking request and never written back
/// to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProfile {
    #[serde(flatten)]
    pub profile: Profile,
    pub score_top: f64,
}
