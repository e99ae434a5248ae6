//! Directory request and response models.

use crate::profile::{Gender, Profile};
use crate::store::Cursor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

/// Gender constraint of a directory request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GenderFilter {
    /// No constraint
    #[default]
    Any,
    Only(Gender),
}

impl GenderFilter {
    /// The gender to constrain on, if any.
    pub fn gender(&self) -> Option<Gender> {
        match self {
            Self::Any => None,
            Self::Only(gender) => Some(*gender),
        }
    }

    pub fn matches(&self, profile: &Profile) -> bool {
        match self {
            Self::Any => true,
            Self::Only(gender) => profile.gender == Some(*gender),
        }
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Only(gender) => write!(f, "{}", gender),
        }
    }
}

impl FromStr for GenderFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("any") {
            return Ok(Self::Any);
        }
        Gender::from_str(&s.to_ascii_lowercase())
            .map(Self::Only)
            .map_err(|_| format!("unknown gender filter '{}'", s))
    }
}

impl TryFrom<String> for GenderFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GenderFilter> for String {
    fn from(filter: GenderFilter) -> Self {
        filter.to_string()
    }
}

/// Politician/public partition of a directory request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProfileTypeFilter {
    /// No constraint
    #[default]
    All,
    /// Only profiles with `is_politician == false`
    Public,
    /// Only profiles with `is_politician == true`
    Politician,
}

impl ProfileTypeFilter {
    /// Required value of `is_politician`, if constrained.
    pub fn politician_constraint(&self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Public => Some(false),
            Self::Politician => Some(true),
        }
    }

    pub fn matches(&self, profile: &Profile) -> bool {
        self.politician_constraint()
            .is_none_or(|required| profile.is_politician == required)
    }
}

/// A directory page request.
///
/// ```
/// use agora_core::directory::{DirectoryFilter, ProfileTypeFilter};
///
/// let filter = DirectoryFilter::default()
///     .with_profile_type(ProfileTypeFilter::Politician)
///     .with_page_size(5);
/// assert_eq!(filter.page_size, Some(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryFilter {
    pub gender: GenderFilter,
    #[serde(rename = "type")]
    pub profile_type: ProfileTypeFilter,
    /// Falls back to the configured default page size (20) when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// `next_cursor` of a previous page produced with the same filters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
}

impl DirectoryFilter {
    pub fn with_gender(mut self, gender: GenderFilter) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_profile_type(mut self, profile_type: ProfileTypeFilter) -> Self {
        self.profile_type = profile_type;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_cursor(mut self, cursor: Option<Cursor>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Whether a profile satisfies the opt-in rule and both filters.
    pub fn admits(&self, profile: &Profile) -> bool {
        profile.is_eligible() && self.gender.matches(profile) && self.profile_type.matches(profile)
    }
}

/// One page of directory results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Most recent public voters first, at most `page_size` items
    pub items: Vec<Profile>,
    /// Position of the last record of the underlying fetch, absent on the last page
    pub next_cursor: Option<Cursor>,
}

impl Page {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}
