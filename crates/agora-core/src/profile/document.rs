//! Conversion between store documents and `Profile`.
//!
//! Decoding never fails: a missing field, or a field holding a value of the
//! wrong shape, falls back to the field's default.

use super::model::{Gender, Profile, SocialLinks};
use crate::store::{Document, FieldFilter};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Stored field names.
pub mod fields {
    pub const NAME: &str = "name";
    pub const SURNAME: &str = "surname";
    pub const DISPLAY_NAME: &str = "display_name";
    pub const IS_DIRECTORY_OPT_IN: &str = "is_directory_opt_in";
    pub const IS_POLITICIAN: &str = "is_politician";
    pub const POLITICIAN_ROLE: &str = "politician_role";
    pub const GENDER: &str = "gender";
    pub const PUBLIC_VOTE_COUNT_30D: &str = "public_vote_count_30d";
    pub const PUBLIC_VOTE_COUNT_ALL: &str = "public_vote_count_all";
    pub const LAST_PUBLIC_VOTE_AT: &str = "last_public_vote_at";
    pub const VERIFICATION_LEVEL: &str = "verification_level";
    pub const SOCIAL_LINKS: &str = "social_links";
    pub const PROFILE_PHOTO_URL: &str = "profile_photo_url";
    pub const IS_DEMO: &str = "is_demo";
    pub const CREATED_AT: &str = "created_at";
    pub const CREATED_AT_CAMEL: &str = "createdAt";
}

/// The hard eligibility constraint applied to every directory and ranking query.
pub fn opt_in_filter() -> FieldFilter {
    FieldFilter::eq(fields::IS_DIRECTORY_OPT_IN, true)
}

impl From<&Document> for Profile {
    fn from(document: &Document) -> Self {
        decode_profile(document).0
    }
}

/// Decodes a profile and reports the fields that held a value of the wrong
/// shape.
fn decode_profile(document: &Document) -> (Profile, Vec<&'static str>) {
    let mut reader = FieldReader::new(&document.id, &document.data);
    let name = reader.string(fields::NAME);
    let surname = reader.string(fields::SURNAME);
    let explicit = reader.string(fields::DISPLAY_NAME);
    let display_name =
        Profile::derive_display_name(explicit.as_deref(), name.as_deref(), surname.as_deref());
    let created_at = match reader.timestamp(fields::CREATED_AT) {
        Some(at) => Some(at),
        None => reader.timestamp(fields::CREATED_AT_CAMEL),
    };

    let profile = Profile {
        id: document.id.clone(),
        display_name,
        name,
        surname,
        is_directory_opt_in: reader.boolean(fields::IS_DIRECTORY_OPT_IN),
        is_politician: reader.boolean(fields::IS_POLITICIAN),
        politician_role: reader.string(fields::POLITICIAN_ROLE),
        gender: reader.gender(),
        public_vote_count_30d: reader.count(fields::PUBLIC_VOTE_COUNT_30D),
        public_vote_count_all: reader.count(fields::PUBLIC_VOTE_COUNT_ALL),
        last_public_vote_at: reader.timestamp(fields::LAST_PUBLIC_VOTE_AT),
        verification_level: u32::try_from(reader.count(fields::VERIFICATION_LEVEL))
            .unwrap_or(u32::MAX),
        social_links: reader.social_links(),
        profile_photo_url: reader.string(fields::PROFILE_PHOTO_URL),
        is_demo: reader.boolean(fields::IS_DEMO),
        created_at,
    };
    (profile, reader.malformed)
}

impl From<Document> for Profile {
    fn from(document: Document) -> Self {
        Profile::from(&document)
    }
}

/// Encodes a profile the way the seed scripts write it.
///
/// Timestamps are written as RFC 3339 strings. The resolved display name is
/// stored as the explicit `display_name`.
impl From<&Profile> for Document {
    fn from(profile: &Profile) -> Self {
        let mut data = Map::new();
        insert_opt(&mut data, fields::NAME, profile.name.clone());
        insert_opt(&mut data, fields::SURNAME, profile.surname.clone());
        data.insert(
            fields::DISPLAY_NAME.to_string(),
            Value::from(profile.display_name.clone()),
        );
        data.insert(
            fields::IS_DIRECTORY_OPT_IN.to_string(),
            Value::from(profile.is_directory_opt_in),
        );
        data.insert(
            fields::IS_POLITICIAN.to_string(),
            Value::from(profile.is_politician),
        );
        insert_opt(&mut data, fields::POLITICIAN_ROLE, profile.politician_role.clone());
        insert_opt(&mut data, fields::GENDER, profile.gender.map(|g| g.to_string()));
        data.insert(
            fields::PUBLIC_VOTE_COUNT_30D.to_string(),
            Value::from(profile.public_vote_count_30d),
        );
        data.insert(
            fields::PUBLIC_VOTE_COUNT_ALL.to_string(),
            Value::from(profile.public_vote_count_all),
        );
        insert_opt(
            &mut data,
            fields::LAST_PUBLIC_VOTE_AT,
            profile.last_public_vote_at.map(format_timestamp),
        );
        data.insert(
            fields::VERIFICATION_LEVEL.to_string(),
            Value::from(profile.verification_level),
        );
        if !profile.social_links.is_empty() {
            if let Ok(links) = serde_json::to_value(&profile.social_links) {
                data.insert(fields::SOCIAL_LINKS.to_string(), links);
            }
        }
        insert_opt(&mut data, fields::PROFILE_PHOTO_URL, profile.profile_photo_url.clone());
        if profile.is_demo {
            data.insert(fields::IS_DEMO.to_string(), Value::from(true));
        }
        insert_opt(&mut data, fields::CREATED_AT, profile.created_at.map(format_timestamp));

        Document::new(profile.id.clone(), data)
    }
}

/// Parses the timestamp shapes found in exported documents.
///
/// Accepts RFC 3339 strings, `{seconds, nanoseconds}` maps (also with leading
/// underscores), and integer epoch milliseconds. Anything else is `None`.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            DateTime::<Utc>::from_timestamp(seconds, nanos)
        }
        _ => None,
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Typed access to a document body.
///
/// Absent and `null` fields read as their default. A present value of the
/// wrong shape also reads as the default and is noted at `trace` level.
struct FieldReader<'a> {
    id: &'a str,
    data: &'a Map<String, Value>,
    malformed: Vec<&'static str>,
}

impl<'a> FieldReader<'a> {
    fn new(id: &'a str, data: &'a Map<String, Value>) -> Self {
        Self {
            id,
            data,
            malformed: Vec::new(),
        }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        self.data.get(field).filter(|value| !value.is_null())
    }

    fn note(&mut self, field: &'static str) {
        tracing::trace!(
            profile_id = self.id,
            field,
            "Malformed profile field, using default"
        );
        self.malformed.push(field);
    }

    fn string(&mut self, field: &'static str) -> Option<String> {
        let value = self.present(field)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.note(field);
                None
            }
        }
    }

    fn boolean(&mut self, field: &'static str) -> bool {
        match self.present(field) {
            None => false,
            Some(value) => value.as_bool().unwrap_or_else(|| {
                self.note(field);
                false
            }),
        }
    }

    /// Non-negative integer; positive floats are truncated, anything else reads as 0.
    fn count(&mut self, field: &'static str) -> u64 {
        let Some(value) = self.present(field) else {
            return 0;
        };
        let count = value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        });
        count.unwrap_or_else(|| {
            self.note(field);
            0
        })
    }

    fn timestamp(&mut self, field: &'static str) -> Option<DateTime<Utc>> {
        let value = self.present(field)?;
        let parsed = parse_timestamp(value);
        if parsed.is_none() {
            self.note(field);
        }
        parsed
    }

    fn gender(&mut self) -> Option<Gender> {
        let raw = self.string(fields::GENDER)?;
        let gender = Gender::from_str(&raw).ok();
        if gender.is_none() {
            self.note(fields::GENDER);
        }
        gender
    }

    fn social_links(&mut self) -> SocialLinks {
        let Some(value) = self.present(fields::SOCIAL_LINKS) else {
            return SocialLinks::default();
        };
        let Value::Object(links) = value else {
            self.note(fields::SOCIAL_LINKS);
            return SocialLinks::default();
        };

        let mut inner = FieldReader::new(self.id, links);
        let social_links = SocialLinks {
            linkedin: inner.string("linkedin"),
            facebook: inner.string("facebook"),
            x: inner.string("x"),
        };
        if !inner.malformed.is_empty() {
            self.note(fields::SOCIAL_LINKS);
        }
        social_links
    }
}

fn insert_opt(data: &mut Map<String, Value>, name: &str, value: Option<String>) {
    if let Some(value) = value {
        data.insert(name.to_string(), Value::from(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn document(id: &str, value: Value) -> Document {
        match value {
            Value::Object(map) => Document::new(id, map),
            _ => panic!("test documents must be objects"),
        }
    }

    #[test]
    fn test_decode_full_document() {
        let doc = document(
            "pol-1",
            json!({
                "name": "Maria",
                "surname": "Lopez",
                "is_directory_opt_in": true,
                "is_politician": true,
                "politician_role": "Senator",
                "gender": "female",
                "public_vote_count_30d": 12,
                "public_vote_count_all": 90,
                "last_public_vote_at": { "seconds": 1_700_000_000, "nanoseconds": 0 },
                "verification_level": 3,
                "social_links": { "x": "x.com/marial" },
                "is_demo": true,
                "createdAt": "2024-01-02T03:04:05Z"
            }),
        );

        let profile = Profile::from(&doc);
        assert_eq!(profile.id, "pol-1");
        assert_eq!(profile.display_name, "Maria Lopez");
        assert!(profile.is_directory_opt_in);
        assert!(profile.is_politician);
        assert_eq!(profile.politician_role.as_deref(), Some("Senator"));
        assert_eq!(profile.gender, Some(Gender::Female));
        assert_eq!(profile.public_vote_count_30d, 12);
        assert_eq!(profile.public_vote_count_all, 90);
        assert_eq!(
            profile.last_public_vote_at,
            Some(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
        );
        assert_eq!(profile.verification_level, 3);
        assert_eq!(profile.social_links.x.as_deref(), Some("x.com/marial"));
        assert!(profile.is_demo);
        assert_eq!(
            profile.created_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
        );
    }

    #[test]
    fn test_decode_empty_document_uses_defaults() {
        let profile = Profile::from(&document("empty", json!({})));
        assert_eq!(profile.display_name, "Anonymous");
        assert!(!profile.is_directory_opt_in);
        assert!(!profile.is_politician);
        assert_eq!(profile.gender, None);
        assert_eq!(profile.public_vote_count_30d, 0);
        assert_eq!(profile.last_public_vote_at, None);
        assert_eq!(profile.verification_level, 0);
    }

    #[test]
    fn test_decode_malformed_fields_are_defaulted() {
        let doc = document(
            "odd",
            json!({
                "is_directory_opt_in": "yes",
                "gender": "robot",
                "public_vote_count_30d": -4,
                "public_vote_count_all": 7.9,
                "verification_level": "high",
                "last_public_vote_at": true,
                "social_links": "none"
            }),
        );
        let profile = Profile::from(&doc);
        assert!(!profile.is_directory_opt_in);
        assert_eq!(profile.gender, None);
        assert_eq!(profile.public_vote_count_30d, 0);
        assert_eq!(profile.public_vote_count_all, 7);
        assert_eq!(profile.verification_level, 0);
        assert_eq!(profile.last_public_vote_at, None);
        assert!(profile.social_links.is_empty());
    }

    #[test]
    fn test_decode_reports_malformed_fields() {
        let doc = document(
            "odd",
            json!({
                "display_name": 42,
                "is_politician": "no",
                "gender": "robot",
                "public_vote_count_30d": -4,
                "public_vote_count_all": 7.9,
                "last_public_vote_at": "yesterday",
                "politician_role": null,
                "social_links": { "x": 5 }
            }),
        );
        let (profile, malformed) = decode_profile(&doc);

        assert_eq!(profile.display_name, "Anonymous");
        assert_eq!(profile.public_vote_count_all, 7);
        assert_eq!(
            malformed,
            vec![
                fields::DISPLAY_NAME,
                fields::IS_POLITICIAN,
                fields::GENDER,
                fields::PUBLIC_VOTE_COUNT_30D,
                fields::LAST_PUBLIC_VOTE_AT,
                fields::SOCIAL_LINKS,
            ]
        );
    }

    #[test]
    fn test_decode_well_formed_document_reports_nothing() {
        let doc = document(
            "fine",
            json!({
                "display_name": "Kay",
                "is_directory_opt_in": true,
                "gender": "other",
                "public_vote_count_30d": 3,
                "last_public_vote_at": 1_700_000_000_000_i64,
                "politician_role": null
            }),
        );
        let (_, malformed) = decode_profile(&doc);
        assert!(malformed.is_empty());
    }

    #[test]
    fn test_parse_timestamp_shapes() {
        let expected = Utc.timestamp_opt(1_700_000_000, 500).unwrap();
        assert_eq!(
            parse_timestamp(&json!({ "_seconds": 1_700_000_000, "_nanoseconds": 500 })),
            Some(expected)
        );
        assert_eq!(
            parse_timestamp(&json!(1_700_000_000_000_i64)),
            Some(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
        );
        assert_eq!(parse_timestamp(&json!("not a date")), None);
        assert_eq!(parse_timestamp(&json!({ "nanoseconds": 1 })), None);
    }

    #[test]
    fn test_encode_then_decode_keeps_ranking_fields() {
        let profile = Profile {
            id: "v-9".to_string(),
            display_name: "Lee".to_string(),
            is_directory_opt_in: true,
            gender: Some(Gender::PreferNot),
            public_vote_count_30d: 4,
            last_public_vote_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
            verification_level: 1,
            ..Default::default()
        };
        let decoded = Profile::from(&Document::from(&profile));
        assert_eq!(decoded, profile);
    }
}
