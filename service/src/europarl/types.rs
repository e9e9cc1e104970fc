//! Data types for European Parliament open-data API responses.
//!
//! Only the fields the attendance statistics need are modelled; everything
//! else in the JSON-LD payloads (per-language labels, realization links,
//! upper-case name variants, ...) is ignored on deserialization.

use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_string_from_number;

/// Top-level `{"data": [...]}` wrapper returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

/// A roster entry from `/meps/show-current`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberSummary {
    /// Resource id (e.g., "person/124936")
    pub id: String,
    /// Numeric MEP identifier (e.g., "124936")
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub identifier: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "givenName", default)]
    pub given_name: Option<String>,
    #[serde(rename = "familyName", default)]
    pub family_name: Option<String>,
    #[serde(rename = "api:country-of-representation", default)]
    pub country: Option<String>,
    #[serde(rename = "api:political-group", default)]
    pub political_group: Option<String>,
}

/// A detail record from `/meps/{ids}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberDetail {
    pub id: String,
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub identifier: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "givenName", default)]
    pub given_name: Option<String>,
    #[serde(rename = "familyName", default)]
    pub family_name: Option<String>,
    #[serde(rename = "hasMembership", default, deserialize_with = "one_or_many")]
    pub memberships: Vec<Membership>,
}

/// One entry of a member's `hasMembership` history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Membership {
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(rename = "memberDuring", default)]
    pub member_during: Option<Period>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Period {
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
}

/// An entry of the plenary-sitting list from `/events`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventStub {
    /// Resource id (e.g., "eli/dl/event/MTG-PL-2019-07-02")
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub activity_id: String,
    #[serde(default)]
    pub had_activity_type: Option<String>,
}

/// A framed detail record from `/events/{ids}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventDetail {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub activity_id: Option<String>,
    #[serde(default)]
    pub had_activity_type: Option<String>,
    #[serde(default)]
    pub activity_date: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub had_excused_person: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub had_participant_person: Vec<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub number_of_attendees: Option<i64>,
}

/// Accept `null`, a single value, or a list of values.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

/// Read a count given as a number or numeric string. Anything else becomes
/// `None`, so one unusable record does not fail its whole batch.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(i64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Count>::deserialize(deserializer)? {
        Some(Count::Number(n)) => Some(n),
        Some(Count::Text(text)) => text.trim().parse().ok(),
        Some(Count::Other(_)) | None => None,
    })
}
