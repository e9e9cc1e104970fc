//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - wiremock-backed stand-in for the open-data API
//! - [`fixtures`] - JSON-LD payloads shaped like real API responses

pub mod http_mock;

#[allow(dead_code)]
pub mod fixtures {
    use serde_json::{json, Value};

    pub const ROLE_MEMBER: &str = "http://publications.europa.eu/resource/authority/role/MEMBER";

    pub fn roster_entry(identifier: &str, label: &str, country: &str, group: &str) -> Value {
        json!({
            "id": format!("person/{identifier}"),
            "type": "Person",
            "identifier": identifier,
            "label": label,
            "familyName": label.split(' ').next_back().unwrap_or(label),
            "givenName": label.split(' ').next().unwrap_or(label),
            "sortLabel": label.to_uppercase(),
            "api:country-of-representation": country,
            "api:political-group": group
        })
    }

    pub fn member_detail(identifier: &str, start: &str, end: Option<&str>) -> Value {
        let mut period = json!({"type": "PeriodOfTime", "startDate": start});
        if let Some(end) = end {
            period["endDate"] = json!(end);
        }
        json!({
            "id": format!("person/{identifier}"),
            "type": "Person",
            "identifier": identifier,
            "label": format!("Member {identifier}"),
            "hasGender": "http://publications.europa.eu/resource/authority/human-sex/FEMALE",
            "hasMembership": [
                {
                    "id": format!("membership/{identifier}-ep8"),
                    "type": "Membership",
                    "organization": "org/ep-8",
                    "role": ROLE_MEMBER,
                    "memberDuring": {"type": "PeriodOfTime", "startDate": "2014-07-01", "endDate": "2019-07-01"}
                },
                {
                    "id": format!("membership/{identifier}-ep9"),
                    "type": "Membership",
                    "organization": "org/ep-9",
                    "role": ROLE_MEMBER,
                    "memberDuring": period
                }
            ]
        })
    }

    pub fn sitting_stub(day: &str) -> Value {
        json!({
            "id": format!("eli/dl/event/MTG-PL-{day}"),
            "type": "Activity",
            "activity_id": format!("MTG-PL-{day}"),
            "had_activity_type": "def/ep-activities/PLENARY_SITTING",
            "eli-dl:activity_date": {"@value": format!("{day}T09:00:00+02:00"), "type": "xsd:dateTime"}
        })
    }

    pub fn sitting_detail(day: &str, excused: &[&str], present: &[&str], attendees: Value) -> Value {
        json!({
            "id": format!("eli/dl/event/MTG-PL-{day}"),
            "type": "Activity",
            "activity_id": format!("MTG-PL-{day}"),
            "had_activity_type": "def/ep-activities/PLENARY_SITTING",
            "activity_date": day,
            "activity_label": {"en": "Plenary sitting", "fr": "Séance plénière"},
            "had_excused_person": excused.iter().map(|p| format!("person/{p}")).collect::<Vec<_>>(),
            "had_participant_person": present.iter().map(|p| format!("person/{p}")).collect::<Vec<_>>(),
            "number_of_attendees": attendees
        })
    }
}
