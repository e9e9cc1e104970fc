//! Plenary-sitting retrieval and shaping.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::batch::IdBatcher;
use crate::error::PipelineError;
use crate::europarl::{EuroparlApiClient, EventDetail, EventStub};
use crate::term::{parse_api_date, TermWindow};

/// `type` of detail records that describe an actual sitting.
pub const ACTIVITY_TYPE: &str = "Activity";

/// A plenary sitting after joining list and detail records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedEvent {
    pub id: String,
    pub kind: Option<String>,
    pub activity_id: String,
    pub had_activity_type: Option<String>,
    pub activity_date: NaiveDate,
    pub had_excused_person: Vec<String>,
    pub had_participant_person: Vec<String>,
    pub number_of_attendees: u32,
}

/// Flat CSV row for a [`ShapedEvent`]; person lists are `;`-joined.
#[derive(Debug, Serialize)]
pub struct EventRow<'a> {
    pub id: &'a str,
    #[serde(rename = "type")]
    pub kind: Option<&'a str>,
    pub activity_id: &'a str,
    pub had_activity_type: Option<&'a str>,
    pub activity_date: NaiveDate,
    pub number_of_attendees: u32,
    pub had_excused_person: String,
    pub had_participant_person: String,
}

impl ShapedEvent {
    #[must_use]
    pub fn to_row(&self) -> EventRow<'_> {
        EventRow {
            id: &self.id,
            kind: self.kind.as_deref(),
            activity_id: &self.activity_id,
            had_activity_type: self.had_activity_type.as_deref(),
            activity_date: self.activity_date,
            number_of_attendees: self.number_of_attendees,
            had_excused_person: self.had_excused_person.join(";"),
            had_participant_person: self.had_participant_person.join(";"),
        }
    }
}

/// Fetch the list of plenary sittings.
///
/// # Errors
///
/// Propagates any API failure.
pub async fn fetch_plenary_sittings(
    client: &dyn EuroparlApiClient,
) -> Result<Vec<EventStub>, PipelineError> {
    let stubs = client.plenary_sittings().await?;
    tracing::info!(count = stubs.len(), "fetched plenary sittings");
    Ok(stubs)
}

/// Fetch detail records for `activity_ids` in batches of the event-details
/// limit, keeping only activities dated inside the term and before `today`.
///
/// # Errors
///
/// Fails on the first batch the API rejects.
pub async fn fetch_event_details(
    client: &dyn EuroparlApiClient,
    activity_ids: &[String],
    term: &TermWindow,
    today: NaiveDate,
) -> Result<Vec<EventDetail>, PipelineError> {
    let batcher = IdBatcher::event_details();
    let total = batcher.batch_count(activity_ids.len());
    let mut fetched = 0usize;
    let mut kept = Vec::new();

    for (n, batch) in batcher.batches(activity_ids).enumerate() {
        tracing::debug!(batch = n + 1, of = total, size = batch.len(), "event details");
        let details = client.event_details(batch).await?;
        fetched += details.len();
        kept.extend(
            details
                .into_iter()
                .filter(|detail| is_past_sitting(detail, term, today)),
        );
    }

    tracing::info!(
        fetched,
        kept = kept.len(),
        requests = total,
        "fetched event details"
    );
    Ok(kept)
}

fn is_past_sitting(detail: &EventDetail, term: &TermWindow, today: NaiveDate) -> bool {
    if detail.kind.as_deref() != Some(ACTIVITY_TYPE) {
        return false;
    }
    let Some(day) = detail.activity_date.as_deref().and_then(parse_api_date) else {
        tracing::debug!(id = %detail.id, "no usable activity_date, dropping");
        return false;
    };
    term.contains_half_open(day) && day < today
}

/// Inner join of sittings and details on `id`, in sitting order.
///
/// List-side `type`, `activity_id` and `had_activity_type` win over the
/// detail side. Rows without a strictly positive attendee count are dropped.
#[must_use]
pub fn shape_events(stubs: &[EventStub], details: &[EventDetail]) -> Vec<ShapedEvent> {
    let mut by_id: HashMap<&str, &EventDetail> = HashMap::with_capacity(details.len());
    for detail in details {
        by_id.entry(detail.id.as_str()).or_insert(detail);
    }

    stubs
        .iter()
        .filter_map(|stub| {
            let detail = by_id.get(stub.id.as_str())?;
            let activity_date = detail.activity_date.as_deref().and_then(parse_api_date)?;
            let attendees = detail
                .number_of_attendees
                .and_then(|n| u32::try_from(n).ok())
                .filter(|&n| n > 0)?;

            Some(ShapedEvent {
                id: stub.id.clone(),
                kind: stub.kind.clone().or_else(|| detail.kind.clone()),
                activity_id: stub.activity_id.clone(),
                had_activity_type: stub
                    .had_activity_type
                    .clone()
                    .or_else(|| detail.had_activity_type.clone()),
                activity_date,
                had_excused_person: detail.had_excused_person.clone(),
                had_participant_person: detail.had_participant_person.clone(),
                number_of_attendees: attendees,
            })
        })
        .collect()
}

/// Fetch sittings and their details, then shape them.
///
/// # Errors
///
/// Propagates any API failure.
pub async fn fetch_events(
    client: &dyn EuroparlApiClient,
    term: &TermWindow,
    today: NaiveDate,
) -> Result<Vec<ShapedEvent>, PipelineError> {
    let stubs = fetch_plenary_sittings(client).await?;
    let activity_ids: Vec<String> = stubs.iter().map(|s| s.activity_id.clone()).collect();
    let details = fetch_event_details(client, &activity_ids, term, today).await?;
    let events = shape_events(&stubs, &details);
    tracing::info!(count = events.len(), "shaped plenary sittings");
    Ok(events)
}
