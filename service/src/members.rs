//! Member retrieval and mandate resolution.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::batch::IdBatcher;
use crate::error::PipelineError;
use crate::europarl::{EuroparlApiClient, MemberDetail, MemberSummary, Membership};
use crate::term::{parse_api_date, TermWindow};

/// Authority role of a full member.
pub const ROLE_MEMBER: &str = "http://publications.europa.eu/resource/authority/role/MEMBER";

/// Authority role of a full-term member of the European Parliament.
pub const ROLE_MEMBER_EP: &str =
    "http://publications.europa.eu/resource/authority/role/MEMBER_EP";

/// A current member joined with their detail record and resolved mandate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub identifier: String,
    pub label: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub country: Option<String>,
    pub political_group: Option<String>,
    pub memberships: Vec<Membership>,
    pub mandate: MandateWindow,
}

/// Inclusive date range a member held office within the term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MandateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Fetch the roster of currently serving members.
///
/// # Errors
///
/// Propagates any API failure.
pub async fn fetch_current_members(
    client: &dyn EuroparlApiClient,
) -> Result<Vec<MemberSummary>, PipelineError> {
    let roster = client.current_members().await?;
    tracing::info!(count = roster.len(), "fetched current members");
    Ok(roster)
}

/// Fetch detail records for `ids` in batches of the member-details limit.
///
/// Records come back in batch order, then in the order the API returned
/// them; that is not necessarily the order of `ids`.
///
/// # Errors
///
/// Fails on the first batch the API rejects.
pub async fn fetch_member_details(
    client: &dyn EuroparlApiClient,
    ids: &[String],
) -> Result<Vec<MemberDetail>, PipelineError> {
    let batcher = IdBatcher::member_details();
    let total = batcher.batch_count(ids.len());
    let mut details = Vec::with_capacity(ids.len());

    for (n, batch) in batcher.batches(ids).enumerate() {
        tracing::debug!(batch = n + 1, of = total, size = batch.len(), "member details");
        details.extend(client.member_details(batch).await?);
    }

    tracing::info!(count = details.len(), requests = total, "fetched member details");
    Ok(details)
}

/// Fetch the roster, fetch details for every roster entry, and join the two
/// on `identifier` (inner join, roster order) with mandates resolved.
///
/// # Errors
///
/// Propagates API failures and [`PipelineError::DataShape`] from
/// [`resolve_mandate`].
pub async fn fetch_members(
    client: &dyn EuroparlApiClient,
    term: &TermWindow,
) -> Result<Vec<Member>, PipelineError> {
    let roster = fetch_current_members(client).await?;
    let ids: Vec<String> = roster.iter().map(|m| m.identifier.clone()).collect();
    let details = fetch_member_details(client, &ids).await?;
    join_members(roster, &details, term)
}

/// Inner join of roster and detail records on `identifier`. Roster
/// attributes win where both sides carry them.
///
/// # Errors
///
/// Returns [`PipelineError::DataShape`] if a mandate cannot be resolved.
pub fn join_members(
    roster: Vec<MemberSummary>,
    details: &[MemberDetail],
    term: &TermWindow,
) -> Result<Vec<Member>, PipelineError> {
    let mut by_identifier: HashMap<&str, &MemberDetail> = HashMap::with_capacity(details.len());
    for detail in details {
        by_identifier.entry(detail.identifier.as_str()).or_insert(detail);
    }

    let mut members = Vec::with_capacity(roster.len());
    for summary in roster {
        let Some(detail) = by_identifier.get(summary.identifier.as_str()) else {
            tracing::debug!(identifier = %summary.identifier, "no detail record, skipping");
            continue;
        };

        let mandate = resolve_mandate(&summary.identifier, &detail.memberships, term)?;
        members.push(Member {
            id: summary.id,
            identifier: summary.identifier,
            label: summary.label.or_else(|| detail.label.clone()),
            given_name: summary.given_name.or_else(|| detail.given_name.clone()),
            family_name: summary.family_name.or_else(|| detail.family_name.clone()),
            country: summary.country,
            political_group: summary.political_group,
            memberships: detail.memberships.clone(),
            mandate,
        });
    }

    Ok(members)
}

/// Resolve a member's mandate window within `term` from their membership
/// history.
///
/// Only entries for the term's organization with a full-member role count.
/// Start is the earliest start among them; end is the first entry's end.
/// Missing values fall back to the term boundaries, and the result is
/// clipped to the term. A member with no matching entry gets the whole term
/// and a warning is logged.
///
/// # Errors
///
/// Returns [`PipelineError::DataShape`] if a matching entry carries a date
/// that cannot be parsed.
pub fn resolve_mandate(
    identifier: &str,
    memberships: &[Membership],
    term: &TermWindow,
) -> Result<MandateWindow, PipelineError> {
    let matching: Vec<&Membership> = memberships
        .iter()
        .filter(|m| m.organization.as_deref() == Some(term.organization))
        .filter(|m| matches!(m.role.as_deref(), Some(ROLE_MEMBER | ROLE_MEMBER_EP)))
        .collect();

    if matching.is_empty() {
        tracing::warn!(
            identifier,
            organization = term.organization,
            "no matching membership, assuming the full term"
        );
        return Ok(MandateWindow {
            start: term.start,
            end: term.end,
        });
    }

    let mut start: Option<NaiveDate> = None;
    for membership in &matching {
        let raw = membership
            .member_during
            .as_ref()
            .and_then(|p| p.start_date.as_deref());
        if let Some(raw) = raw {
            let day = parse_date(identifier, "startDate", raw)?;
            start = Some(start.map_or(day, |s| s.min(day)));
        }
    }

    let end = match matching[0]
        .member_during
        .as_ref()
        .and_then(|p| p.end_date.as_deref())
    {
        Some(raw) => parse_date(identifier, "endDate", raw)?,
        None => term.end,
    };

    let (start, end) = term.clip(start.unwrap_or(term.start), end);
    Ok(MandateWindow { start, end })
}

fn parse_date(identifier: &str, field: &str, raw: &str) -> Result<NaiveDate, PipelineError> {
    parse_api_date(raw).ok_or_else(|| {
        PipelineError::DataShape(format!(
            "member {identifier}: unparseable memberDuring.{field} '{raw}'"
        ))
    })
}
