//! Per-member attendance statistics.
//!
//! Person references in the event lists are matched exactly against the
//! member identifier. Both `person/124936` and a bare `124936` count as the
//! member `124936`; `person/1249360` does not.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::events::ShapedEvent;
use crate::members::Member;

/// One output row: a member and their attendance counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberStats {
    pub id: String,
    pub identifier: String,
    pub label: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub country: Option<String>,
    pub political_group: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub no_plenary_sessions_since_start: i64,
    pub times_excused: i64,
    pub times_attending: i64,
    /// Sessions minus excused minus attending. Negative when a member is
    /// listed as both excused and present for the same sittings.
    pub times_missing: i64,
}

/// Identifier a person reference points at: the last path segment.
#[must_use]
pub fn person_identifier(reference: &str) -> &str {
    let reference = reference.trim();
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Count occurrences of each person identifier across all lists.
fn tally<'a>(lists: impl Iterator<Item = &'a Vec<String>>) -> HashMap<&'a str, i64> {
    let mut counts = HashMap::new();
    for reference in lists.flatten() {
        *counts.entry(person_identifier(reference)).or_insert(0) += 1;
    }
    counts
}

/// Compute attendance statistics for every member against the shaped events.
#[must_use]
pub fn aggregate(members: &[Member], events: &[ShapedEvent]) -> Vec<MemberStats> {
    let sitting_days: BTreeSet<NaiveDate> = events.iter().map(|e| e.activity_date).collect();
    let excused = tally(events.iter().map(|e| &e.had_excused_person));
    let attending = tally(events.iter().map(|e| &e.had_participant_person));

    members
        .iter()
        .map(|member| {
            let window = member.mandate;
            let sessions = if window.start <= window.end {
                sitting_days.range(window.start..=window.end).count()
            } else {
                0
            };
            let sessions = i64::try_from(sessions).unwrap_or(i64::MAX);
            let times_excused = excused.get(member.identifier.as_str()).copied().unwrap_or(0);
            let times_attending = attending
                .get(member.identifier.as_str())
                .copied()
                .unwrap_or(0);

            MemberStats {
                id: member.id.clone(),
                identifier: member.identifier.clone(),
                label: member.label.clone(),
                given_name: member.given_name.clone(),
                family_name: member.family_name.clone(),
                country: member.country.clone(),
                political_group: member.political_group.clone(),
                start_date: window.start,
                end_date: window.end,
                no_plenary_sessions_since_start: sessions,
                times_excused,
                times_attending,
                times_missing: sessions - times_excused - times_attending,
            }
        })
        .collect()
}
