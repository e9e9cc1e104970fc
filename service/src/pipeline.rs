//! End-to-end attendance run: members, sittings, aggregation.

use chrono::NaiveDate;

use crate::attendance::{aggregate, MemberStats};
use crate::error::PipelineError;
use crate::europarl::EuroparlApiClient;
use crate::events::{fetch_events, ShapedEvent};
use crate::members::fetch_members;
use crate::term::TermWindow;

/// Output of one run.
#[derive(Debug, Clone)]
pub struct AttendanceReport {
    pub members: Vec<MemberStats>,
    pub events: Vec<ShapedEvent>,
}

/// Fetch everything needed for `term` and compute member statistics.
///
/// Requests are issued one at a time; `today` bounds which sittings count as
/// already held.
///
/// # Errors
///
/// The first API or data-shape failure aborts the run.
pub async fn run(
    client: &dyn EuroparlApiClient,
    term: &TermWindow,
    today: NaiveDate,
) -> Result<AttendanceReport, PipelineError> {
    tracing::info!(term_start = %term.start, term_end = %term.end, %today, "starting attendance run");

    let members = fetch_members(client, term).await?;
    let events = fetch_events(client, term, today).await?;
    let stats = aggregate(&members, &events);

    tracing::info!(
        members = stats.len(),
        sittings = events.len(),
        "attendance statistics computed"
    );
    Ok(AttendanceReport {
        members: stats,
        events,
    })
}
