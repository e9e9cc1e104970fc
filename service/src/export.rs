//! CSV export of member statistics and shaped events.
//!
//! Files are truncated and rewritten on every run. Rows are written in the
//! order given, so identical inputs produce identical bytes.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::attendance::MemberStats;
use crate::error::ExportError;
use crate::events::ShapedEvent;

/// Columns of the member statistics file, in [`MemberStats`] field order.
pub const MEMBER_STATS_HEADER: [&str; 13] = [
    "id",
    "identifier",
    "label",
    "given_name",
    "family_name",
    "country",
    "political_group",
    "start_date",
    "end_date",
    "no_plenary_sessions_since_start",
    "times_excused",
    "times_attending",
    "times_missing",
];

/// Columns of the events file, in `EventRow` field order.
pub const EVENTS_HEADER: [&str; 8] = [
    "id",
    "type",
    "activity_id",
    "had_activity_type",
    "activity_date",
    "number_of_attendees",
    "had_excused_person",
    "had_participant_person",
];

/// Write member statistics, with a header row, to `writer`.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if encoding or the underlying write fails.
pub fn write_member_stats_to<W: Write>(writer: W, stats: &[MemberStats]) -> Result<(), ExportError> {
    let mut csv = headed_writer(writer, &MEMBER_STATS_HEADER)?;
    for row in stats {
        csv.serialize(row)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write shaped events, with a header row, to `writer`.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if encoding or the underlying write fails.
pub fn write_events_to<W: Write>(writer: W, events: &[ShapedEvent]) -> Result<(), ExportError> {
    let mut csv = headed_writer(writer, &EVENTS_HEADER)?;
    for event in events {
        csv.serialize(event.to_row())?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write member statistics to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_member_stats(path: &Path, stats: &[MemberStats]) -> Result<(), ExportError> {
    write_member_stats_to(create(path)?, stats)?;
    tracing::info!(path = %path.display(), rows = stats.len(), "wrote member statistics");
    Ok(())
}

/// Write shaped events to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_events(path: &Path, events: &[ShapedEvent]) -> Result<(), ExportError> {
    write_events_to(create(path)?, events)?;
    tracing::info!(path = %path.display(), rows = events.len(), "wrote plenary sittings");
    Ok(())
}

// The header is written up front so an empty table still names its columns.
fn headed_writer<W: Write>(writer: W, header: &[&str]) -> Result<csv::Writer<W>, ExportError> {
    let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(header)?;
    Ok(csv)
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}
