// Locating a check-in record's entry inside a guest's projection

use chrono::Duration;

use crate::entities::{CheckinRecord, EventCheckin};
use crate::utils::abs_gap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMatch {
    /// Entry carries the record id.
    Exact(usize),
    /// Legacy entry without a record id, matched by event and time window.
    Window(usize),
}

impl ProjectionMatch {
    pub fn index(&self) -> usize {
        match self {
            ProjectionMatch::Exact(index) | ProjectionMatch::Window(index) => *index,
        }
    }
}

/// Finds the projection entry for `record`. Entries linked to a different
/// record are never matched by time; among unlinked candidates of the same
/// event the one closest to the record's creation time wins.
pub fn locate_projection_entry(
    entries: &[EventCheckin],
    record: &CheckinRecord,
    tolerance: Duration,
) -> Option<ProjectionMatch> {
    if let Some(index) = entries
        .iter()
        .position(|entry| entry.checkin_id.as_ref() == Some(&record.id))
    {
        return Some(ProjectionMatch::Exact(index));
    }

    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.checkin_id.is_none() && entry.event_id == record.event_id)
        .map(|(index, entry)| (index, abs_gap(entry.checked_in_at, record.created_at)))
        .filter(|(_, gap)| *gap <= tolerance)
        .min_by_key(|(_, gap)| *gap)
        .map(|(index, _)| ProjectionMatch::Window(index))
}
