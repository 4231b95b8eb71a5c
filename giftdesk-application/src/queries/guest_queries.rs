use serde::Serialize;

use giftdesk_domain::{EventCheckin, EventId, GuestId, GuestView};

use crate::{AppError, AppState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestCheckinStatus {
    pub guest_id: GuestId,
    pub event_id: EventId,
    pub is_checked_into_event: bool,
    pub has_checked_in: bool,
    pub entries: Vec<EventCheckin>,
}

pub async fn get_guest(state: &AppState, guest_id: &GuestId) -> Result<GuestView, AppError> {
    state
        .guests
        .find_by_id(guest_id)
        .await
        .map_err(AppError::Internal)?
        .map(|guest| guest.view())
        .ok_or_else(|| AppError::NotFound(format!("guest '{}'", guest_id)))
}

pub async fn checkin_status(
    state: &AppState,
    guest_id: &GuestId,
    event_id: &EventId,
) -> Result<GuestCheckinStatus, AppError> {
    let guest = state
        .guests
        .find_by_id(guest_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("guest '{}'", guest_id)))?;
    Ok(GuestCheckinStatus {
        is_checked_into_event: guest.is_checked_into(event_id),
        has_checked_in: guest.has_checked_in(),
        entries: guest
            .event_checkins
            .into_iter()
            .filter(|entry| &entry.event_id == event_id)
            .collect(),
        guest_id: guest.id,
        event_id: event_id.clone(),
    })
}
