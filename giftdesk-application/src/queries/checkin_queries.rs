use giftdesk_domain::{CheckinId, CheckinRecord, GuestId};

use crate::{AppError, AppState};

pub async fn get_checkin(state: &AppState, checkin_id: &CheckinId) -> Result<CheckinRecord, AppError> {
    state
        .checkins
        .find_by_id(checkin_id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("check-in '{}'", checkin_id)))
}

pub async fn list_guest_checkins(
    state: &AppState,
    guest_id: &GuestId,
) -> Result<Vec<CheckinRecord>, AppError> {
    let mut records = state
        .checkins
        .list_for_guest(guest_id)
        .await
        .map_err(AppError::Internal)?;
    records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(records)
}
