use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use giftdesk_application::queries::guest_queries::GuestCheckinStatus;
use giftdesk_application::queries::{checkin_queries, guest_queries};
use giftdesk_application::AppState;
use giftdesk_domain::{CheckinRecord, EventId, GuestId, GuestView};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn get_guest(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guest_id): Path<String>,
) -> Result<Json<GuestView>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let guest = guest_queries::get_guest(&state, &GuestId::from(guest_id)).await?;
    Ok(Json(guest))
}

pub async fn list_guest_checkins(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guest_id): Path<String>,
) -> Result<Json<Vec<CheckinRecord>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let records = checkin_queries::list_guest_checkins(&state, &GuestId::from(guest_id)).await?;
    Ok(Json(records))
}

pub async fn get_guest_event_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((guest_id, event_id)): Path<(String, String)>,
) -> Result<Json<GuestCheckinStatus>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let status =
        guest_queries::checkin_status(&state, &GuestId::from(guest_id), &EventId::from(event_id))
            .await?;
    Ok(Json(status))
}
