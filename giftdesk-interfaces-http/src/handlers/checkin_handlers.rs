use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use giftdesk_application::commands::{checkin_commands, reconcile_commands};
use giftdesk_application::queries::checkin_queries;
use giftdesk_application::AppState;
use giftdesk_domain::{
    BatchCheckinOutcome, CheckinId, CheckinOutcome, CheckinRecord, CheckinRequest,
    MultiCheckinRequest, ReversalOutcome, UndoCheckinRequest, UpdateGiftsOutcome,
    UpdateGiftsRequest,
};

use crate::error::HttpError;
use crate::middleware::{authorize, authorized_actor};

#[derive(serde::Deserialize)]
pub struct ReasonQuery {
    pub reason: Option<String>,
}

/// A rejected check-in is a conflict, not a failure: the body still
/// carries the outcome.
pub async fn create_checkin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CheckinRequest>,
) -> Result<Response, HttpError> {
    let actor = authorized_actor(&state.config, &headers)?;
    let outcome = checkin_commands::check_in(&state, &actor, payload).await?;
    let status = match outcome {
        CheckinOutcome::Committed(_) => StatusCode::CREATED,
        CheckinOutcome::Rejected { .. } => StatusCode::CONFLICT,
    };
    Ok((status, Json(outcome)).into_response())
}

pub async fn create_checkin_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<MultiCheckinRequest>,
) -> Result<Json<BatchCheckinOutcome>, HttpError> {
    let actor = authorized_actor(&state.config, &headers)?;
    let outcome = checkin_commands::check_in_many(&state, &actor, payload).await?;
    Ok(Json(outcome))
}

pub async fn undo_checkin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UndoCheckinRequest>,
) -> Result<Json<ReversalOutcome>, HttpError> {
    let actor = authorized_actor(&state.config, &headers)?;
    let outcome = reconcile_commands::undo_checkin(&state, &actor, payload).await?;
    Ok(Json(outcome))
}

pub async fn update_checkin_gifts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(checkin_id): Path<String>,
    Json(payload): Json<UpdateGiftsRequest>,
) -> Result<Json<UpdateGiftsOutcome>, HttpError> {
    let actor = authorized_actor(&state.config, &headers)?;
    let outcome =
        reconcile_commands::update_checkin_gifts(&state, &actor, &CheckinId::from(checkin_id), payload)
            .await?;
    Ok(Json(outcome))
}

pub async fn delete_checkin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(checkin_id): Path<String>,
    Query(query): Query<ReasonQuery>,
) -> Result<Json<ReversalOutcome>, HttpError> {
    let actor = authorized_actor(&state.config, &headers)?;
    let outcome =
        reconcile_commands::delete_checkin(&state, &actor, &CheckinId::from(checkin_id), query.reason)
            .await?;
    Ok(Json(outcome))
}

pub async fn get_checkin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(checkin_id): Path<String>,
) -> Result<Json<CheckinRecord>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let record = checkin_queries::get_checkin(&state, &CheckinId::from(checkin_id)).await?;
    Ok(Json(record))
}
