use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use giftdesk_application::commands::inventory_commands;
use giftdesk_application::queries::inventory_queries::{self, PoolOverview};
use giftdesk_application::AppState;
use giftdesk_domain::{
    EventId, InventoryAdjustmentRequest, InventoryId, InventoryItem, PostEventCountOutcome,
    RecomputeOutcome,
};

use crate::error::HttpError;
use crate::middleware::{authorize, authorized_actor};

#[derive(serde::Deserialize)]
pub struct RestockBody {
    pub delta: i64,
    pub reason: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct PostEventCountBody {
    pub count: i64,
}

pub async fn get_inventory_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<String>,
) -> Result<Json<InventoryItem>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let item = inventory_queries::get_item(&state, &InventoryId::from(item_id)).await?;
    Ok(Json(item))
}

pub async fn set_inventory_count(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<String>,
    Json(payload): Json<InventoryAdjustmentRequest>,
) -> Result<Json<InventoryItem>, HttpError> {
    let actor = authorized_actor(&state.config, &headers)?;
    let item = inventory_commands::set_inventory_count(
        &state,
        &actor,
        &InventoryId::from(item_id),
        payload.count,
        payload.reason,
    )
    .await?;
    Ok(Json(item))
}

pub async fn restock_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<String>,
    Json(payload): Json<RestockBody>,
) -> Result<Json<InventoryItem>, HttpError> {
    let actor = authorized_actor(&state.config, &headers)?;
    let item = inventory_commands::restock_item(
        &state,
        &actor,
        &InventoryId::from(item_id),
        payload.delta,
        payload.reason,
    )
    .await?;
    Ok(Json(item))
}

pub async fn recompute_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<String>,
) -> Result<Json<RecomputeOutcome>, HttpError> {
    let actor = authorized_actor(&state.config, &headers)?;
    let outcome = inventory_commands::recompute_item(&state, &actor, &InventoryId::from(item_id)).await?;
    Ok(Json(outcome))
}

pub async fn record_post_event_count(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(item_id): Path<String>,
    Json(payload): Json<PostEventCountBody>,
) -> Result<Json<PostEventCountOutcome>, HttpError> {
    let actor = authorized_actor(&state.config, &headers)?;
    let outcome = inventory_commands::record_post_event_count(
        &state,
        &actor,
        &InventoryId::from(item_id),
        payload.count,
    )
    .await?;
    Ok(Json(outcome))
}

pub async fn list_event_inventory(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<InventoryItem>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let items = inventory_queries::list_drawable_items(&state, &EventId::from(event_id)).await?;
    Ok(Json(items))
}

pub async fn get_event_pool(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<Json<PoolOverview>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let overview = inventory_queries::pool_overview(&state, &EventId::from(event_id)).await?;
    Ok(Json(overview))
}

pub async fn reconcile_event_pool(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<RecomputeOutcome>>, HttpError> {
    let actor = authorized_actor(&state.config, &headers)?;
    let corrected =
        inventory_commands::reconcile_event_pool(&state, &actor, &EventId::from(event_id)).await?;
    Ok(Json(corrected))
}
