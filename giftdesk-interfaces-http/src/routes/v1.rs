use axum::Router;

use giftdesk_application::AppState;

use crate::handlers::{checkin_handlers, guest_handlers, inventory_handlers, ops_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/checkins",
            axum::routing::post(checkin_handlers::create_checkin),
        )
        .route(
            "/v1/checkins/batch",
            axum::routing::post(checkin_handlers::create_checkin_batch),
        )
        .route(
            "/v1/checkins/undo",
            axum::routing::post(checkin_handlers::undo_checkin),
        )
        .route(
            "/v1/checkins/:checkin_id",
            axum::routing::get(checkin_handlers::get_checkin)
                .delete(checkin_handlers::delete_checkin),
        )
        .route(
            "/v1/checkins/:checkin_id/gifts",
            axum::routing::put(checkin_handlers::update_checkin_gifts),
        )
        .route(
            "/v1/guests/:guest_id",
            axum::routing::get(guest_handlers::get_guest),
        )
        .route(
            "/v1/guests/:guest_id/checkins",
            axum::routing::get(guest_handlers::list_guest_checkins),
        )
        .route(
            "/v1/guests/:guest_id/events/:event_id/status",
            axum::routing::get(guest_handlers::get_guest_event_status),
        )
        .route(
            "/v1/inventory/:item_id",
            axum::routing::get(inventory_handlers::get_inventory_item),
        )
        .route(
            "/v1/inventory/:item_id/count",
            axum::routing::put(inventory_handlers::set_inventory_count),
        )
        .route(
            "/v1/inventory/:item_id/restock",
            axum::routing::post(inventory_handlers::restock_item),
        )
        .route(
            "/v1/inventory/:item_id/recompute",
            axum::routing::post(inventory_handlers::recompute_item),
        )
        .route(
            "/v1/inventory/:item_id/post-event-count",
            axum::routing::put(inventory_handlers::record_post_event_count),
        )
        .route(
            "/v1/events/:event_id/inventory",
            axum::routing::get(inventory_handlers::list_event_inventory),
        )
        .route(
            "/v1/events/:event_id/pool",
            axum::routing::get(inventory_handlers::get_event_pool),
        )
        .route(
            "/v1/events/:event_id/reconcile",
            axum::routing::post(inventory_handlers::reconcile_event_pool),
        )
        .route(
            "/v1/events/:event_id/live",
            axum::routing::get(ops_handlers::event_live_updates),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
