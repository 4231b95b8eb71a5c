use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tracing::{debug, info};

use giftdesk_application::AppState;
use giftdesk_domain::{EventId, LiveUpdate};

use crate::error::HttpError;
use crate::middleware::authorize_token;

#[derive(serde::Deserialize)]
pub struct LiveQuery {
    pub token: Option<String>,
}

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

const READY_PROBE_EVENT: &str = "__ready_probe__";

/// Ready once the event directory answers a lookup.
pub async fn health_ready(State(state): State<AppState>) -> StatusCode {
    match state.events.find_by_id(&EventId::from(READY_PROBE_EVENT)).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.metrics.render_prometheus();
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; version=0.0.4"),
        )],
        body,
    )
}

/// Dashboard feed for one event. Pool owners also hear their secondary
/// events.
pub async fn event_live_updates(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    Query(query): Query<LiveQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, HttpError> {
    if !authorize_token(&state.config, &headers, query.token.as_deref()) {
        return Err(HttpError::Unauthorized);
    }
    let event_id = EventId::from(event_id);
    let updates = state.live_updates.subscribe(&event_id).await;
    Ok(ws.on_upgrade(move |socket| stream_updates(socket, event_id, updates)))
}

async fn stream_updates(
    socket: WebSocket,
    event_id: EventId,
    mut updates: broadcast::Receiver<LiveUpdate>,
) {
    info!("live subscriber connected: event={}", event_id);
    let (mut sender, mut receiver) = socket.split();
    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(update) => {
                    let Ok(text) = serde_json::to_string(&update) else {
                        continue;
                    };
                    if sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                // a slow client only needs the next refresh signal
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!("live subscriber lagged: event={} skipped={}", event_id, skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
    info!("live subscriber disconnected: event={}", event_id);
}
