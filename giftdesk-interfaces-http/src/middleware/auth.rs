use axum::http::HeaderMap;

use giftdesk_domain::{Actor, ActorRole, RuntimeConfig};

use crate::error::HttpError;

pub const ACTOR_ID_HEADER: &str = "X-Actor-Id";
pub const ACTOR_ROLE_HEADER: &str = "X-Actor-Role";

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

/// Browsers cannot set headers on a websocket upgrade, so the token may
/// also arrive as a query parameter.
pub fn authorize_token(config: &RuntimeConfig, headers: &HeaderMap, token: Option<&str>) -> bool {
    match (&config.api_token, token) {
        (Some(api_token), Some(token)) if token.trim() == api_token => true,
        _ => authorize(config, headers),
    }
}

/// Token check plus the caller's identity. The identity itself is trusted.
pub fn authorized_actor(config: &RuntimeConfig, headers: &HeaderMap) -> Result<Actor, HttpError> {
    if !authorize(config, headers) {
        return Err(HttpError::Unauthorized);
    }
    actor_from_headers(headers)
}

pub fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, HttpError> {
    let id = header_text(headers, ACTOR_ID_HEADER)
        .ok_or_else(|| HttpError::BadRequest(format!("{} header is required", ACTOR_ID_HEADER)))?;
    let role = header_text(headers, ACTOR_ROLE_HEADER)
        .map(|role| ActorRole::from(role.as_str()))
        .unwrap_or_default();
    Ok(Actor {
        id: id.into(),
        role,
    })
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(name)?.to_str().ok()?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
