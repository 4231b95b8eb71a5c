use giftdesk_domain::InvalidTransition;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<InvalidTransition> for AppError {
    fn from(value: InvalidTransition) -> Self {
        AppError::Internal(value.into())
    }
}
