//! Error types for the QuoteDesk gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared_types::{ErrorBody, IllegalTransition};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable bearer token on the inbound request. Rejected before
    /// any upstream call.
    #[error("authentication required")]
    MissingToken,

    /// Upstream answered with an error status; forwarded verbatim.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Upstream could not be reached at all.
    #[error("internal server error")]
    Transport(#[source] reqwest::Error),

    /// A 2xx upstream body that did not decode.
    #[error("internal server error")]
    Decode(String),

    #[error("unknown quote state: {0:?}")]
    InvalidState(String),

    #[error(transparent)]
    IllegalTransition(#[from] IllegalTransition),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Transport(_) | ApiError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidState(_)
            | ApiError::IllegalTransition(_)
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Transport(e) => tracing::error!("upstream unreachable: {}", e),
            ApiError::Decode(detail) => tracing::error!("upstream decode failure: {}", detail),
            _ => {}
        }
        let body = Json(ErrorBody::new(self.to_string()));
        (status, body).into_response()
    }
}
