//! Client-side error type and message extraction.

use shared_types::{ErrorBody, IllegalTransition};

use crate::guard::Operation;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The gateway (or upstream through it) answered with an error
    /// status. `message` already went through [`extract_message`].
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    /// Refused locally, before any request was made.
    #[error(transparent)]
    Transition(#[from] IllegalTransition),

    /// A mutation for this entity is still outstanding.
    #[error("{operation} already in flight for {entity_id}")]
    AlreadyInFlight {
        entity_id: String,
        operation: Operation,
    },
}

impl ClientError {
    /// Text the view renders in its error panel or toast.
    ///
    /// Extraction priority: structured envelope message, then raw body,
    /// then the transport error's own message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Pull the most specific message out of a failure body.
pub(crate) fn extract_message(body: &str, status: u16) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorBody>(body) {
        if !envelope.message.is_empty() {
            return envelope.message;
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    format!("request failed with status {status}")
}
