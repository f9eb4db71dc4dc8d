//! Request models for the QuoteDesk gateway.

use serde::Deserialize;

/// Query parameters on the paginated quote list.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Free-text narrowing on the quote number.
    pub q: Option<String>,
}

/// Query parameters on the bulk mirror endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkQuery {
    pub limit: Option<u32>,
}

/// Body of the state-transition request. `state` stays a raw string
/// here so an unknown value maps to the gateway's own 400 envelope
/// instead of a framework rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStateRequest {
    pub state: String,
    /// The state the dashboard believes the quote is in. When present,
    /// the transition table is checked before anything is forwarded.
    #[serde(default)]
    pub from: Option<String>,
}
