//! Quote lifecycle handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde_json::json;
use shared_types::{
    ContractRef, Deleted, Envelope, Quote, QuoteLine, QuotePage, QuoteState,
};
use tracing::info;

use crate::auth::AccessToken;
use crate::error::ApiError;
use crate::handlers::idempotency_key;
use crate::models::{ListQuery, UpdateStateRequest};
use crate::state::AppState;
use crate::upstream::{TABLE_CONTRACT, TABLE_QUOTE, TABLE_QUOTE_LINE};

const QUOTE_LINE_LIMIT: u32 = 100;
const CONTRACT_REF_LIMIT: u32 = 25;

/// Paginated quote list. Free-text `q` narrows by quote number.
pub async fn list_quotes(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Query(params): Query<ListQuery>,
) -> Result<Json<QuotePage>, ApiError> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .unwrap_or(10)
        .clamp(1, state.config.bulk_limit);
    let query = params
        .q
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(|q| format!("numberLIKE{q}"));
    let offset = (page - 1) * limit;

    let fetched = state
        .upstream
        .query::<Quote>(
            token.as_str(),
            TABLE_QUOTE,
            query.as_deref(),
            limit,
            Some(offset),
        )
        .await?;

    // Without a total header the instance leaves us knowing only what
    // we fetched; report that rather than guessing.
    let (total, total_pages) = match fetched.total {
        Some(total) => (total, total.div_ceil(limit as u64) as u32),
        None => (offset as u64 + fetched.rows.len() as u64, page),
    };

    Ok(Json(QuotePage {
        data: fetched.rows,
        page,
        total_pages,
        total,
    }))
}

/// Single quote with its lines and contract references joined in.
pub async fn get_quote(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Quote>>, ApiError> {
    let mut quote: Quote = state
        .upstream
        .get_record(token.as_str(), TABLE_QUOTE, &id)
        .await?;

    quote.quote_lines = state
        .upstream
        .query::<QuoteLine>(
            token.as_str(),
            TABLE_QUOTE_LINE,
            Some(&format!("quote={id}")),
            QUOTE_LINE_LIMIT,
            None,
        )
        .await?
        .rows;

    quote.contracts = state
        .upstream
        .query::<ContractRef>(
            token.as_str(),
            TABLE_CONTRACT,
            Some(&format!("quote={id}")),
            CONTRACT_REF_LIMIT,
            None,
        )
        .await?
        .rows;

    Ok(Json(Envelope::ok(quote)))
}

/// Create a quote from an opportunity. Empty request body; ServiceNow
/// owns numbering and defaults.
pub async fn create_quote(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Path(opportunity_id): Path<String>,
) -> Result<Json<Envelope<Quote>>, ApiError> {
    let quote = state
        .upstream
        .create_quote_from_opportunity(token.as_str(), &opportunity_id)
        .await?;
    info!(quote = %quote.number, opportunity = %opportunity_id, "quote created");
    Ok(Json(Envelope::ok(quote)))
}

/// State transition. The state string must parse into the closed
/// enumeration, and when the dashboard supplies the current state the
/// transition table is checked before anything is forwarded.
pub async fn update_quote_state(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdateStateRequest>,
) -> Result<Json<Envelope<Quote>>, ApiError> {
    let to: QuoteState = req
        .state
        .parse()
        .map_err(|_| ApiError::InvalidState(req.state.clone()))?;
    if let Some(from_raw) = &req.from {
        let from: QuoteState = from_raw
            .parse()
            .map_err(|_| ApiError::InvalidState(from_raw.clone()))?;
        from.transition_to(to)?;
    }

    let updated: Quote = state
        .upstream
        .patch_record(
            token.as_str(),
            TABLE_QUOTE,
            &id,
            &json!({ "state": to }),
            idempotency_key(&headers).as_deref(),
        )
        .await?;
    info!(quote = %id, state = %to, "quote state updated");
    Ok(Json(Envelope::ok(updated)))
}

/// Generic field patch; the canonical record comes back.
pub async fn update_quote(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(fields): Json<serde_json::Value>,
) -> Result<Json<Envelope<Quote>>, ApiError> {
    let updated: Quote = state
        .upstream
        .patch_record(
            token.as_str(),
            TABLE_QUOTE,
            &id,
            &fields,
            idempotency_key(&headers).as_deref(),
        )
        .await?;
    Ok(Json(Envelope::ok(updated)))
}

pub async fn delete_quote(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Envelope<Deleted>>, ApiError> {
    state
        .upstream
        .delete_record(
            token.as_str(),
            TABLE_QUOTE,
            &id,
            idempotency_key(&headers).as_deref(),
        )
        .await?;
    info!(quote = %id, "quote deleted");
    Ok(Json(Envelope::ok(Deleted { deleted: id })))
}
