//! Contract generation and download handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use shared_types::{Contract, Envelope};
use tracing::info;

use crate::auth::AccessToken;
use crate::error::ApiError;
use crate::handlers::idempotency_key;
use crate::state::AppState;

/// Trigger contract generation for a quote. The contract is immutable
/// once created; the dashboard re-fetches the quote to see the new
/// reference.
pub async fn generate_contract(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Path(quote_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Envelope<Contract>>, ApiError> {
    let contract = state
        .upstream
        .generate_contract(
            token.as_str(),
            &quote_id,
            idempotency_key(&headers).as_deref(),
        )
        .await?;
    info!(quote = %quote_id, contract = %contract.sys_id, "contract generated");
    Ok(Json(Envelope::ok(contract)))
}

/// Binary passthrough of the contract PDF. The upstream
/// `Content-Disposition` is forwarded when present; otherwise one is
/// synthesized from the contract id.
pub async fn download_contract(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Path(contract_id): Path<String>,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ApiError> {
    let (bytes, disposition) = state
        .upstream
        .fetch_attachment(token.as_str(), &contract_id)
        .await?;

    let disposition = disposition
        .unwrap_or_else(|| format!("attachment; filename=\"contract-{contract_id}.pdf\""));

    Ok((
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "application/pdf".to_string()),
            ("Content-Disposition".to_string(), disposition),
        ],
        bytes,
    ))
}
