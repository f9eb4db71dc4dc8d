//! Read-only catalog and opportunity mirrors.
//!
//! Each dashboard section asks for one bulk page and refines it in
//! memory, so these handlers are all the same shape: one table, one
//! optional row cap, display values resolved.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::de::DeserializeOwned;
use shared_types::{Catalog, Category, Envelope, Opportunity, ProductOffering, Specification};

use crate::auth::AccessToken;
use crate::error::ApiError;
use crate::models::BulkQuery;
use crate::state::AppState;
use crate::upstream::{
    TABLE_CATALOG, TABLE_CATEGORY, TABLE_OPPORTUNITY, TABLE_PRODUCT_OFFERING,
    TABLE_SPECIFICATION,
};

const BY_SPEC_LIMIT: u32 = 50;

/// Offerings realizing one product specification, capped at 50 rows.
pub async fn offerings_by_spec(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Path(spec_id): Path<String>,
) -> Result<Json<Envelope<Vec<ProductOffering>>>, ApiError> {
    let rows = state
        .upstream
        .query(
            token.as_str(),
            TABLE_PRODUCT_OFFERING,
            Some(&format!("product_specification={spec_id}")),
            BY_SPEC_LIMIT,
            None,
        )
        .await?
        .rows;
    Ok(Json(Envelope::ok(rows)))
}

pub async fn list_offerings(
    state: State<Arc<AppState>>,
    token: AccessToken,
    params: Query<BulkQuery>,
) -> Result<Json<Envelope<Vec<ProductOffering>>>, ApiError> {
    bulk(state, token, params, TABLE_PRODUCT_OFFERING).await
}

pub async fn list_categories(
    state: State<Arc<AppState>>,
    token: AccessToken,
    params: Query<BulkQuery>,
) -> Result<Json<Envelope<Vec<Category>>>, ApiError> {
    bulk(state, token, params, TABLE_CATEGORY).await
}

pub async fn list_catalogs(
    state: State<Arc<AppState>>,
    token: AccessToken,
    params: Query<BulkQuery>,
) -> Result<Json<Envelope<Vec<Catalog>>>, ApiError> {
    bulk(state, token, params, TABLE_CATALOG).await
}

pub async fn list_specifications(
    state: State<Arc<AppState>>,
    token: AccessToken,
    params: Query<BulkQuery>,
) -> Result<Json<Envelope<Vec<Specification>>>, ApiError> {
    bulk(state, token, params, TABLE_SPECIFICATION).await
}

pub async fn list_opportunities(
    state: State<Arc<AppState>>,
    token: AccessToken,
    params: Query<BulkQuery>,
) -> Result<Json<Envelope<Vec<Opportunity>>>, ApiError> {
    bulk(state, token, params, TABLE_OPPORTUNITY).await
}

async fn bulk<T: DeserializeOwned>(
    State(state): State<Arc<AppState>>,
    token: AccessToken,
    Query(params): Query<BulkQuery>,
    table: &str,
) -> Result<Json<Envelope<Vec<T>>>, ApiError> {
    let limit = params
        .limit
        .unwrap_or(state.config.bulk_limit)
        .clamp(1, state.config.bulk_limit);
    let rows = state
        .upstream
        .query(token.as_str(), table, None, limit, None)
        .await?
        .rows;
    Ok(Json(Envelope::ok(rows)))
}
