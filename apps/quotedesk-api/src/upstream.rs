//! Typed client for the ServiceNow REST API.
//!
//! One call in, one call out: the caller's access token is attached as
//! a bearer header, query parameters are shaped for the Table API, and
//! error statuses/messages come back verbatim for the gateway to
//! forward. No retries, no backoff.

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{Contract, Quote, SnErrorBody, SnResult};
use tracing::debug;

use crate::error::ApiError;

// Table API names, one per mirrored entity.
pub const TABLE_QUOTE: &str = "sn_quote_mgmt_core_quote";
pub const TABLE_QUOTE_LINE: &str = "sn_quote_mgmt_core_quote_line";
pub const TABLE_CONTRACT: &str = "ast_contract";
pub const TABLE_OPPORTUNITY: &str = "sn_opty_mgmt_core_opportunity";
pub const TABLE_PRODUCT_OFFERING: &str = "sn_prd_pm_product_offering";
pub const TABLE_CATEGORY: &str = "sn_prd_pm_category";
pub const TABLE_CATALOG: &str = "sn_prd_pm_catalog";
pub const TABLE_SPECIFICATION: &str = "sn_prd_pm_product_specification";

const IDEMPOTENCY_HEADER: &str = "X-Idempotency-Key";
const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// Rows plus the total the instance reports for the unpaged query.
pub struct PageOfRows<T> {
    pub rows: Vec<T>,
    pub total: Option<u64>,
}

pub struct SnClient {
    http: reqwest::Client,
    base_url: String,
}

impl SnClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/api/now/table/{}", self.base_url, table)
    }

    fn record_url(&self, table: &str, sys_id: &str) -> String {
        format!("{}/{}", self.table_url(table), sys_id)
    }

    /// Table API read: display values resolved, optional encoded query,
    /// row cap, optional offset for paging.
    pub async fn query<T: DeserializeOwned>(
        &self,
        token: &str,
        table: &str,
        query: Option<&str>,
        limit: u32,
        offset: Option<u32>,
    ) -> Result<PageOfRows<T>, ApiError> {
        let mut req = self
            .http
            .get(self.table_url(table))
            .bearer_auth(token)
            .query(&[
                ("sysparm_display_value", "true"),
                ("sysparm_limit", &limit.to_string()),
            ]);
        if let Some(q) = query {
            req = req.query(&[("sysparm_query", q)]);
        }
        if let Some(o) = offset {
            req = req.query(&[("sysparm_offset", &o.to_string())]);
        }

        debug!(table, query, limit, "table read");
        let resp = req.send().await.map_err(ApiError::Transport)?;
        let total = resp
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let rows = Self::decode::<Vec<T>>(resp).await?;
        Ok(PageOfRows { rows, total })
    }

    pub async fn get_record<T: DeserializeOwned>(
        &self,
        token: &str,
        table: &str,
        sys_id: &str,
    ) -> Result<T, ApiError> {
        let resp = self
            .http
            .get(self.record_url(table, sys_id))
            .bearer_auth(token)
            .query(&[("sysparm_display_value", "true")])
            .send()
            .await
            .map_err(ApiError::Transport)?;
        Self::decode(resp).await
    }

    pub async fn patch_record<T: DeserializeOwned, B: Serialize>(
        &self,
        token: &str,
        table: &str,
        sys_id: &str,
        body: &B,
        idempotency_key: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut req = self
            .http
            .patch(self.record_url(table, sys_id))
            .bearer_auth(token)
            .query(&[("sysparm_display_value", "true")])
            .json(body);
        if let Some(key) = idempotency_key {
            req = req.header(IDEMPOTENCY_HEADER, key);
        }
        let resp = req.send().await.map_err(ApiError::Transport)?;
        Self::decode(resp).await
    }

    pub async fn delete_record(
        &self,
        token: &str,
        table: &str,
        sys_id: &str,
        idempotency_key: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut req = self
            .http
            .delete(self.record_url(table, sys_id))
            .bearer_auth(token);
        if let Some(key) = idempotency_key {
            req = req.header(IDEMPOTENCY_HEADER, key);
        }
        let resp = req.send().await.map_err(ApiError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(upstream_error(status.as_u16(), &body));
        }
        Ok(())
    }

    /// Scripted endpoint: create a quote from an opportunity.
    pub async fn create_quote_from_opportunity(
        &self,
        token: &str,
        opportunity_id: &str,
    ) -> Result<Quote, ApiError> {
        let url = format!(
            "{}/api/x_qdesk/quote/from_opportunity/{}",
            self.base_url, opportunity_id
        );
        let resp = self
            .http
            .post(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        Self::decode(resp).await
    }

    /// Scripted endpoint: trigger contract generation for a quote.
    pub async fn generate_contract(
        &self,
        token: &str,
        quote_sys_id: &str,
        idempotency_key: Option<&str>,
    ) -> Result<Contract, ApiError> {
        let url = format!(
            "{}/api/x_qdesk/contract/generate/{}",
            self.base_url, quote_sys_id
        );
        let mut req = self.http.post(url).bearer_auth(token);
        if let Some(key) = idempotency_key {
            req = req.header(IDEMPOTENCY_HEADER, key);
        }
        let resp = req.send().await.map_err(ApiError::Transport)?;
        Self::decode(resp).await
    }

    /// Attachment API: the contract PDF plus the upstream
    /// `Content-Disposition` value when one was sent.
    pub async fn fetch_attachment(
        &self,
        token: &str,
        sys_id: &str,
    ) -> Result<(Vec<u8>, Option<String>), ApiError> {
        let url = format!("{}/api/now/attachment/{}/file", self.base_url, sys_id);
        let resp = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(upstream_error(status.as_u16(), &body));
        }

        let disposition = resp
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = resp
            .bytes()
            .await
            .map_err(ApiError::Transport)?
            .to_vec();
        Ok((bytes, disposition))
    }

    /// Unwrap the `{result}` envelope, forwarding error statuses.
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(upstream_error(status.as_u16(), &body));
        }
        let envelope: SnResult<T> = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("result envelope: {e}")))?;
        Ok(envelope.result)
    }
}

/// Upstream failure → forwarded error: structured `error.message` when
/// the body parses, generic message otherwise.
fn upstream_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<SnErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "internal server error".to_string());
    ApiError::Upstream { status, message }
}
