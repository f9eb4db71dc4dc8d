//! Typed client for the QuoteDesk gateway: one method per user intent.

use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use shared_types::{
    Catalog, Category, Contract, Deleted, Envelope, Opportunity, ProductOffering, Quote,
    QuotePage, QuoteState, Specification,
};
use tracing::debug;

use crate::auth::TokenSource;
use crate::download::DownloadedContract;
use crate::error::{extract_message, ClientError};
use crate::guard::{InFlightGuard, Operation};

const IDEMPOTENCY_HEADER: &str = "X-Idempotency-Key";

/// Authenticated gateway client. Build one and hand it to every view;
/// credentials come from the injected [`TokenSource`], never from
/// ambient storage.
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    token_source: Arc<dyn TokenSource>,
    guard: InFlightGuard,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>, token_source: Arc<dyn TokenSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_source,
            guard: InFlightGuard::new(),
        }
    }

    pub fn guard(&self) -> &InFlightGuard {
        &self.guard
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn authed(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        match self.token_source.token().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    /// Parse a gateway response, mapping error statuses to
    /// [`ClientError::Server`] with the extracted message.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: extract_message(&body, status.as_u16()),
            });
        }
        resp.json::<R>()
            .await
            .map_err(|e| ClientError::Decode(format!("response body: {e}")))
    }

    /// Parse an enveloped response and unwrap its data payload.
    async fn parse_enveloped<R: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<R, ClientError> {
        Ok(Self::parse::<Envelope<R>>(resp).await?.data)
    }

    // ── Quotes ──────────────────────────────────────────────────────

    /// Paginated quote list; `q` narrows by quote number.
    pub async fn list_quotes(
        &self,
        page: u32,
        limit: u32,
        q: Option<&str>,
    ) -> Result<QuotePage, ClientError> {
        let mut query: Vec<(&str, String)> =
            vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(q) = q {
            query.push(("q", q.to_string()));
        }
        let req = self.http.get(self.url("/api/quote")).query(&query);
        let resp = self.authed(req).await?.send().await?;
        Self::parse(resp).await
    }

    pub async fn get_quote(&self, id: &str) -> Result<Quote, ClientError> {
        let req = self.http.get(self.url(&format!("/api/quote/{id}")));
        let resp = self.authed(req).await?.send().await?;
        Self::parse_enveloped(resp).await
    }

    /// Create a quote from an opportunity. Empty body; the gateway
    /// returns the created record.
    pub async fn create_quote(&self, opportunity_id: &str) -> Result<Quote, ClientError> {
        let req = self
            .http
            .post(self.url(&format!("/api/quote/{opportunity_id}")));
        let resp = self.authed(req).await?.send().await?;
        Self::parse_enveloped(resp).await
    }

    /// Request a state transition. The transition table is consulted
    /// locally first; an illegal pair never reaches the wire, and a
    /// second attempt while one is outstanding is refused.
    pub async fn update_quote_state(
        &self,
        id: &str,
        from: QuoteState,
        to: QuoteState,
    ) -> Result<Quote, ClientError> {
        from.transition_to(to)?;
        let ticket = self.guard.acquire(id, Operation::UpdateState)?;

        debug!(quote = id, %from, %to, "requesting state transition");
        let req = self
            .http
            .patch(self.url(&format!("/api/quote-state/{id}")))
            .header(IDEMPOTENCY_HEADER, ticket.idempotency_key().to_string())
            .json(&serde_json::json!({ "state": to, "from": from }));
        let resp = self.authed(req).await?.send().await?;
        Self::parse_enveloped(resp).await
    }

    /// Generic field patch; the gateway echoes the canonical record.
    pub async fn update_quote(
        &self,
        id: &str,
        patch: &serde_json::Value,
    ) -> Result<Quote, ClientError> {
        let ticket = self.guard.acquire(id, Operation::Update)?;
        let req = self
            .http
            .patch(self.url(&format!("/api/quote/{id}")))
            .header(IDEMPOTENCY_HEADER, ticket.idempotency_key().to_string())
            .json(patch);
        let resp = self.authed(req).await?.send().await?;
        Self::parse_enveloped(resp).await
    }

    pub async fn delete_quote(&self, id: &str) -> Result<(), ClientError> {
        let ticket = self.guard.acquire(id, Operation::Delete)?;
        let req = self
            .http
            .delete(self.url(&format!("/api/quote/{id}")))
            .header(IDEMPOTENCY_HEADER, ticket.idempotency_key().to_string());
        let resp = self.authed(req).await?.send().await?;
        let _: Deleted = Self::parse_enveloped(resp).await?;
        Ok(())
    }

    // ── Contracts ───────────────────────────────────────────────────

    /// Trigger contract generation for a quote. The caller re-fetches
    /// the quote afterwards to observe the new contract reference.
    pub async fn generate_contract(&self, quote_id: &str) -> Result<Contract, ClientError> {
        let ticket = self.guard.acquire(quote_id, Operation::GenerateContract)?;
        let req = self
            .http
            .post(self.url(&format!("/api/contract/{quote_id}")))
            .header(IDEMPOTENCY_HEADER, ticket.idempotency_key().to_string());
        let resp = self.authed(req).await?.send().await?;
        Self::parse_enveloped(resp).await
    }

    /// Fetch a contract PDF. The upstream `Content-Disposition`
    /// filename wins; otherwise one is derived from the quote number
    /// and the current UTC time.
    pub async fn download_contract(
        &self,
        contract_id: &str,
        quote_number: &str,
    ) -> Result<DownloadedContract, ClientError> {
        let req = self
            .http
            .get(self.url(&format!("/api/download-contract/{contract_id}")));
        let resp = self.authed(req).await?.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: extract_message(&body, status.as_u16()),
            });
        }

        let disposition = resp
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = resp.bytes().await?.to_vec();
        Ok(DownloadedContract::named(
            bytes,
            disposition.as_deref(),
            quote_number,
            Utc::now(),
        ))
    }

    // ── Read-only mirrors ───────────────────────────────────────────

    pub async fn list_opportunities(&self, limit: u32) -> Result<Vec<Opportunity>, ClientError> {
        self.list_mirror("/api/opportunities", limit).await
    }

    pub async fn list_product_offerings(
        &self,
        limit: u32,
    ) -> Result<Vec<ProductOffering>, ClientError> {
        self.list_mirror("/api/product-offerings", limit).await
    }

    /// Offerings realizing one product specification.
    pub async fn offerings_by_spec(
        &self,
        spec_id: &str,
    ) -> Result<Vec<ProductOffering>, ClientError> {
        let req = self
            .http
            .get(self.url(&format!("/api/product-offerings/by-spec/{spec_id}")));
        let resp = self.authed(req).await?.send().await?;
        Self::parse_enveloped(resp).await
    }

    pub async fn list_categories(&self, limit: u32) -> Result<Vec<Category>, ClientError> {
        self.list_mirror("/api/categories", limit).await
    }

    pub async fn list_catalogs(&self, limit: u32) -> Result<Vec<Catalog>, ClientError> {
        self.list_mirror("/api/catalogs", limit).await
    }

    pub async fn list_specifications(
        &self,
        limit: u32,
    ) -> Result<Vec<Specification>, ClientError> {
        self.list_mirror("/api/specifications", limit).await
    }

    async fn list_mirror<R: DeserializeOwned>(
        &self,
        path: &str,
        limit: u32,
    ) -> Result<R, ClientError> {
        let req = self
            .http
            .get(self.url(path))
            .query(&[("limit", limit.to_string())]);
        let resp = self.authed(req).await?.send().await?;
        Self::parse_enveloped(resp).await
    }
}
