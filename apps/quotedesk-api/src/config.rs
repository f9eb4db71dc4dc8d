//! Environment configuration for the gateway.

use anyhow::{Context, Result};

/// Settings read once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the ServiceNow instance, no trailing slash.
    pub servicenow_url: String,
    pub port: u16,
    /// Row cap for the bulk catalog/opportunity list endpoints.
    pub bulk_limit: u32,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        let servicenow_url = std::env::var("SERVICENOW_URL")
            .context("SERVICENOW_URL must be set (e.g. https://acme.service-now.com)")?
            .trim_end_matches('/')
            .to_string();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3002);

        let bulk_limit = std::env::var("QUOTEDESK_BULK_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1000);

        Ok(Self {
            servicenow_url,
            port,
            bulk_limit,
        })
    }

    /// Fixed configuration for tests; no environment involved.
    pub fn for_tests(servicenow_url: impl Into<String>) -> Self {
        Self {
            servicenow_url: servicenow_url.into().trim_end_matches('/').to_string(),
            port: 0,
            bulk_limit: 1000,
        }
    }
}
