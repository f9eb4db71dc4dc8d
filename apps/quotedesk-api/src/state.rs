//! Application state for the QuoteDesk gateway.
//!
//! Stateless per request: shared state is the upstream client and the
//! startup configuration, both immutable after construction.

use anyhow::Result;

use crate::config::GatewayConfig;
use crate::upstream::SnClient;

pub struct AppState {
    pub upstream: SnClient,
    pub config: GatewayConfig,
}

impl AppState {
    pub fn from_env() -> Result<Self> {
        let config = GatewayConfig::from_env()?;
        tracing::info!("Forwarding to ServiceNow at {}", config.servicenow_url);
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: GatewayConfig) -> Self {
        Self {
            upstream: SnClient::new(&config.servicenow_url),
            config,
        }
    }
}
