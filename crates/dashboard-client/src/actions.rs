//! Thunk layer: one async action per user interaction, each driving its
//! slice through pending → fulfilled | rejected.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use shared_types::QuoteState;
use tracing::warn;

use crate::client::GatewayClient;
use crate::error::ClientError;
use crate::slice::{ContractSlice, QuoteSlice};

/// Quote actions bound to their slice. The slice is owned here and
/// mutated exclusively by these methods (single writer).
pub struct QuoteActions {
    client: Arc<GatewayClient>,
    pub slice: QuoteSlice,
}

impl QuoteActions {
    pub fn new(client: Arc<GatewayClient>) -> Self {
        Self {
            client,
            slice: QuoteSlice::new(),
        }
    }

    pub async fn load_page(&mut self, page: u32, limit: u32, q: Option<&str>) {
        self.slice.pending();
        match self.client.list_quotes(page, limit, q).await {
            Ok(page) => self.slice.list_fulfilled(page),
            Err(e) => self.reject(e),
        }
    }

    pub async fn open(&mut self, id: &str) {
        self.slice.pending();
        match self.client.get_quote(id).await {
            Ok(quote) => self.slice.detail_fulfilled(quote),
            Err(e) => self.reject(e),
        }
    }

    pub async fn create_from_opportunity(&mut self, opportunity_id: &str) {
        self.slice.pending();
        match self.client.create_quote(opportunity_id).await {
            Ok(quote) => self.slice.created(quote),
            Err(e) => self.reject(e),
        }
    }

    /// The one-click draft → approved action. Any other pair is refused
    /// by the client before a request is made.
    pub async fn transition(&mut self, id: &str, from: QuoteState, to: QuoteState) {
        self.slice.pending();
        match self.client.update_quote_state(id, from, to).await {
            Ok(quote) => self.slice.replaced(quote),
            Err(e) => self.reject(e),
        }
    }

    pub async fn patch(&mut self, id: &str, fields: &serde_json::Value) {
        self.slice.pending();
        match self.client.update_quote(id, fields).await {
            Ok(quote) => self.slice.replaced(quote),
            Err(e) => self.reject(e),
        }
    }

    pub async fn remove(&mut self, id: &str) {
        self.slice.pending();
        match self.client.delete_quote(id).await {
            Ok(()) => self.slice.deleted(id),
            Err(e) => self.reject(e),
        }
    }

    fn reject(&mut self, error: ClientError) {
        warn!(error = %error, "quote action failed");
        self.slice.rejected(error.user_message());
    }
}

/// Contract actions bound to their slice.
pub struct ContractActions {
    client: Arc<GatewayClient>,
    pub slice: ContractSlice,
}

impl ContractActions {
    pub fn new(client: Arc<GatewayClient>) -> Self {
        Self {
            client,
            slice: ContractSlice::new(),
        }
    }

    /// Trigger generation. The caller re-fetches the quote list
    /// afterwards to observe the new contract reference.
    pub async fn generate(&mut self, quote_id: &str) {
        self.slice.pending();
        match self.client.generate_contract(quote_id).await {
            Ok(contract) => self.slice.generated_fulfilled(contract),
            Err(e) => self.reject(e),
        }
    }

    /// Fetch the PDF and save it under `dir`. Returns the saved path so
    /// the view can point at it.
    pub async fn download(
        &mut self,
        contract_id: &str,
        quote_number: &str,
        dir: &Path,
    ) -> Option<PathBuf> {
        self.slice.pending();
        let downloaded = match self.client.download_contract(contract_id, quote_number).await {
            Ok(d) => d,
            Err(e) => {
                self.reject(e);
                return None;
            }
        };
        match downloaded.save_to(dir).await {
            Ok(path) => {
                self.slice.download_fulfilled();
                Some(path)
            }
            Err(e) => {
                self.slice.rejected(format!("saving contract: {e}"));
                None
            }
        }
    }

    fn reject(&mut self, error: ClientError) {
        warn!(error = %error, "contract action failed");
        self.slice.rejected(error.user_message());
    }
}
