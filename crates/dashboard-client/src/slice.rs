//! Per-entity store state, mutated only by its own lifecycle methods.
//!
//! Mutations follow the pessimistic-refresh rule: fulfilled handlers
//! replace local copies with the server's canonical record instead of
//! patching them, so local state never drifts from server truth.

use shared_types::{Contract, Quote, QuotePage};

/// Store partition for the quote dashboard.
#[derive(Debug, Clone, Default)]
pub struct QuoteSlice {
    pub items: Vec<Quote>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
    /// The quote open in the detail view, if any.
    pub current: Option<Quote>,
    pub loading: bool,
    pub error: Option<String>,
}

impl QuoteSlice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn rejected(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn list_fulfilled(&mut self, page: QuotePage) {
        self.loading = false;
        self.error = None;
        self.items = page.data;
        self.page = page.page;
        self.total_pages = page.total_pages;
        self.total = page.total;
    }

    pub fn detail_fulfilled(&mut self, quote: Quote) {
        self.loading = false;
        self.error = None;
        self.current = Some(quote);
    }

    /// The one list mutation not followed by a re-fetch: the created
    /// record is prepended and the total bumped.
    pub fn created(&mut self, quote: Quote) {
        self.loading = false;
        self.error = None;
        self.items.insert(0, quote);
        self.total += 1;
    }

    /// Replace the list entry and, when it is the open detail record,
    /// the detail copy with the server's echoed canonical record.
    pub fn replaced(&mut self, quote: Quote) {
        self.loading = false;
        self.error = None;
        if let Some(entry) = self.items.iter_mut().find(|q| q.sys_id == quote.sys_id) {
            *entry = quote.clone();
        }
        if self
            .current
            .as_ref()
            .is_some_and(|c| c.sys_id == quote.sys_id)
        {
            self.current = Some(quote);
        }
    }

    /// Remove exactly one entry matching `id`; clear the detail view
    /// only if it held that same record.
    pub fn deleted(&mut self, id: &str) {
        self.loading = false;
        self.error = None;
        if let Some(pos) = self.items.iter().position(|q| q.sys_id == id) {
            self.items.remove(pos);
            self.total = self.total.saturating_sub(1);
        }
        if self.current.as_ref().is_some_and(|c| c.sys_id == id) {
            self.current = None;
        }
    }
}

/// Store partition for contract generation and download.
#[derive(Debug, Clone, Default)]
pub struct ContractSlice {
    /// The most recently generated contract's metadata.
    pub generated: Option<Contract>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ContractSlice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn rejected(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn generated_fulfilled(&mut self, contract: Contract) {
        self.loading = false;
        self.error = None;
        self.generated = Some(contract);
    }

    pub fn download_fulfilled(&mut self) {
        self.loading = false;
        self.error = None;
    }
}
