//! Data layer for the QuoteDesk dashboard.
//!
//! One [`GatewayClient`] instance is injected into every caller
//! (capability-scoped credentials via [`TokenSource`]); per-entity
//! slices track data/loading/error state, and mutations for one entity
//! are fenced by an in-flight guard carrying an idempotency key.

pub mod actions;
pub mod auth;
pub mod client;
pub mod download;
pub mod error;
pub mod guard;
pub mod slice;

pub use actions::{ContractActions, QuoteActions};
pub use auth::{NoAuth, StaticToken, TokenSource};
pub use client::GatewayClient;
pub use download::DownloadedContract;
pub use error::ClientError;
pub use guard::{InFlightGuard, MutationTicket, Operation};
pub use slice::{ContractSlice, QuoteSlice};
