pub mod catalog;
pub mod envelope;
pub mod quote;

pub use catalog::{Catalog, Category, Opportunity, ProductOffering, Specification};
pub use envelope::{Deleted, Envelope, ErrorBody, QuotePage, SnErrorBody, SnResult};
pub use quote::{Contract, ContractRef, IllegalTransition, Quote, QuoteLine, QuoteState};
