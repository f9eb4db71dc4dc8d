//! Read-only mirrors of the product-catalog and sales tables.
//!
//! No client-side mutation paths exist for any of these; each dashboard
//! section bulk-fetches a page and refines it in memory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::quote::sn_date;

/// Sales opportunity a quote can be created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub sys_id: String,
    pub number: String,
    #[serde(default)]
    pub name: String,
    /// Display name of the account reference.
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default, with = "sn_date")]
    pub close_date: Option<NaiveDate>,
}

/// Sellable product offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOffering {
    pub sys_id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub code: String,
    /// Offering lifecycle status (published/retired/archived) — a plain
    /// string, distinct from the quote state enumeration.
    #[serde(default)]
    pub status: String,
    /// Display value, e.g. "$99.00".
    #[serde(default)]
    pub list_price: String,
    /// Display name of the product specification reference.
    #[serde(default)]
    pub product_specification: String,
    #[serde(default)]
    pub category: String,
}

/// Catalog category grouping offerings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub sys_id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub status: String,
    /// Display name of the owning catalog.
    #[serde(default)]
    pub catalog: String,
}

/// Top-level product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub sys_id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub status: String,
}

/// Product specification an offering realizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    pub sys_id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub specification_type: String,
    #[serde(default)]
    pub status: String,
}
