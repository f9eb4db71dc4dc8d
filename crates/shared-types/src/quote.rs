//! Quote lifecycle types mirrored from the ServiceNow quote tables.
//!
//! Everything here is a snapshot of upstream state: records are fetched
//! read-mostly, and the few mutations (state transition, patch, delete)
//! delegate to the instance and replace local copies with the server's
//! canonical record.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a quote.
///
/// Wire form is lowercase. Parsing is case-insensitive so display
/// renderings ("Draft", "Approved") round-trip, but an unknown string is
/// a decode error, never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QuoteState {
    Draft,
    Approved,
    Pending,
    Rejected,
    Expired,
}

impl QuoteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteState::Draft => "draft",
            QuoteState::Approved => "approved",
            QuoteState::Pending => "pending",
            QuoteState::Rejected => "rejected",
            QuoteState::Expired => "expired",
        }
    }

    /// Transitions the dashboard may request. ServiceNow remains the
    /// final enforcer; this table refuses obviously illegal requests
    /// before a call is made.
    pub fn can_transition_to(self, to: QuoteState) -> bool {
        matches!((self, to), (QuoteState::Draft, QuoteState::Approved))
    }

    /// Validated transition, for callers that want the error value.
    pub fn transition_to(self, to: QuoteState) -> Result<QuoteState, IllegalTransition> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(IllegalTransition { from: self, to })
        }
    }

    /// Once approved, a quote is terminal for state-change purposes; the
    /// dashboard offers contract actions instead.
    pub fn is_terminal(self) -> bool {
        !matches!(self, QuoteState::Draft)
    }
}

impl fmt::Display for QuoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(QuoteState::Draft),
            "approved" => Ok(QuoteState::Approved),
            "pending" => Ok(QuoteState::Pending),
            "rejected" => Ok(QuoteState::Rejected),
            "expired" => Ok(QuoteState::Expired),
            _ => Err(UnknownState(s.to_string())),
        }
    }
}

impl TryFrom<String> for QuoteState {
    type Error = UnknownState;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<QuoteState> for String {
    fn from(s: QuoteState) -> String {
        s.as_str().to_string()
    }
}

/// A state string the closed enumeration does not recognize.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown quote state: {0:?}")]
pub struct UnknownState(pub String);

/// A transition the dashboard is not allowed to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal quote state transition: {from} -> {to}")]
pub struct IllegalTransition {
    pub from: QuoteState,
    pub to: QuoteState,
}

/// Quote record, display values resolved.
///
/// `quote_lines` and `contracts` are filled by the gateway from their own
/// table reads; a bare table row deserializes with both empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub sys_id: String,
    /// Immutable business identifier, e.g. "QUO0001234".
    pub number: String,
    pub state: QuoteState,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub currency: String,
    /// Display name of the account reference.
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub quote_lines: Vec<QuoteLine>,
    #[serde(default, with = "sn_date")]
    pub subscription_start_date: Option<NaiveDate>,
    #[serde(default, with = "sn_date")]
    pub subscription_end_date: Option<NaiveDate>,
    #[serde(default, with = "sn_date")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub contracts: Vec<ContractRef>,
    /// Display value, e.g. "$4,500.00".
    #[serde(default)]
    pub total_amount: String,
}

/// Line item owned by its parent quote. Read-only in the dashboard.
///
/// Scalar fields keep their display-value string form; the refinement
/// engine parses currency-like strings when it needs to compare them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub sys_id: String,
    /// Display name of the product offering reference.
    pub product_offering: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit_price: String,
    #[serde(default)]
    pub term_month: String,
    #[serde(default)]
    pub state: String,
}

/// Reference a quote carries after contract generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractRef {
    pub sys_id: String,
    #[serde(default)]
    pub name: String,
}

/// Generated contract metadata. The PDF itself is fetched on demand and
/// never held here; a contract is immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub sys_id: String,
    #[serde(default)]
    pub name: String,
    /// Display value of the owning quote reference.
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub state: String,
}

/// ServiceNow date fields arrive as "YYYY-MM-DD" or "" for unset; map the
/// empty string to `None` in both directions.
pub mod sn_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => ser.serialize_str(&d.format(FORMAT).to_string()),
            None => ser.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(de)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
