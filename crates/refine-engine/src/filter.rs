//! Filter predicates. Composition is always conjunctive: a record
//! survives only if every active filter matches it.

use chrono::NaiveDate;

use crate::{FieldValue, Refinable};

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Case-insensitive substring match over a text field. An empty
    /// needle is a cleared filter and matches everything.
    Text { field: String, needle: String },
    /// Exact equality over an enumerated field (status, currency, type).
    Eq { field: String, value: String },
    /// Inclusive date range. Either bound may be open.
    DateRange {
        field: String,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl Filter {
    pub fn text(field: &str, needle: &str) -> Self {
        Filter::Text {
            field: field.to_string(),
            needle: needle.to_string(),
        }
    }

    pub fn eq(field: &str, value: &str) -> Self {
        Filter::Eq {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn date_range(field: &str, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Filter::DateRange {
            field: field.to_string(),
            from,
            to,
        }
    }

    pub fn matches<R: Refinable>(&self, record: &R) -> bool {
        match self {
            Filter::Text { field, needle } => {
                if needle.is_empty() {
                    return true;
                }
                match record.field(field) {
                    Some(FieldValue::Text(text)) => text
                        .to_lowercase()
                        .contains(&needle.to_lowercase()),
                    _ => false,
                }
            }
            Filter::Eq { field, value } => match record.field(field) {
                Some(FieldValue::Text(text)) => text == value,
                _ => false,
            },
            Filter::DateRange { field, from, to } => match record.field(field) {
                Some(FieldValue::Date(date)) => {
                    from.map_or(true, |f| date >= f) && to.map_or(true, |t| date <= t)
                }
                _ => false,
            },
        }
    }
}

/// Conjunctive application: the empty filter list keeps every record.
pub fn apply_filters<'a, R: Refinable>(records: &'a [R], filters: &[Filter]) -> Vec<&'a R> {
    records
        .iter()
        .filter(|r| filters.iter().all(|f| f.matches(*r)))
        .collect()
}
