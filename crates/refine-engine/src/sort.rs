//! Single-key, single-direction sort with a three-way comparator.

use std::cmp::Ordering;

use crate::{FieldValue, Refinable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// How the key's values compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKind {
    /// Lowercase string comparison.
    #[default]
    Lowercase,
    /// Numeric comparison for currency-like display strings
    /// ("$1,500.00" sorts after "$99.00").
    Currency,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub field: String,
    pub kind: SortKind,
    pub direction: Direction,
}

impl SortKey {
    pub fn lowercase(field: &str, direction: Direction) -> Self {
        Self {
            field: field.to_string(),
            kind: SortKind::Lowercase,
            direction,
        }
    }

    pub fn currency(field: &str, direction: Direction) -> Self {
        Self {
            field: field.to_string(),
            kind: SortKind::Currency,
            direction,
        }
    }
}

/// Strip currency symbols and grouping from a display value. Returns
/// `None` when the remainder is not a number.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>, kind: SortKind) -> Ordering {
    match (a, b) {
        (FieldValue::Text(ta), FieldValue::Text(tb)) => match kind {
            SortKind::Lowercase => ta.to_lowercase().cmp(&tb.to_lowercase()),
            SortKind::Currency => {
                match (parse_currency(ta), parse_currency(tb)) {
                    (Some(na), Some(nb)) => na.partial_cmp(&nb).unwrap_or(Ordering::Equal),
                    // Unparseable values fall back to string order.
                    _ => ta.to_lowercase().cmp(&tb.to_lowercase()),
                }
            }
        },
        (FieldValue::Date(da), FieldValue::Date(db)) => da.cmp(&db),
        // Mixed kinds should not happen for one key; keep them stable.
        _ => Ordering::Equal,
    }
}

pub fn sort_records<R: Refinable>(records: &mut [&R], key: &SortKey) {
    records.sort_by(|a, b| {
        // Records missing the key sort last regardless of direction.
        match (a.field(&key.field), b.field(&key.field)) {
            (Some(va), Some(vb)) => {
                let ord = compare_values(va, vb, key.kind);
                match key.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
