//! In-memory refinement over an already-fetched record set.
//!
//! Dashboard list views ask the gateway for one bulk page and do all
//! further narrowing locally: conjunctive filters, a single-key sort,
//! and fixed-page-size pagination, in that order.

pub mod filter;
pub mod page;
pub mod sort;

use chrono::NaiveDate;

pub use filter::Filter;
pub use page::paginate;
pub use sort::{Direction, SortKey, SortKind};

/// A field value a filter or sort key can look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Date(NaiveDate),
}

/// A record the engine can refine. Each view implements this once per
/// entity, mapping its column keys to field values. Unknown keys return
/// `None`.
pub trait Refinable {
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;
}

/// The composed pipeline a list view runs on every render:
/// filters, then sort, then page.
#[derive(Debug, Clone, Default)]
pub struct Refinement {
    pub filters: Vec<Filter>,
    pub sort: Option<SortKey>,
    pub page: usize,
    pub page_size: usize,
}

impl Refinement {
    pub fn new(page_size: usize) -> Self {
        Self {
            filters: Vec::new(),
            sort: None,
            page: 1,
            page_size,
        }
    }

    pub fn apply<'a, R: Refinable>(&self, records: &'a [R]) -> Vec<&'a R> {
        let mut kept = filter::apply_filters(records, &self.filters);
        if let Some(key) = &self.sort {
            sort::sort_records(&mut kept, key);
        }
        paginate(&kept, self.page, self.page_size).to_vec()
    }

    /// Rows surviving the filters, before pagination. Views use this for
    /// the "N results" counter and to compute the page count.
    pub fn matching_count<R: Refinable>(&self, records: &[R]) -> usize {
        filter::apply_filters(records, &self.filters).len()
    }
}


#[cfg(test)]
mod tests {
    use super::testutil::Row;
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<Row> {
        vec![
            Row::new("Fiber 500", "published", "$99.00"),
            Row::new("Fiber 1000", "published", "$149.00"),
            Row::new("Copper 50", "retired", "$19.00"),
            Row::new("Wireless 200", "archived", "$49.00"),
        ]
    }

    #[test]
    fn full_pipeline_filters_sorts_and_pages() {
        let data = rows();
        let mut refinement = Refinement::new(1);
        refinement.filters.push(Filter::text("name", "fiber"));
        refinement.sort = Some(SortKey {
            field: "amount".to_string(),
            kind: SortKind::Currency,
            direction: Direction::Descending,
        });
        refinement.page = 1;

        let page = refinement.apply(&data);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Fiber 1000");

        refinement.page = 2;
        let page = refinement.apply(&data);
        assert_eq!(page[0].name, "Fiber 500");
    }

    #[test]
    fn no_filters_no_sort_is_identity_up_to_paging() {
        let data = rows();
        let refinement = Refinement::new(100);
        let out = refinement.apply(&data);
        assert_eq!(out.len(), data.len());
        assert!(out.iter().zip(&data).all(|(a, b)| *a == b));
    }
}
