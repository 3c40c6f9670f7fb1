//! # Query Engine
//!
//! [`query`] selects and orders content records:
//!
//! 1. Compile the descriptor once (see [`crate::filter::compile`]).
//! 2. Keep the records the predicate accepts, in their original order.
//! 3. If a sort key is present, stable-sort the survivors by it.
//! 4. Return borrowed records; inputs are never mutated.
//!
//! ## Diagnostics
//!
//! Some problems degrade the result instead of failing it. They come back as
//! [`QueryDiagnostic`]s next to the records:
//!
//! - An unknown sort key leaves the filtered records in input order.
//! - Metadata ids in the descriptor that the catalog does not know are still
//!   applied (they usually match nothing) and reported.
//!
//! Only a malformed descriptor fails the query, before any record is evaluated.

mod page;

pub use page::{paginate, Page, PageRequest};

use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument, warn};

use crate::catalog::MetadataCatalog;
use crate::error::Result;
use crate::filter::{compile, FilterDescriptor, SortSpec};
use crate::model::{ContentId, ContentRecord, MetadataId};

/// A non-fatal condition raised while answering a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryDiagnostic {
    /// The sort string named no known key; input order was kept.
    UnknownSortKey { key: String },
    /// The metadata criterion references ids missing from the catalog.
    UnknownMetadataIds { ids: Vec<MetadataId> },
}

impl fmt::Display for QueryDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryDiagnostic::UnknownSortKey { key } => {
                write!(f, "unknown sort key '{}', results are unsorted", key)
            }
            QueryDiagnostic::UnknownMetadataIds { ids } => {
                write!(f, "unknown metadata ids in filter: {:?}", ids)
            }
        }
    }
}

/// Records selected by a query, in result order, plus any diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutcome<'a> {
    pub records: Vec<&'a ContentRecord>,
    pub diagnostics: Vec<QueryDiagnostic>,
}

impl<'a> QueryOutcome<'a> {
    pub fn ids(&self) -> Vec<ContentId> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_owned(self) -> Vec<ContentRecord> {
        self.records.into_iter().cloned().collect()
    }
}

#[instrument(skip_all, fields(records = records.len()))]
pub fn query<'a>(
    records: &'a [ContentRecord],
    catalog: &MetadataCatalog,
    descriptor: &FilterDescriptor,
) -> Result<QueryOutcome<'a>> {
    let predicate = compile(descriptor)?;
    let mut diagnostics = Vec::new();

    if let Some(ids) = &descriptor.metadata {
        let (_, missing) = catalog.resolve_partitioned(ids);
        if !missing.is_empty() {
            warn!(?missing, "metadata filter references unknown ids");
            diagnostics.push(QueryDiagnostic::UnknownMetadataIds { ids: missing });
        }
    }

    let mut selected: Vec<&ContentRecord> = if predicate.is_trivial() {
        records.iter().collect()
    } else {
        records.iter().filter(|r| predicate.matches(r)).collect()
    };

    if let Some(raw) = descriptor.sort.as_deref() {
        match SortSpec::parse(raw) {
            Ok(Some(spec)) => spec.sort(&mut selected),
            Ok(None) => {}
            Err(unknown) => {
                warn!(key = %unknown.0, "unknown sort key, keeping input order");
                diagnostics.push(QueryDiagnostic::UnknownSortKey { key: unknown.0 });
            }
        }
    }

    debug!(
        matched = selected.len(),
        diagnostics = diagnostics.len(),
        "query complete"
    );
    Ok(QueryOutcome {
        records: selected,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;
    use crate::filter::YearBounds;
    use crate::test_utils::{sample_catalog, LibraryFixture};

    #[test]
    fn test_empty_descriptor_is_identity() {
        let fixture = LibraryFixture::scenario();
        let outcome = query(&fixture.records, &fixture.catalog, &FilterDescriptor::new()).unwrap();
        assert_eq!(outcome.ids(), vec![1, 2]);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_filter_then_sort() {
        let fixture = LibraryFixture::new()
            .with_record("Gamma", "1999", true, &[1])
            .with_record("alpha", "2003", true, &[1, 2])
            .with_record("Beta", "2001", false, &[1])
            .with_record("Delta", "", true, &[1]);

        let descriptor = FilterDescriptor::new()
            .with_active(true)
            .with_metadata(vec![1])
            .with_sort("title");
        let outcome = query(&fixture.records, &fixture.catalog, &descriptor).unwrap();
        let titles: Vec<_> = outcome.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "Delta", "Gamma"]);
    }

    #[test]
    fn test_unknown_sort_key_keeps_order_and_reports() {
        let fixture = LibraryFixture::scenario();
        let descriptor = FilterDescriptor::new().with_sort("-rating");
        let outcome = query(&fixture.records, &fixture.catalog, &descriptor).unwrap();

        assert_eq!(outcome.ids(), vec![1, 2]);
        assert_eq!(
            outcome.diagnostics,
            vec![QueryDiagnostic::UnknownSortKey {
                key: "-rating".into()
            }]
        );
    }

    #[test]
    fn test_blank_sort_key_is_ignored() {
        let fixture = LibraryFixture::scenario();
        let outcome = query(
            &fixture.records,
            &fixture.catalog,
            &FilterDescriptor::new().with_sort(""),
        )
        .unwrap();
        assert_eq!(outcome.ids(), vec![1, 2]);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_metadata_ids_reported() {
        let fixture = LibraryFixture::scenario();
        let descriptor = FilterDescriptor::new().with_metadata(vec![1, 404]);
        let outcome = query(&fixture.records, &fixture.catalog, &descriptor).unwrap();

        assert!(outcome.is_empty());
        assert_eq!(
            outcome.diagnostics,
            vec![QueryDiagnostic::UnknownMetadataIds { ids: vec![404] }]
        );
    }

    #[test]
    fn test_malformed_years_fail_before_evaluation() {
        let fixture = LibraryFixture::scenario();
        let mut descriptor = FilterDescriptor::new().with_sort("bogus");
        descriptor.years = Some(YearBounds {
            lo: None,
            hi: Some(2005),
        });
        let err = query(&fixture.records, &fixture.catalog, &descriptor).unwrap_err();
        assert!(matches!(err, ContentError::InvalidFilterDescriptor(_)));
    }

    #[test]
    fn test_into_owned_clones_records() {
        let fixture = LibraryFixture::scenario();
        let owned = query(
            &fixture.records,
            &sample_catalog(),
            &FilterDescriptor::new().with_title("beta"),
        )
        .unwrap()
        .into_owned();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0], fixture.records[1]);
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = QueryDiagnostic::UnknownSortKey { key: "x".into() };
        assert_eq!(diag.to_string(), "unknown sort key 'x', results are unsorted");
    }
}
