//! Compiled record predicates.
//!
//! A [`Predicate`] is a conjunction of [`FieldFilter`]s, one per criterion
//! present in the descriptor. Filters run left to right and the first one that
//! fails decides the outcome for that record.

use std::collections::BTreeSet;
use tracing::{debug, trace};

use super::FilterDescriptor;
use crate::error::Result;
use crate::model::{ContentRecord, MetadataId};

/// A single compiled criterion.
///
/// Substring needles are stored lowercased, so matching only lowercases the
/// record side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFilter {
    TitleContains(String),
    /// Inclusive published-year range. Records without a parsable year fail.
    PublishedBetween { lo: i32, hi: i32 },
    FileNameContains(String),
    /// Records without a copyright never match.
    CopyrightContains(String),
    Active(bool),
    /// Record must carry every listed value id.
    HasAllMetadata(BTreeSet<MetadataId>),
}

impl FieldFilter {
    /// Short name of the criterion, matching the descriptor field.
    pub fn name(&self) -> &'static str {
        match self {
            FieldFilter::TitleContains(_) => "title",
            FieldFilter::PublishedBetween { .. } => "years",
            FieldFilter::FileNameContains(_) => "file_name",
            FieldFilter::CopyrightContains(_) => "copyright",
            FieldFilter::Active(_) => "active",
            FieldFilter::HasAllMetadata(_) => "metadata",
        }
    }

    pub fn matches(&self, record: &ContentRecord) -> bool {
        match self {
            FieldFilter::TitleContains(needle) => contains_ci(&record.title, needle),
            FieldFilter::PublishedBetween { lo, hi } => match record.published_year_number() {
                Some(year) => (*lo..=*hi).contains(&year),
                None => {
                    trace!(
                        record = record.id,
                        year = ?record.published_year,
                        "excluded by year range: no parsable published year"
                    );
                    false
                }
            },
            FieldFilter::FileNameContains(needle) => contains_ci(&record.file_name, needle),
            FieldFilter::CopyrightContains(needle) => record
                .copyright
                .as_deref()
                .is_some_and(|c| contains_ci(c, needle)),
            FieldFilter::Active(active) => record.active == *active,
            FieldFilter::HasAllMetadata(required) => {
                required.iter().all(|id| record.metadata.contains(id))
            }
        }
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// A boolean test over a content record, compiled once from a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    filters: Vec<FieldFilter>,
}

impl Predicate {
    /// The predicate that accepts every record.
    pub fn always() -> Self {
        Self::default()
    }

    pub fn from_filters(filters: Vec<FieldFilter>) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    /// True when the predicate accepts every record.
    pub fn is_trivial(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn matches(&self, record: &ContentRecord) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Borrow the predicate as a plain closure, e.g. for `Iterator::filter`.
    pub fn as_fn(&self) -> impl Fn(&ContentRecord) -> bool + '_ {
        move |record| self.matches(record)
    }
}

/// Compile a descriptor into a predicate.
///
/// Criteria that cannot exclude anything (an empty substring, an empty
/// metadata list) are left out. A year range with a single bound is rejected
/// with [`crate::ContentError::InvalidFilterDescriptor`].
pub fn compile(descriptor: &FilterDescriptor) -> Result<Predicate> {
    let mut filters = Vec::new();

    if let Some(title) = non_empty_lower(descriptor.title.as_deref()) {
        filters.push(FieldFilter::TitleContains(title));
    }

    if let Some(bounds) = &descriptor.years {
        if let Some((lo, hi)) = bounds.range()? {
            filters.push(FieldFilter::PublishedBetween { lo, hi });
        }
    }

    if let Some(file_name) = non_empty_lower(descriptor.file_name.as_deref()) {
        filters.push(FieldFilter::FileNameContains(file_name));
    }

    if let Some(copyright) = non_empty_lower(descriptor.copyright.as_deref()) {
        filters.push(FieldFilter::CopyrightContains(copyright));
    }

    if let Some(active) = descriptor.active {
        filters.push(FieldFilter::Active(active));
    }

    if let Some(ids) = &descriptor.metadata {
        if !ids.is_empty() {
            filters.push(FieldFilter::HasAllMetadata(ids.iter().copied().collect()));
        }
    }

    debug!(
        criteria = ?filters.iter().map(FieldFilter::name).collect::<Vec<_>>(),
        "compiled filter descriptor"
    );
    Ok(Predicate::from_filters(filters))
}

fn non_empty_lower(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_lowercase)
}
