//! Sort keys.
//!
//! A sort string names one ordering field, optionally prefixed with `-` for
//! descending order: `"title"`, `"-modified_on"`, `"published_year"`.
//!
//! Sorting is always stable. Reversing the direction flips the comparison,
//! never the slice, so records with equal keys keep their input order either way.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ContentRecord;

/// Raised when a sort string names no known key. Non-fatal: the query engine
/// falls back to input order and reports it as a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key '{0}'")]
pub struct UnknownSortKey(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Lexicographic, case-insensitive
    Title,
    /// Chronological
    ModifiedOn,
    /// Numeric; records without a parsable year go last
    PublishedYear,
    /// Lexicographic
    FileName,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Title,
        SortKey::ModifiedOn,
        SortKey::PublishedYear,
        SortKey::FileName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::ModifiedOn => "modified_on",
            SortKey::PublishedYear => "published_year",
            SortKey::FileName => "file_name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A parsed sort string: which key, which direction.
///
/// Descending order is the exact reverse of ascending order as long as no two
/// records tie. The one exception is `published_year`: records without a
/// parsable year form a trailing block in both directions, kept in input
/// order, and only the dated records ahead of them are reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Parse a sort string. Blank strings mean "no sort" and yield `Ok(None)`.
    pub fn parse(raw: &str) -> Result<Option<Self>, UnknownSortKey> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let (direction, name) = match trimmed.strip_prefix('-') {
            Some(rest) => (SortDirection::Descending, rest),
            None => (SortDirection::Ascending, trimmed),
        };
        let key = name
            .parse::<SortKey>()
            .map_err(|_| UnknownSortKey(trimmed.to_string()))?;
        Ok(Some(Self { key, direction }))
    }

    /// Compare two records under this spec.
    pub fn compare(&self, a: &ContentRecord, b: &ContentRecord) -> Ordering {
        if self.key == SortKey::PublishedYear {
            // Unknown years stay last in both directions
            return match (a.published_year_number(), b.published_year_number()) {
                (Some(x), Some(y)) => self.directed(x.cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
        }

        let ordering = match self.key {
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::ModifiedOn => a.modified_on.cmp(&b.modified_on),
            SortKey::FileName => a.file_name.cmp(&b.file_name),
            SortKey::PublishedYear => Ordering::Equal,
        };
        self.directed(ordering)
    }

    fn directed(&self, ordering: Ordering) -> Ordering {
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Stable in-place sort.
    pub fn sort(&self, records: &mut [&ContentRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "{}", self.key),
            SortDirection::Descending => write!(f, "-{}", self.key),
        }
    }
}
