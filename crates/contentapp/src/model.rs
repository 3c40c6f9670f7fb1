//! # Domain Model: Content Records and Metadata
//!
//! This module defines the data shapes the engine works on: [`ContentRecord`],
//! [`MetadataType`] and [`MetadataValue`].
//!
//! ## Ownership
//!
//! Metadata types and values belong to the [`MetadataCatalog`]. Records only
//! reference values by id. The `metadata_info` list on a record is a denormalized
//! copy of the resolved values, kept for display.
//!
//! ## The Denormalization Invariant
//!
//! `metadata_info` must be exactly the resolution of `metadata` against the
//! catalog at read time (same set, any order). Values whose id no longer
//! resolves are dropped, never kept as stale summaries. Use
//! [`ContentRecord::with_resolved_metadata`] to rebuild the list and
//! [`ContentRecord::metadata_is_consistent`] to check it.
//!
//! ## Published Year
//!
//! The published year travels as a string and may be empty or missing. Readers
//! that need a number go through [`ContentRecord::published_year_number`], which
//! returns `None` for anything that is not an integer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::MetadataCatalog;

pub type ContentId = i64;
pub type MetadataId = i64;
pub type MetadataTypeId = i64;

/// A named category of tags (e.g. "Subject", "Language").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataType {
    pub id: MetadataTypeId,
    pub name: String,
}

/// A single tag instance belonging to exactly one [`MetadataType`].
///
/// The owning type's name is carried alongside its id so that display code
/// never needs a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataValue {
    pub id: MetadataId,
    pub name: String,
    #[serde(rename = "type")]
    pub type_id: MetadataTypeId,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    pub id: ContentId,
    pub file_name: String,
    pub content_file: String,
    pub title: String,
    pub description: Option<String>,
    pub modified_on: DateTime<Utc>,
    pub copyright: Option<String>,
    pub rights_statement: Option<String>,
    pub active: bool,
    /// Metadata value ids, in the order they were assigned
    pub metadata: Vec<MetadataId>,
    /// Resolved summaries of `metadata`
    pub metadata_info: Vec<MetadataValue>,
    pub published_year: Option<String>,
}

// Older exports carry the published year as a bare number and may omit
// `metadata_info` or `active` altogether.
impl<'de> Deserialize<'de> for ContentRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = ContentRecordHelper::deserialize(deserializer)?;

        Ok(ContentRecord {
            id: helper.id,
            file_name: helper.file_name,
            content_file: helper.content_file,
            title: helper.title,
            description: helper.description,
            modified_on: helper.modified_on,
            copyright: helper.copyright,
            rights_statement: helper.rights_statement,
            active: helper.active.unwrap_or(true),
            metadata: helper.metadata,
            metadata_info: helper.metadata_info,
            published_year: helper.published_year.map(PublishedYear::into_string),
        })
    }
}

#[derive(Deserialize)]
struct ContentRecordHelper {
    id: ContentId,
    file_name: String,
    #[serde(default)]
    content_file: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    modified_on: DateTime<Utc>,
    #[serde(default)]
    copyright: Option<String>,
    #[serde(default)]
    rights_statement: Option<String>,
    #[serde(default)]
    active: Option<bool>,
    #[serde(default)]
    metadata: Vec<MetadataId>,
    #[serde(default)]
    metadata_info: Vec<MetadataValue>,
    #[serde(default)]
    published_year: Option<PublishedYear>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PublishedYear {
    Text(String),
    Number(i64),
}

impl PublishedYear {
    fn into_string(self) -> String {
        match self {
            PublishedYear::Text(s) => s,
            PublishedYear::Number(n) => n.to_string(),
        }
    }
}

impl ContentRecord {
    /// Create an active record with no metadata, no optional fields and
    /// `modified_on` set to now.
    pub fn new(id: ContentId, title: impl Into<String>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            id,
            content_file: format!("contents/{}", file_name),
            file_name,
            title: title.into(),
            description: None,
            modified_on: Utc::now(),
            copyright: None,
            rights_statement: None,
            active: true,
            metadata: Vec::new(),
            metadata_info: Vec::new(),
            published_year: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }

    pub fn with_rights_statement(mut self, rights: impl Into<String>) -> Self {
        self.rights_statement = Some(rights.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_modified_on(mut self, modified_on: DateTime<Utc>) -> Self {
        self.modified_on = modified_on;
        self
    }

    pub fn with_published_year(mut self, year: impl Into<String>) -> Self {
        self.published_year = Some(year.into());
        self
    }

    /// Set the metadata id list. `metadata_info` is left untouched; call
    /// [`Self::with_resolved_metadata`] to bring it back in line.
    pub fn with_metadata(mut self, ids: Vec<MetadataId>) -> Self {
        self.metadata = ids;
        self
    }

    /// Rebuild `metadata_info` from `metadata` against the given catalog.
    ///
    /// Ids that no longer resolve are dropped from both lists, so a record never
    /// references a value whose type has been removed.
    pub fn with_resolved_metadata(mut self, catalog: &MetadataCatalog) -> Self {
        let (found, missing) = catalog.resolve_partitioned(&self.metadata);
        if !missing.is_empty() {
            tracing::debug!(
                record = self.id,
                ?missing,
                "dropping unresolvable metadata ids"
            );
            self.metadata.retain(|id| !missing.contains(id));
        }
        self.metadata_info = found;
        self
    }

    /// Check the denormalization invariant: every id resolves, and the
    /// summaries are exactly the resolved set.
    pub fn metadata_is_consistent(&self, catalog: &MetadataCatalog) -> bool {
        let (found, missing) = catalog.resolve_partitioned(&self.metadata);
        if !missing.is_empty() {
            return false;
        }
        let expected: BTreeSet<MetadataId> = found.iter().map(|v| v.id).collect();
        let actual: BTreeSet<MetadataId> = self.metadata_info.iter().map(|v| v.id).collect();
        expected == actual && self.metadata_info.len() == actual.len()
    }

    /// The published year as an integer, if it parses as one.
    pub fn published_year_number(&self) -> Option<i32> {
        self.published_year
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<i32>().ok())
    }

    /// The set of metadata ids carried by this record.
    pub fn metadata_set(&self) -> BTreeSet<MetadataId> {
        self.metadata.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_catalog;

    #[test]
    fn test_new_record_defaults() {
        let record = ContentRecord::new(1, "Alpha", "alpha.pdf");
        assert!(record.active);
        assert_eq!(record.content_file, "contents/alpha.pdf");
        assert!(record.metadata.is_empty());
        assert!(record.published_year.is_none());
    }

    #[test]
    fn test_published_year_number() {
        let record = ContentRecord::new(1, "A", "a.pdf");
        assert_eq!(record.published_year_number(), None);
        assert_eq!(
            record.clone().with_published_year("1990").published_year_number(),
            Some(1990)
        );
        assert_eq!(
            record.clone().with_published_year(" 2001 ").published_year_number(),
            Some(2001)
        );
        assert_eq!(record.clone().with_published_year("").published_year_number(), None);
        assert_eq!(record.with_published_year("n.d.").published_year_number(), None);
    }

    #[test]
    fn test_resolved_metadata_drops_unknown_ids() {
        let catalog = sample_catalog();
        let record = ContentRecord::new(1, "A", "a.pdf")
            .with_metadata(vec![2, 999, 1])
            .with_resolved_metadata(&catalog);

        assert_eq!(record.metadata, vec![2, 1]);
        let ids: Vec<_> = record.metadata_info.iter().map(|v| v.id).collect();
        // Catalog order, not assignment order
        assert_eq!(ids, vec![1, 2]);
        assert!(record.metadata_is_consistent(&catalog));
    }

    #[test]
    fn test_inconsistent_metadata_detected() {
        let catalog = sample_catalog();
        let mut record = ContentRecord::new(1, "A", "a.pdf")
            .with_metadata(vec![1, 2])
            .with_resolved_metadata(&catalog);
        record.metadata.push(3);
        assert!(!record.metadata_is_consistent(&catalog));

        let dangling = ContentRecord::new(2, "B", "b.pdf").with_metadata(vec![999]);
        assert!(!dangling.metadata_is_consistent(&catalog));
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"{
            "id": 7,
            "file_name": "report.pdf",
            "content_file": "contents/report.pdf",
            "title": "Annual Report",
            "description": null,
            "modified_on": "2021-03-04T10:00:00Z",
            "copyright": "CC-BY",
            "rights_statement": null,
            "active": false,
            "metadata": [1, 2],
            "metadata_info": [{"id": 1, "name": "Math", "type": 1, "type_name": "Subject"}],
            "published_year": "1998"
        }"#;
        let record: ContentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert!(!record.active);
        assert_eq!(record.metadata_info[0].type_id, 1);
        assert_eq!(record.published_year_number(), Some(1998));
    }

    #[test]
    fn test_deserialize_legacy_numeric_year() {
        let json = r#"{
            "id": 1,
            "file_name": "a.pdf",
            "title": "A",
            "modified_on": "2021-03-04T10:00:00Z",
            "published_year": 1975
        }"#;
        let record: ContentRecord = serde_json::from_str(json).unwrap();
        assert!(record.active);
        assert_eq!(record.published_year.as_deref(), Some("1975"));
        assert!(record.metadata_info.is_empty());
    }
}
