//! Filter descriptors.

use serde::{Deserialize, Serialize};

use crate::catalog::MetadataCatalog;
use crate::error::{ContentError, Result};
use crate::model::MetadataId;

/// Published-year bounds as supplied by the caller.
///
/// On the wire this is a JSON array `[lo, hi]`. A well-formed range carries
/// both bounds; one with a single bound is kept as-is here so that
/// [`super::compile`] can reject it before any record is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Option<i32>>", into = "Vec<Option<i32>>")]
pub struct YearBounds {
    pub lo: Option<i32>,
    pub hi: Option<i32>,
}

impl YearBounds {
    pub fn new(lo: i32, hi: i32) -> Self {
        Self {
            lo: Some(lo),
            hi: Some(hi),
        }
    }

    /// The inclusive range, `None` when neither bound is set.
    ///
    /// Fails with [`ContentError::InvalidFilterDescriptor`] when only one bound
    /// is present: the range is an atomic pair.
    pub fn range(&self) -> Result<Option<(i32, i32)>> {
        match (self.lo, self.hi) {
            (Some(lo), Some(hi)) => Ok(Some((lo, hi))),
            (None, None) => Ok(None),
            (Some(lo), None) => Err(ContentError::InvalidFilterDescriptor(format!(
                "year range has a lower bound ({}) but no upper bound",
                lo
            ))),
            (None, Some(hi)) => Err(ContentError::InvalidFilterDescriptor(format!(
                "year range has an upper bound ({}) but no lower bound",
                hi
            ))),
        }
    }
}

// Only the first two items count; extra items are ignored.
impl From<Vec<Option<i32>>> for YearBounds {
    fn from(items: Vec<Option<i32>>) -> Self {
        Self {
            lo: items.first().copied().flatten(),
            hi: items.get(1).copied().flatten(),
        }
    }
}

impl From<YearBounds> for Vec<Option<i32>> {
    fn from(bounds: YearBounds) -> Self {
        vec![bounds.lo, bounds.hi]
    }
}

/// A sparse set of search criteria. Every field is optional; `None` means
/// "do not filter on this dimension".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<YearBounds>,
    #[serde(
        rename = "filename",
        alias = "file_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Value ids the record must carry, all of them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<MetadataId>>,
    /// Sort key, e.g. `"title"` or `"-published_year"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl FilterDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_years(mut self, lo: i32, hi: i32) -> Self {
        self.years = Some(YearBounds::new(lo, hi));
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_metadata(mut self, ids: Vec<MetadataId>) -> Self {
        self.metadata = Some(ids);
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Add a metadata criterion by type name and value name, e.g.
    /// `("Subject", "Math")`. Values already required are not repeated.
    pub fn require_tag(
        mut self,
        catalog: &MetadataCatalog,
        type_name: &str,
        value_name: &str,
    ) -> Result<Self> {
        let value = catalog.find_value(type_name, value_name).ok_or_else(|| {
            ContentError::UnknownMetadataValue(format!("[{}]{}", type_name, value_name))
        })?;
        let ids = self.metadata.get_or_insert_with(Vec::new);
        if !ids.contains(&value.id) {
            ids.push(value.id);
        }
        Ok(self)
    }

    /// True when no criterion and no sort key is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Parse a descriptor from the JSON body the search form posts.
    ///
    /// Fails with [`ContentError::Serialization`] on malformed JSON. A
    /// half-specified year range parses fine and is rejected later by
    /// [`super::compile`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a descriptor from listing query parameters. Malformed values are
    /// dropped; see [`super::parse_query_params`] for the warnings.
    pub fn from_query_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        super::parse_query_params(params).descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_catalog;

    #[test]
    fn test_default_is_empty() {
        assert!(FilterDescriptor::new().is_empty());
        assert!(!FilterDescriptor::new().with_active(false).is_empty());
        assert!(!FilterDescriptor::new().with_sort("title").is_empty());
    }

    #[test]
    fn test_year_bounds_range() {
        assert_eq!(YearBounds::new(1990, 2000).range().unwrap(), Some((1990, 2000)));
        assert_eq!(YearBounds::default().range().unwrap(), None);

        let lower_only = YearBounds {
            lo: Some(1995),
            hi: None,
        };
        assert!(matches!(
            lower_only.range(),
            Err(ContentError::InvalidFilterDescriptor(_))
        ));
        let upper_only = YearBounds {
            lo: None,
            hi: Some(2005),
        };
        assert!(upper_only.range().is_err());
    }

    #[test]
    fn test_from_json() {
        let descriptor = FilterDescriptor::from_json(r#"{"active": true, "metadata": [1, 2]}"#).unwrap();
        assert_eq!(
            descriptor,
            FilterDescriptor::new().with_active(true).with_metadata(vec![1, 2])
        );
        assert!(FilterDescriptor::from_json("{}").unwrap().is_empty());

        let err = FilterDescriptor::from_json(r#"{"years": "1990"}"#).unwrap_err();
        assert!(matches!(err, ContentError::Serialization(_)));
    }

    #[test]
    fn test_deserialize_wire_descriptor() {
        let json = r#"{"title": "alp", "years": [1995, 2005], "filename": "pdf", "metadata": [1, 2], "sort": "-title"}"#;
        let descriptor: FilterDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.title.as_deref(), Some("alp"));
        assert_eq!(descriptor.years, Some(YearBounds::new(1995, 2005)));
        assert_eq!(descriptor.file_name.as_deref(), Some("pdf"));
        assert_eq!(descriptor.metadata, Some(vec![1, 2]));
        assert_eq!(descriptor.active, None);
    }

    #[test]
    fn test_deserialize_single_year_keeps_lower_bound_only() {
        let descriptor: FilterDescriptor = serde_json::from_str(r#"{"years": [1995]}"#).unwrap();
        assert_eq!(
            descriptor.years,
            Some(YearBounds {
                lo: Some(1995),
                hi: None
            })
        );
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let descriptor = FilterDescriptor::new().with_file_name("x").with_years(1, 2);
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json, serde_json::json!({"filename": "x", "years": [1, 2]}));
    }

    #[test]
    fn test_require_tag_by_name() {
        let catalog = sample_catalog();
        let descriptor = FilterDescriptor::new()
            .require_tag(&catalog, "Subject", "Math")
            .unwrap()
            .require_tag(&catalog, "Language", "French")
            .unwrap()
            .require_tag(&catalog, "Subject", "Math")
            .unwrap();
        assert_eq!(descriptor.metadata, Some(vec![1, 4]));

        assert!(matches!(
            FilterDescriptor::new().require_tag(&catalog, "Subject", "Poetry"),
            Err(ContentError::UnknownMetadataValue(_))
        ));
    }
}
