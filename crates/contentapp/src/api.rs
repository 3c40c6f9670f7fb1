//! # API Layer
//!
//! [`ContentApi`] is the facade presentation collaborators talk to. It owns
//! nothing but the engine configuration: records and the metadata catalog are
//! borrowed per call, so one `ContentApi` can serve any number of snapshots
//! and threads.
//!
//! ## Responsibilities
//!
//! - Turn raw listing parameters into a [`FilterDescriptor`] and a [`PageRequest`]
//! - Run the query and paginate the result
//! - Fold parameter warnings and query diagnostics into [`Message`]s
//!
//! Business logic lives in [`crate::query`], [`crate::filter`] and
//! [`crate::validation`]; this module only dispatches.

use serde::Serialize;
use std::path::Path;

use crate::catalog::{MetadataByType, MetadataCatalog};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::filter::{parse_query_params, FilterDescriptor};
use crate::model::{ContentRecord, MetadataId};
use crate::query::{self, paginate, Page, PageRequest, QueryOutcome};
use crate::validation::{self, ContentDraft, DraftReport, ValidationContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub level: MessageLevel,
    pub content: String,
}

impl Message {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// One page of a content listing, plus any messages for the user.
#[derive(Debug, Clone, Serialize)]
pub struct ListResult<'a> {
    pub page: Page<&'a ContentRecord>,
    pub messages: Vec<Message>,
}

impl ListResult<'_> {
    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContentApi {
    config: EngineConfig,
}

impl ContentApi {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Build an API whose configuration comes from a TOML file.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        Ok(Self::new(EngineConfig::load(path)?))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// List content the way the listing endpoint does: parse the parameters,
    /// filter and sort, then cut out the requested page.
    pub fn list_content<'a, I, K, V>(
        &self,
        records: &'a [ContentRecord],
        catalog: &MetadataCatalog,
        params: I,
    ) -> Result<ListResult<'a>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let parsed = parse_query_params(params);
        let mut messages: Vec<Message> = parsed.warnings.into_iter().map(Message::warning).collect();

        let outcome = query::query(records, catalog, &parsed.descriptor)?;
        messages.extend(
            outcome
                .diagnostics
                .iter()
                .map(|d| Message::warning(d.to_string())),
        );

        let page = paginate(outcome.records, parsed.page, &self.config)?;
        if page.total == 0 {
            messages.push(Message::info("No content matches the current filters"));
        }

        Ok(ListResult { page, messages })
    }

    pub fn query<'a>(
        &self,
        records: &'a [ContentRecord],
        catalog: &MetadataCatalog,
        descriptor: &FilterDescriptor,
    ) -> Result<QueryOutcome<'a>> {
        query::query(records, catalog, descriptor)
    }

    /// Query with a descriptor given as JSON, as posted by the search form.
    pub fn query_json<'a>(
        &self,
        records: &'a [ContentRecord],
        catalog: &MetadataCatalog,
        descriptor_json: &str,
    ) -> Result<QueryOutcome<'a>> {
        let descriptor = FilterDescriptor::from_json(descriptor_json)?;
        query::query(records, catalog, &descriptor)
    }

    /// Query with an explicit descriptor and paginate the result.
    pub fn query_page<'a>(
        &self,
        records: &'a [ContentRecord],
        catalog: &MetadataCatalog,
        descriptor: &FilterDescriptor,
        request: PageRequest,
    ) -> Result<Page<&'a ContentRecord>> {
        let outcome = query::query(records, catalog, descriptor)?;
        paginate(outcome.records, request, &self.config)
    }

    /// Group a record's tags by metadata type, for the tag-by-category view.
    pub fn tags_by_type(&self, catalog: &MetadataCatalog, ids: &[MetadataId]) -> MetadataByType {
        catalog.types_of(ids)
    }

    pub fn validate_draft(
        &self,
        draft: ContentDraft,
        existing: &[ContentRecord],
        catalog: &MetadataCatalog,
    ) -> DraftReport {
        let ctx = ValidationContext::new(existing, catalog, &self.config);
        validation::validate_draft(draft, &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;
    use crate::test_utils::LibraryFixture;

    fn api() -> ContentApi {
        ContentApi::new(EngineConfig {
            default_page_size: 2,
            ..EngineConfig::default()
        })
    }

    fn library() -> LibraryFixture {
        LibraryFixture::new()
            .with_record("Alpha", "1990", true, &[1, 2])
            .with_record("Beta", "2001", false, &[1])
            .with_record("Gamma", "2003", true, &[3])
            .with_record("Delta", "1999", true, &[1])
            .with_record("Epsilon", "", true, &[])
    }

    #[test]
    fn test_list_content_filters_sorts_and_pages() {
        let fixture = library();
        let result = api()
            .list_content(
                &fixture.records,
                &fixture.catalog,
                [("active", "true"), ("sort", "-published_year"), ("page", "2")],
            )
            .unwrap();

        let titles: Vec<_> = result.page.items.iter().map(|r| r.title.as_str()).collect();
        // Active by year desc: Gamma, Delta, Alpha, Epsilon
        assert_eq!(titles, vec!["Alpha", "Epsilon"]);
        assert_eq!(result.page.total, 4);
        assert_eq!(result.page.total_pages, 2);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_list_content_collects_warnings() {
        let fixture = library();
        let result = api()
            .list_content(
                &fixture.records,
                &fixture.catalog,
                [("metadata", "1,two"), ("sort", "popularity")],
            )
            .unwrap();

        assert_eq!(result.page.total, 5);
        assert!(result.has_warnings());
        assert_eq!(result.messages.len(), 2);
        assert!(result.messages[1].content.contains("popularity"));
    }

    #[test]
    fn test_list_content_empty_result_message() {
        let fixture = library();
        let result = api()
            .list_content(&fixture.records, &fixture.catalog, [("title", "zzz")])
            .unwrap();
        assert_eq!(result.page.total, 0);
        assert_eq!(
            result.messages,
            vec![Message::info("No content matches the current filters")]
        );
    }

    #[test]
    fn test_list_content_rejects_single_year() {
        let fixture = library();
        let err = api()
            .list_content(&fixture.records, &fixture.catalog, [("published_date", "1995")])
            .unwrap_err();
        assert!(matches!(err, ContentError::InvalidFilterDescriptor(_)));
    }

    #[test]
    fn test_list_content_page_out_of_range() {
        let fixture = library();
        let err = api()
            .list_content(&fixture.records, &fixture.catalog, [("page", "9")])
            .unwrap_err();
        assert!(matches!(err, ContentError::PageOutOfRange { page: 9, last: 3 }));
    }

    #[test]
    fn test_query_json() {
        let fixture = library();
        let outcome = api()
            .query_json(
                &fixture.records,
                &fixture.catalog,
                r#"{"years": [1995, 2005], "sort": "published_year"}"#,
            )
            .unwrap();
        assert_eq!(outcome.ids(), vec![4, 2, 3]);

        let err = api()
            .query_json(&fixture.records, &fixture.catalog, "{not json")
            .unwrap_err();
        assert!(matches!(err, ContentError::Serialization(_)));
    }

    #[test]
    fn test_query_page() {
        let fixture = library();
        let page = api()
            .query_page(
                &fixture.records,
                &fixture.catalog,
                &FilterDescriptor::new().with_metadata(vec![1]),
                PageRequest::default(),
            )
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn test_tags_by_type() {
        let fixture = library();
        let grouped = api().tags_by_type(&fixture.catalog, &fixture.records[0].metadata);
        assert_eq!(grouped.get("Subject").map(|v| v.len()), Some(2));
    }

    #[test]
    fn test_validate_draft_uses_config_limits() {
        let fixture = library();
        let api = ContentApi::new(EngineConfig {
            title_max_len: 5,
            ..EngineConfig::default()
        });
        let report = api.validate_draft(
            ContentDraft::new("Too long a title", "new.pdf"),
            &fixture.records,
            &fixture.catalog,
        );
        assert!(!report.title.is_valid());
        assert!(report.file_name.is_valid());
    }
}
