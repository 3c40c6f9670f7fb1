//! Per-record validation.
//!
//! [`validate_draft`] checks every editable field of a [`ContentDraft`] and
//! returns a [`DraftReport`] with one [`FieldInfo`] per field. The form layer
//! renders each reason next to its field and only submits the draft once
//! [`DraftReport::is_valid`] holds.
//!
//! | Field | Rules |
//! |-------|-------|
//! | `title` | not blank, length limit, unique among other records |
//! | `file_name` | file name rules, length limit, unique among other records |
//! | `copyright` | length limit (optional field) |
//! | `published_year` | empty or a year (optional field) |
//! | `metadata` | every id known to the catalog |

use serde::Serialize;
use std::collections::BTreeSet;

use super::{rules, validate, FieldInfo, Rule};
use crate::catalog::MetadataCatalog;
use crate::config::EngineConfig;
use crate::model::{ContentId, ContentRecord, MetadataId};

/// The editable fields of a content record. `id` is `None` for records that
/// have not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentDraft {
    pub id: Option<ContentId>,
    pub title: String,
    pub file_name: String,
    pub copyright: Option<String>,
    pub published_year: Option<String>,
    pub metadata: Vec<MetadataId>,
}

impl ContentDraft {
    pub fn new(title: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Draft for editing an existing record.
    pub fn from_record(record: &ContentRecord) -> Self {
        Self {
            id: Some(record.id),
            title: record.title.clone(),
            file_name: record.file_name.clone(),
            copyright: record.copyright.clone(),
            published_year: record.published_year.clone(),
            metadata: record.metadata.clone(),
        }
    }
}

/// What a draft is validated against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Records already in the collection. The draft's own record (same id) is
    /// skipped in uniqueness checks.
    pub existing: &'a [ContentRecord],
    pub catalog: &'a MetadataCatalog,
    pub config: &'a EngineConfig,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        existing: &'a [ContentRecord],
        catalog: &'a MetadataCatalog,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            existing,
            catalog,
            config,
        }
    }

    fn others(&self, draft_id: Option<ContentId>) -> impl Iterator<Item = &'a ContentRecord> {
        self.existing
            .iter()
            .filter(move |r| draft_id != Some(r.id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftReport {
    pub id: Option<ContentId>,
    pub title: FieldInfo<String>,
    pub file_name: FieldInfo<String>,
    pub copyright: FieldInfo<Option<String>>,
    pub published_year: FieldInfo<Option<String>>,
    pub metadata: FieldInfo<Vec<MetadataId>>,
}

impl DraftReport {
    pub fn is_valid(&self) -> bool {
        self.reasons().is_empty()
    }

    /// `(field, reason)` for every rejected field, in form order.
    pub fn reasons(&self) -> Vec<(&'static str, &str)> {
        [
            ("title", self.title.error()),
            ("file_name", self.file_name.error()),
            ("copyright", self.copyright.error()),
            ("published_year", self.published_year.error()),
            ("metadata", self.metadata.error()),
        ]
        .into_iter()
        .filter_map(|(field, reason)| reason.map(|r| (field, r)))
        .collect()
    }

    /// Reassemble the draft from the validated values.
    pub fn into_draft(self) -> ContentDraft {
        ContentDraft {
            id: self.id,
            title: self.title.value,
            file_name: self.file_name.value,
            copyright: self.copyright.value,
            published_year: self.published_year.value,
            metadata: self.metadata.value,
        }
    }
}

pub fn validate_draft(draft: ContentDraft, ctx: &ValidationContext<'_>) -> DraftReport {
    let taken_titles: BTreeSet<String> = ctx.others(draft.id).map(|r| r.title.clone()).collect();
    let taken_files: BTreeSet<String> = ctx
        .others(draft.id)
        .map(|r| r.file_name.clone())
        .collect();

    let title_rules = [
        rules::not_blank("Title is required"),
        rules::max_chars(ctx.config.title_max_len),
        rules::unique_among(taken_titles, "A content item with this title already exists"),
    ];
    let file_name_rules = [
        rules::file_name(),
        rules::max_chars(ctx.config.file_name_max_len),
        rules::unique_among(taken_files, "A file with this name already exists"),
    ];
    let copyright_rules: [Rule<Option<String>>; 1] =
        [rules::max_chars(ctx.config.copyright_max_len).optional()];
    let year_rules: [Rule<Option<String>>; 1] = [rules::year().optional()];
    let metadata_rules = [rules::known_metadata(ctx.catalog)];

    let report = DraftReport {
        id: draft.id,
        title: validate(draft.title, &title_rules),
        file_name: validate(draft.file_name, &file_name_rules),
        copyright: validate(draft.copyright, &copyright_rules),
        published_year: validate(draft.published_year, &year_rules),
        metadata: validate(draft.metadata, &metadata_rules),
    };

    if !report.is_valid() {
        tracing::debug!(id = ?report.id, reasons = ?report.reasons(), "draft rejected");
    }
    report
}
