use crate::catalog::MetadataCatalog;
use crate::model::{ContentId, ContentRecord, MetadataId};

/// Two types, two values each:
///
/// | id | value | type |
/// |----|-------|------|
/// | 1 | Math | Subject |
/// | 2 | Science | Subject |
/// | 3 | English | Language |
/// | 4 | French | Language |
pub fn sample_catalog() -> MetadataCatalog {
    let mut catalog = MetadataCatalog::new();
    let subject = catalog.insert_type("Subject").expect("insert Subject").id;
    let language = catalog.insert_type("Language").expect("insert Language").id;
    catalog.insert_value(subject, "Math").expect("insert Math");
    catalog.insert_value(subject, "Science").expect("insert Science");
    catalog.insert_value(language, "English").expect("insert English");
    catalog.insert_value(language, "French").expect("insert French");
    catalog
}

pub struct LibraryFixture {
    pub catalog: MetadataCatalog,
    pub records: Vec<ContentRecord>,
}

impl Default for LibraryFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryFixture {
    pub fn new() -> Self {
        Self {
            catalog: sample_catalog(),
            records: Vec::new(),
        }
    }

    /// Alpha (1990, active, [1, 2]) and Beta (2001, inactive, [1]).
    pub fn scenario() -> Self {
        Self::new()
            .with_record("Alpha", "1990", true, &[1, 2])
            .with_record("Beta", "2001", false, &[1])
    }

    /// Append a record with the next id and a file name derived from the title.
    pub fn with_record(
        mut self,
        title: &str,
        published_year: &str,
        active: bool,
        metadata: &[MetadataId],
    ) -> Self {
        let id = self.records.len() as ContentId + 1;
        let record = ContentRecord::new(id, title, format!("{}.pdf", title.to_lowercase()))
            .with_published_year(published_year)
            .with_active(active)
            .with_metadata(metadata.to_vec())
            .with_resolved_metadata(&self.catalog);
        self.records.push(record);
        self
    }
}
