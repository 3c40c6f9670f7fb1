//! Metadata values grouped by the name of their owning type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::MetadataValue;

/// Mapping from metadata-type name (e.g. "Subject") to the values of that type.
///
/// Keys iterate in name order. Within a key, values keep the order they were
/// given in, which for catalog-built maps is catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataByType(BTreeMap<String, Vec<MetadataValue>>);

impl MetadataByType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = MetadataValue>) -> Self {
        let mut grouped = Self::new();
        for value in values {
            grouped.push(value);
        }
        grouped
    }

    pub fn push(&mut self, value: MetadataValue) {
        self.0.entry(value.type_name.clone()).or_default().push(value);
    }

    pub fn get(&self, type_name: &str) -> Option<&[MetadataValue]> {
        self.0.get(type_name).map(Vec::as_slice)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MetadataValue])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct types.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(id: i64, name: &str, type_id: i64, type_name: &str) -> MetadataValue {
        MetadataValue {
            id,
            name: name.into(),
            type_id,
            type_name: type_name.into(),
        }
    }

    #[test]
    fn groups_preserve_input_order_within_type() {
        let grouped = MetadataByType::from_values(vec![
            value(3, "Zulu", 1, "Subject"),
            value(1, "Alpha", 1, "Subject"),
            value(2, "English", 2, "Language"),
        ]);

        let names: Vec<_> = grouped.type_names().collect();
        assert_eq!(names, vec!["Language", "Subject"]);
        let subject_ids: Vec<_> = grouped.get("Subject").unwrap().iter().map(|v| v.id).collect();
        assert_eq!(subject_ids, vec![3, 1]);
    }

    #[test]
    fn serializes_as_plain_map() {
        let grouped = MetadataByType::from_values(vec![value(1, "Math", 1, "Subject")]);
        let json = serde_json::to_value(&grouped).unwrap();
        assert_eq!(json["Subject"][0]["name"], "Math");
        assert_eq!(json["Subject"][0]["type"], 1);
    }

    #[test]
    fn empty_map() {
        let grouped = MetadataByType::new();
        assert!(grouped.is_empty());
        assert!(grouped.get("Subject").is_none());
    }
}
