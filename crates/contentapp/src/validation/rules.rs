//! Ready-made rules for text fields and metadata lists.

use std::collections::BTreeSet;

use super::file_name::validate_file_name;
use super::Rule;
use crate::catalog::MetadataCatalog;
use crate::model::MetadataId;

/// Rejects empty and whitespace-only strings.
pub fn not_blank(message: impl Into<String>) -> Rule<String> {
    Rule::new(message, |value: &String| !value.trim().is_empty())
}

/// Rejects strings longer than `max` characters (not bytes).
pub fn max_chars(max: usize) -> Rule<String> {
    Rule::from_fn(format!("at most {} characters", max), move |value: &String| {
        let len = value.chars().count();
        if len <= max {
            Ok(())
        } else {
            Err(format!(
                "Must be at most {} characters (currently {})",
                max, len
            ))
        }
    })
}

/// Accepts an empty string (unknown year) or a non-negative year of one to
/// four digits.
pub fn year() -> Rule<String> {
    Rule::new("Must be a year such as 1998", |value: &String| {
        let trimmed = value.trim();
        trimmed.is_empty()
            || ((1..=4).contains(&trimmed.len()) && trimmed.chars().all(|c| c.is_ascii_digit()))
    })
}

/// Rejects values already present in `taken`. Comparison is exact.
pub fn unique_among(taken: BTreeSet<String>, message: impl Into<String>) -> Rule<String> {
    Rule::new(message, move |value: &String| !taken.contains(value))
}

/// File name rules, see [`validate_file_name`].
pub fn file_name() -> Rule<String> {
    Rule::from_fn("valid file name", |value: &String| {
        validate_file_name(value).map_err(|e| capitalize(&e.to_string()))
    })
}

/// Rejects id lists containing ids the catalog does not know.
pub fn known_metadata(catalog: &MetadataCatalog) -> Rule<Vec<MetadataId>> {
    let known: BTreeSet<MetadataId> = catalog.values().iter().map(|v| v.id).collect();
    Rule::from_fn("known metadata", move |ids: &Vec<MetadataId>| {
        let unknown: Vec<String> = ids
            .iter()
            .filter(|id| !known.contains(id))
            .map(|id| id.to_string())
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(format!("Unknown metadata: {}", unknown.join(", ")))
        }
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
