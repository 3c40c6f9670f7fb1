//! # Metadata Catalog
//!
//! The catalog owns every [`MetadataType`] and [`MetadataValue`]. The rest of the
//! crate treats it as a read-only lookup surface: records reference values by id,
//! and the filter builder looks values up by type and name.
//!
//! ## Catalog Order
//!
//! Types and values are kept in insertion order, which mirrors primary-key
//! order in the backing store. [`MetadataCatalog::resolve`] always answers in
//! catalog order, never in the caller's order.
//!
//! ## Dangling References
//!
//! Records may reference values that have since been removed. Resolution drops
//! such ids silently: absence is a valid terminal state, not a failure. Callers
//! that want to know what was dropped use [`MetadataCatalog::resolve_partitioned`].
//!
//! ## Maintenance
//!
//! - Type names are unique and non-blank.
//! - A (type, name) pair is unique among values.
//! - Removing a type removes its values.

mod by_type;

pub use by_type::MetadataByType;

use std::collections::BTreeSet;

use crate::config::EngineConfig;
use crate::error::{ContentError, Result};
use crate::model::{MetadataId, MetadataType, MetadataTypeId, MetadataValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NameLimits {
    type_name_max_len: usize,
    value_name_max_len: usize,
}

impl Default for NameLimits {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for NameLimits {
    fn from(config: &EngineConfig) -> Self {
        Self {
            type_name_max_len: config.type_name_max_len,
            value_name_max_len: config.value_name_max_len,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataCatalog {
    types: Vec<MetadataType>,
    values: Vec<MetadataValue>,
    limits: NameLimits,
}

impl MetadataCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty catalog whose name limits come from `config`.
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            limits: NameLimits::from(config),
            ..Self::default()
        }
    }

    /// Build a catalog from a snapshot handed over by the persistence layer.
    ///
    /// Values whose type is missing are rejected, as are duplicate ids. The
    /// denormalized `type_name` of each value is refreshed from its type.
    pub fn from_parts(types: Vec<MetadataType>, values: Vec<MetadataValue>) -> Result<Self> {
        let mut catalog = Self::new();

        for ty in types {
            if catalog.type_by_id(ty.id).is_some() {
                return Err(ContentError::DuplicateMetadata(format!(
                    "metadata type id {} appears twice",
                    ty.id
                )));
            }
            catalog.types.push(ty);
        }

        for mut value in values {
            if catalog.value_by_id(value.id).is_some() {
                return Err(ContentError::DuplicateMetadata(format!(
                    "metadata value id {} appears twice",
                    value.id
                )));
            }
            let type_name = catalog
                .type_by_id(value.type_id)
                .map(|ty| ty.name.clone())
                .ok_or_else(|| {
                    ContentError::UnknownMetadataType(format!(
                        "type id {} (referenced by value {})",
                        value.type_id, value.id
                    ))
                })?;
            value.type_name = type_name;
            catalog.values.push(value);
        }

        Ok(catalog)
    }

    pub fn types(&self) -> &[MetadataType] {
        &self.types
    }

    pub fn values(&self) -> &[MetadataValue] {
        &self.values
    }

    pub fn type_by_id(&self, id: MetadataTypeId) -> Option<&MetadataType> {
        self.types.iter().find(|ty| ty.id == id)
    }

    pub fn type_by_name(&self, name: &str) -> Option<&MetadataType> {
        self.types.iter().find(|ty| ty.name == name)
    }

    pub fn value_by_id(&self, id: MetadataId) -> Option<&MetadataValue> {
        self.values.iter().find(|v| v.id == id)
    }

    pub fn contains_value(&self, id: MetadataId) -> bool {
        self.value_by_id(id).is_some()
    }

    /// Resolve value ids to values, in catalog order.
    ///
    /// Unknown ids are dropped. Each known value appears once even if its id is
    /// repeated in `ids`, so the output is one shorter per unknown id only when
    /// `ids` holds no duplicates.
    pub fn resolve(&self, ids: &[MetadataId]) -> Vec<MetadataValue> {
        self.resolve_partitioned(ids).0
    }

    /// Like [`Self::resolve`], but also returns the ids that did not resolve,
    /// in the caller's order.
    pub fn resolve_partitioned(&self, ids: &[MetadataId]) -> (Vec<MetadataValue>, Vec<MetadataId>) {
        let wanted: BTreeSet<MetadataId> = ids.iter().copied().collect();
        let found: Vec<MetadataValue> = self
            .values
            .iter()
            .filter(|v| wanted.contains(&v.id))
            .cloned()
            .collect();
        let missing = ids
            .iter()
            .copied()
            .filter(|id| !self.contains_value(*id))
            .collect();
        (found, missing)
    }

    /// Group the resolved values by the name of their owning type.
    pub fn types_of(&self, value_ids: &[MetadataId]) -> MetadataByType {
        MetadataByType::from_values(self.resolve(value_ids))
    }

    /// All values of the named type, in catalog order. Unknown type names
    /// yield an empty list.
    pub fn values_of_type(&self, type_name: &str) -> Vec<&MetadataValue> {
        self.values
            .iter()
            .filter(|v| v.type_name == type_name)
            .collect()
    }

    /// Look a value up by its type name and its own name.
    pub fn find_value(&self, type_name: &str, value_name: &str) -> Option<&MetadataValue> {
        self.values
            .iter()
            .find(|v| v.type_name == type_name && v.name == value_name)
    }

    /// Group every value in the catalog by type name.
    pub fn grouped(&self) -> MetadataByType {
        MetadataByType::from_values(self.values.clone())
    }

    /// Add a metadata type. Names must be non-blank and unique.
    pub fn insert_type(&mut self, name: impl Into<String>) -> Result<&MetadataType> {
        let name = name.into();
        check_name(&name, "metadata type", self.limits.type_name_max_len)?;
        if self.type_by_name(&name).is_some() {
            return Err(ContentError::DuplicateMetadata(format!(
                "metadata type '{}' already exists",
                name
            )));
        }

        let id = next_id(self.types.iter().map(|ty| ty.id), "metadata type")?;
        self.types.push(MetadataType { id, name });
        Ok(&self.types[self.types.len() - 1])
    }

    /// Add a value under an existing type. The same name may not appear twice
    /// under one type.
    pub fn insert_value(
        &mut self,
        type_id: MetadataTypeId,
        name: impl Into<String>,
    ) -> Result<&MetadataValue> {
        let name = name.into();
        check_name(&name, "metadata value", self.limits.value_name_max_len)?;

        let type_name = self
            .type_by_id(type_id)
            .map(|ty| ty.name.clone())
            .ok_or_else(|| ContentError::UnknownMetadataType(format!("type id {}", type_id)))?;

        if self
            .values
            .iter()
            .any(|v| v.type_id == type_id && v.name == name)
        {
            return Err(ContentError::DuplicateMetadata(format!(
                "[{}]{} already exists",
                type_name, name
            )));
        }

        let id = next_id(self.values.iter().map(|v| v.id), "metadata value")?;
        self.values.push(MetadataValue {
            id,
            name,
            type_id,
            type_name,
        });
        Ok(&self.values[self.values.len() - 1])
    }

    /// Remove a type together with all of its values. Returns the removed
    /// value ids so the caller can clean up records.
    pub fn remove_type(&mut self, type_id: MetadataTypeId) -> Result<Vec<MetadataId>> {
        let position = self
            .types
            .iter()
            .position(|ty| ty.id == type_id)
            .ok_or_else(|| ContentError::UnknownMetadataType(format!("type id {}", type_id)))?;
        self.types.remove(position);

        let removed: Vec<MetadataId> = self
            .values
            .iter()
            .filter(|v| v.type_id == type_id)
            .map(|v| v.id)
            .collect();
        self.values.retain(|v| v.type_id != type_id);
        Ok(removed)
    }

    pub fn remove_value(&mut self, id: MetadataId) -> Result<MetadataValue> {
        let position = self
            .values
            .iter()
            .position(|v| v.id == id)
            .ok_or(ContentError::MetadataNotFound(id))?;
        Ok(self.values.remove(position))
    }
}

/// One past the largest id in use, or 1 for an empty list.
fn next_id(ids: impl Iterator<Item = i64>, what: &str) -> Result<i64> {
    ids.max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| ContentError::IdExhausted(what.to_string()))
}

fn check_name(name: &str, what: &str, max_len: usize) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ContentError::InvalidMetadataName(format!(
            "{} name cannot be empty",
            what
        )));
    }
    let len = name.chars().count();
    if len > max_len {
        return Err(ContentError::InvalidMetadataName(format!(
            "{} name is {} characters long (max {})",
            what, len, max_len
        )));
    }
    Ok(())
}
