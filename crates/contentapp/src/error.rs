use crate::model::MetadataId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Invalid filter descriptor: {0}")]
    InvalidFilterDescriptor(String),

    #[error("Unknown metadata type: {0}")]
    UnknownMetadataType(String),

    #[error("Unknown metadata value: {0}")]
    UnknownMetadataValue(String),

    #[error("Duplicate metadata: {0}")]
    DuplicateMetadata(String),

    #[error("Invalid metadata name: {0}")]
    InvalidMetadataName(String),

    #[error("Metadata value {0} not found")]
    MetadataNotFound(MetadataId),

    #[error("No {0} ids left to assign")]
    IdExhausted(String),

    #[error("Page {page} out of range (last page is {last})")]
    PageOutOfRange { page: usize, last: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ContentError>;
