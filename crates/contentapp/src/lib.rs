//! # Contentapp Architecture
//!
//! Contentapp is the **filtering and validation core** of a content-library front end.
//! It knows nothing about rendering, routing or storage. Callers hand it an in-memory
//! snapshot of content records plus a metadata catalog, and get plain data back.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade: query params → descriptor → page of records │
//! │  - Collects diagnostics as structured messages              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Query Engine (query/)                                      │
//! │  - Compiles the descriptor once, filters, stable-sorts      │
//! │  - Page-number pagination                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Filter Predicate Builder (filter/)                         │
//! │  - FilterDescriptor → Predicate (short-circuit conjunction) │
//! │  - Sort key parsing                                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Metadata Catalog (catalog/)                                │
//! │  - Metadata types and values, resolution, grouping          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The Field Validator (`validation/`) sits beside the query path. It runs at
//! record-edit time, before a record is submitted into the collection, and
//! reports outcomes as [`validation::FieldInfo`] values rather than errors.
//!
//! ## Key Principle: Pure Computation
//!
//! Everything from `api.rs` inward:
//! - Takes borrowed inputs and never mutates them
//! - Performs no I/O (the optional config file loader is the one exception)
//! - Holds no shared mutable state, so concurrent callers need no coordination
//!
//! ## Error Model
//!
//! Only a malformed descriptor (a half-specified year range) aborts a query.
//! Unknown sort keys, dangling metadata ids and unparsable years degrade
//! gracefully. See [`error::ContentError`] and [`query::QueryDiagnostic`].
//!
//! ## Module Overview
//!
//! - [`api`]: Facade used by presentation collaborators
//! - [`catalog`]: Metadata types and values
//! - [`config`]: Engine limits and pagination defaults
//! - [`error`]: Error types
//! - [`filter`]: Filter descriptors, compiled predicates, sort keys
//! - [`model`]: Content records
//! - [`query`]: Query engine and pagination
//! - [`validation`]: Field and record validation

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod query;
pub mod validation;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use error::{ContentError, Result};
