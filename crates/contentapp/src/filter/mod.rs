//! # Filtering
//!
//! A [`FilterDescriptor`] is the sparse set of criteria a user picked in the
//! search form. [`compile`] turns it into a [`Predicate`] once, and the query
//! engine then applies that predicate to every record.
//!
//! ## Criteria
//!
//! | Field | Match |
//! |-------|-------|
//! | `title` | case-insensitive substring |
//! | `years` | published year within `[lo, hi]`, inclusive |
//! | `file_name` | case-insensitive substring |
//! | `copyright` | case-insensitive substring |
//! | `active` | exact boolean |
//! | `metadata` | record carries ALL listed value ids |
//! | `sort` | ordering key, `-` prefix for descending |
//!
//! An absent field means "do not filter on this dimension". An empty substring
//! also matches everything: at this layer it cannot be told apart from "no
//! preference", so callers should omit the field instead.
//!
//! ## Usage
//!
//! ```
//! use contentapp::filter::{compile, FilterDescriptor};
//! use contentapp::model::ContentRecord;
//!
//! let descriptor = FilterDescriptor::new().with_title("alp").with_active(true);
//! let predicate = compile(&descriptor).unwrap();
//! assert!(predicate.matches(&ContentRecord::new(1, "Alpha", "alpha.pdf")));
//! ```

mod descriptor;
mod params;
mod predicate;
mod sort;

pub use descriptor::{FilterDescriptor, YearBounds};
pub use params::{parse_query_params, ParsedQuery};
pub use predicate::{compile, FieldFilter, Predicate};
pub use sort::{SortDirection, SortKey, SortSpec, UnknownSortKey};
