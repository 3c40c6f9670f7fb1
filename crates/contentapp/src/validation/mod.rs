//! # Field Validation
//!
//! Validation runs at record-edit time, before a record is submitted into the
//! collection. Its results are data, not errors: a rejected value comes back as
//! a [`FieldInfo`] whose `reason` explains what is wrong, ready to be shown
//! next to the offending form field.
//!
//! ## Rules
//!
//! A [`Rule`] is a pure test over a candidate value plus a human-readable
//! message. [`validate`] applies rules in order and stops at the first one that
//! rejects the value (first failure wins), so a field carries at most one reason.
//!
//! ```
//! use contentapp::validation::{rules, validate};
//!
//! let info = validate(String::new(), &[rules::not_blank("Title is required")]);
//! assert_eq!(info.reason, "Title is required");
//!
//! let info = validate("Alpha".to_string(), &[rules::not_blank("Title is required")]);
//! assert!(info.is_valid());
//! ```
//!
//! ## Modules
//!
//! - [`rules`]: Ready-made rules (blank checks, length limits, years, uniqueness)
//! - [`file_name`]: File name rules
//! - [`record`]: Per-record validation built from the rules above

pub mod file_name;
pub mod record;
pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use file_name::{validate_file_name, FileNameError};
pub use record::{validate_draft, ContentDraft, DraftReport, ValidationContext};

/// A value paired with the reason it failed validation.
///
/// `reason` is empty if and only if the value is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo<T> {
    pub value: T,
    #[serde(default)]
    pub reason: String,
}

impl<T> FieldInfo<T> {
    pub fn valid(value: T) -> Self {
        Self {
            value,
            reason: String::new(),
        }
    }

    /// A rejected value. An empty `reason` is replaced with a generic one so
    /// the value can never read as valid.
    pub fn invalid(value: T, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            value,
            reason: if reason.is_empty() {
                FALLBACK_REASON.to_string()
            } else {
                reason
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        self.reason.is_empty()
    }

    /// The reason, or `None` when the value is valid.
    pub fn error(&self) -> Option<&str> {
        if self.is_valid() {
            None
        } else {
            Some(&self.reason)
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Reason reported when a rule rejects a value without saying why.
pub const FALLBACK_REASON: &str = "Invalid value";

type Check<T> = Box<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// A pure test over a candidate value.
///
/// Most rules are a predicate plus a fixed message ([`Rule::new`]). Rules whose
/// message depends on the value use [`Rule::from_fn`].
pub struct Rule<T> {
    description: String,
    check: Check<T>,
}

impl<T> Rule<T> {
    /// A rule that rejects values for which `accepts` is false, with `message`
    /// as the reason.
    pub fn new<F>(message: impl Into<String>, accepts: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let message = message.into();
        let reason = message.clone();
        Self {
            description: message,
            check: Box::new(move |value| if accepts(value) { Ok(()) } else { Err(reason.clone()) }),
        }
    }

    /// A rule that computes its own reason.
    pub fn from_fn<F>(description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            check: Box::new(check),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Test a value. `Err` carries the human-readable reason, never an empty
    /// one: the rule's description stands in for a missing message, and
    /// [`FALLBACK_REASON`] for a missing description.
    pub fn check(&self, value: &T) -> Result<(), String> {
        (self.check)(value).map_err(|reason| {
            if !reason.is_empty() {
                reason
            } else if !self.description.is_empty() {
                self.description.clone()
            } else {
                FALLBACK_REASON.to_string()
            }
        })
    }

    pub fn accepts(&self, value: &T) -> bool {
        self.check(value).is_ok()
    }
}

impl<T: 'static> Rule<T> {
    /// Lift the rule to optional values. `None` always passes.
    pub fn optional(self) -> Rule<Option<T>> {
        let Rule { description, check } = self;
        Rule::from_fn(description, move |value: &Option<T>| match value {
            Some(inner) => check(inner),
            None => Ok(()),
        })
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Apply `rules` in order. The first rejection decides the reason; if every
/// rule passes the reason is empty.
pub fn validate<T>(value: T, rules: &[Rule<T>]) -> FieldInfo<T> {
    for rule in rules {
        if let Err(reason) = rule.check(&value) {
            return FieldInfo::invalid(value, reason);
        }
    }
    FieldInfo::valid(value)
}
