//! File name validation for uploaded content.
//!
//! Valid file names:
//! - Are not empty
//! - Contain no path separators (`/`, `\`)
//! - Do not start with a dot (no hidden files, no `..`)
//! - Contain no control characters
//! - Have no leading or trailing whitespace

use thiserror::Error;

/// Validates a content file name.
///
/// # Examples
/// ```
/// use contentapp::validation::file_name::validate_file_name;
///
/// assert!(validate_file_name("report.pdf").is_ok());
/// assert!(validate_file_name("Annual Report 2020.docx").is_ok());
///
/// assert!(validate_file_name("").is_err());
/// assert!(validate_file_name(".hidden").is_err());
/// assert!(validate_file_name("a/b.pdf").is_err());
/// assert!(validate_file_name(" padded.pdf").is_err());
/// ```
pub fn validate_file_name(name: &str) -> Result<(), FileNameError> {
    if name.is_empty() {
        return Err(FileNameError::Empty);
    }

    if name.trim() != name {
        return Err(FileNameError::SurroundingWhitespace);
    }

    if name.starts_with('.') {
        return Err(FileNameError::LeadingDot);
    }

    for ch in name.chars() {
        if ch == '/' || ch == '\\' {
            return Err(FileNameError::PathSeparator(ch));
        }
        if ch.is_control() {
            return Err(FileNameError::ControlCharacter(ch));
        }
    }

    Ok(())
}

/// Error type for file name validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileNameError {
    #[error("file name cannot be empty")]
    Empty,
    #[error("file name cannot start or end with whitespace")]
    SurroundingWhitespace,
    #[error("file name cannot start with a dot")]
    LeadingDot,
    #[error("file name cannot contain path separator '{0}'")]
    PathSeparator(char),
    #[error("file name contains control character {0:?}")]
    ControlCharacter(char),
}
