//! String validation helpers shared by entity constructors
//!
//! Stateless free functions. Each failure carries the field label so the
//! caller sees exactly which input was rejected and why.

use crate::error::{ModelError, ModelResult};

/// Reject an absent value
///
/// # Errors
/// `ModelError::InvalidArgument` ("cannot be null") when `value` is `None`
#[inline]
pub fn require_present<'a>(field: &'static str, value: Option<&'a str>) -> ModelResult<&'a str> {
    value.ok_or_else(|| ModelError::missing(field))
}

/// Reject a value that is empty after trimming, returning the trimmed slice
///
/// # Errors
/// `ModelError::InvalidArgument` ("cannot be empty or blank")
#[inline]
pub fn require_non_blank<'a>(field: &'static str, value: &'a str) -> ModelResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ModelError::blank(field));
    }
    Ok(trimmed)
}

/// Accept an empty value but reject one made only of whitespace
///
/// Returns the trimmed slice.
///
/// # Errors
/// `ModelError::InvalidArgument` ("cannot be blank")
#[inline]
pub fn require_trimmed_or_empty<'a>(field: &'static str, value: &'a str) -> ModelResult<&'a str> {
    let trimmed = value.trim();
    if !value.is_empty() && trimmed.is_empty() {
        return Err(ModelError::InvalidArgument {
            field,
            reason: "cannot be blank",
        });
    }
    Ok(trimmed)
}

/// Trim surrounding whitespace into an owned string
#[inline]
#[must_use]
pub fn normalize(value: &str) -> String {
    value.trim().to_owned()
}
