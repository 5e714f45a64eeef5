//! Field validation helpers.
//!
//! Bounds come from each entity's declared limits; failures surface as
//! `AppError::Validation` so the API layer maps them to 400.

use crate::error::{AppError, AppResult};

/// Require a non-blank value for `field`.
pub fn require<'a>(field: &str, value: Option<&'a str>) -> AppResult<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

/// Check character-count bounds on a value that is already present.
pub fn length(field: &str, value: &str, min: usize, max: usize) -> AppResult<()> {
    let len = value.chars().count();
    if len < min {
        return Err(AppError::Validation(format!(
            "{field} must be at least {min} characters long"
        )));
    }
    if len > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters long"
        )));
    }
    Ok(())
}

/// Require and bound-check in one step.
pub fn required_length(
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) -> AppResult<String> {
    let v = require(field, value)?;
    length(field, v, min, max)?;
    Ok(v.to_string())
}

/// Minimal shape check for email addresses. Full RFC validation is the mail
/// provider's problem; this just rejects obviously broken input early.
pub fn email(field: &str, value: &str) -> AppResult<()> {
    let v = value.trim();
    let Some((local, domain)) = v.split_once('@') else {
        return Err(AppError::Validation(format!("{field} is not a valid email")));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || v.contains(' ') {
        return Err(AppError::Validation(format!("{field} is not a valid email")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank_and_missing() {
        assert!(require("title", None).is_err());
        assert!(require("title", Some("   ")).is_err());
        assert_eq!(require("title", Some(" ok ")).unwrap(), "ok");
    }

    #[test]
    fn length_bounds_are_inclusive() {
        assert!(length("title", "abc", 3, 5).is_ok());
        assert!(length("title", "abcde", 3, 5).is_ok());
        assert!(length("title", "ab", 3, 5).is_err());
        assert!(length("title", "abcdef", 3, 5).is_err());
    }

    #[test]
    fn email_shape_check() {
        assert!(email("email", "a@b.co").is_ok());
        assert!(email("email", "nope").is_err());
        assert!(email("email", "a@b").is_err());
        assert!(email("email", "a b@c.de").is_err());
    }
}
