//! Field rules shared by the insert and patch types.
//!
//! These are plugged into `#[derive(Validate)]` through `custom(function = ...)`
//! so that the HTTP layer and the CLI reject the same inputs.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use validator::{ValidateEmail, ValidationError};

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid regex"));

pub fn hex_color(value: &str) -> Result<(), ValidationError> {
    if HEX_COLOR.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color")
            .with_message(Cow::Borrowed("must be a #RRGGBB colour")))
    }
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("not_blank").with_message(Cow::Borrowed("must not be empty")))
    } else {
        Ok(())
    }
}

pub fn json_text(value: &str) -> Result<(), ValidationError> {
    serde_json::from_str::<serde_json::Value>(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("json").with_message(Cow::Borrowed("must be valid JSON")))
}

pub fn non_empty_items(items: &[String]) -> Result<(), ValidationError> {
    if items.iter().any(|item| item.trim().is_empty()) {
        Err(ValidationError::new("non_empty_items")
            .with_message(Cow::Borrowed("list entries must not be empty")))
    } else {
        Ok(())
    }
}

pub fn is_email(value: &str) -> bool {
    value.validate_email()
}

/// Collapse optional form input: whitespace-only strings become `None`.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_accepts_six_digit_codes_only() {
        assert!(hex_color("#7c3aed").is_ok());
        assert!(hex_color("#06B6D4").is_ok());
        assert!(hex_color("7c3aed").is_err());
        assert!(hex_color("#fff").is_err());
        assert!(hex_color("#7c3aedff").is_err());
    }

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(not_blank("Licensing").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn json_text_requires_parseable_json() {
        assert!(json_text(r#"{"stats":[]}"#).is_ok());
        assert!(json_text("[1,2]").is_ok());
        assert!(json_text("{not json").is_err());
    }

    #[test]
    fn blank_to_none_trims() {
        assert_eq!(blank_to_none(Some("  ".into())), None);
        assert_eq!(blank_to_none(Some(" Acme ".into())), Some("Acme".into()));
        assert_eq!(blank_to_none(None), None);
    }

    #[test]
    fn email_check() {
        assert!(is_email("founder@startup.ae"));
        assert!(!is_email("founder-at-startup"));
    }
}
