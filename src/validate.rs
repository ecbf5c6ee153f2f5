//! Required-field validation for request payloads.
//!
//! Presence is explicit rather than falsy: a string field counts as present
//! when it is supplied and non-blank, a numeric field counts as present
//! whenever it is supplied at all (zero is a legitimate value).

use crate::error::ApiError;

/// Outcome of a required-field check.
#[derive(Debug, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    pub missing: Vec<&'static str>,
}

/// Check a list of `(field name, is present)` pairs and report every
/// field that is missing.
pub fn required(fields: &[(&'static str, bool)]) -> Validation {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    Validation {
        is_valid: missing.is_empty(),
        missing,
    }
}

/// Same check, but surfaced as the error the dispatcher maps to 400.
pub fn require(fields: &[(&'static str, bool)]) -> Result<(), ApiError> {
    let validation = required(fields);
    if validation.is_valid {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Missing required fields: {}",
            validation.missing.join(", ")
        )))
    }
}

/// Collapse blank strings to `None` so they store as NULL on insert and
/// keep the stored value on update.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_present_is_valid() {
        let v = required(&[("name", true), ("cui", true)]);
        assert!(v.is_valid);
        assert!(v.missing.is_empty());
    }

    #[test]
    fn reports_every_missing_field() {
        let v = required(&[("name", false), ("cui", true), ("item_qt", false)]);
        assert!(!v.is_valid);
        assert_eq!(v.missing, vec!["name", "item_qt"]);
    }

    #[test]
    fn require_formats_field_names() {
        let err = require(&[("name", false), ("cui", false)]).unwrap_err();
        match err {
            ApiError::Validation(msg) => {
                assert_eq!(msg, "Missing required fields: name, cui")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn blank_strings_collapse_to_none() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("RO123".into())), Some("RO123".into()));
    }
}
