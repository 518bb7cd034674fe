//! Sanitizers and field validators shared by the submission forms
//!
//! Forms are sanitized first (trim, HTML escape) and then checked with
//! `validator`. Failures are flattened into an ordered list of [`FieldError`]
//! following the declaration order of the form's fields.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Za-z]+$").unwrap());

/// A single rejected field, in the shape clients of the catalog already consume
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    /// Always `body`
    pub location: String,
    /// Name of the offending field
    pub param: String,
    /// Sanitized value that was checked
    pub value: String,
    /// Human readable message
    pub msg: String,
}

/// Trims surrounding whitespace
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Replaces HTML-significant characters with their entities
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            other => out.push(other),
        }
    }
    out
}

/// Trim then escape, the chain applied to every free-text field
pub fn clean(value: &str) -> String {
    escape(value.trim())
}

/// Optional fields treat empty strings as absent
pub fn optional(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Parses an ISO-8601 date or date-time and keeps the calendar date
pub fn parse_iso8601_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

/// Longest person name the catalog stores, matching the column width
pub const NAME_MAX_CHARS: usize = 100;

pub fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if ALPHANUMERIC.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

/// Person name check: at most [`NAME_MAX_CHARS`] characters, then alphanumeric.
///
/// Messages are labelled with the field, e.g. "First name".
pub fn validate_name(value: &str, label: &str) -> Result<(), ValidationError> {
    if value.chars().count() > NAME_MAX_CHARS {
        let mut err = ValidationError::new("length");
        err.message = Some(Cow::from(format!(
            "{} must be at most {} characters.",
            label, NAME_MAX_CHARS
        )));
        return Err(err);
    }
    validate_alphanumeric(value).map_err(|mut err| {
        err.message = Some(Cow::from(format!("{} has non-alphanumeric characters.", label)));
        err
    })
}

pub fn validate_iso8601(value: &str) -> Result<(), ValidationError> {
    match parse_iso8601_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("iso8601")),
    }
}

/// Empty references are reported by the required check, not here
pub fn validate_reference(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("reference"))
    }
}

pub fn validate_references(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|v| Uuid::parse_str(v).is_ok()) {
        Ok(())
    } else {
        Err(ValidationError::new("reference"))
    }
}

/// Flattens `validator` output into field-ordered [`FieldError`]s.
///
/// `fields` pairs each field name with the sanitized value that was checked.
pub fn collect_errors(errors: &ValidationErrors, fields: &[(&str, String)]) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut out = Vec::new();
    for (name, value) in fields {
        let Some(list) = by_field.get(*name) else {
            continue;
        };
        for error in list.iter() {
            let msg = error
                .message
                .clone()
                .unwrap_or_else(|| Cow::from(format!("Invalid value for {}", name)));
            out.push(FieldError {
                location: "body".to_string(),
                param: name.to_string(),
                value: value.clone(),
                msg: msg.into_owned(),
            });
        }
    }
    out
}
