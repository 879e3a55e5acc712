//! Shared input validation.
//!
//! Request DTOs derive [`validator::Validate`] with per-field rules; handlers
//! call [`validate_input`] once before touching the database. Field errors
//! are flattened into a single message so the API can return it verbatim.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// Run a DTO's validation rules, mapping failures to [`CoreError::Validation`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(flatten_errors(&errors)))
}

/// Flatten nested validation errors into `"field: message; other: message"`.
///
/// Nested paths use dots and list indices (`items[2].quantity`). Fields are
/// sorted so the message is stable across runs.
pub fn flatten_errors(errors: &ValidationErrors) -> String {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort();
    out.join("; ")
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            // Struct-level rules report under `__all__`; print them bare.
            ValidationErrorsKind::Field(list) if &**field == "__all__" => {
                out.extend(list.iter().map(describe));
            }
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    out.push(format!("{path}: {}", describe(err)));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect(inner, &format!("{path}[{idx}]"), out);
                }
            }
        }
    }
}

fn describe(err: &ValidationError) -> String {
    if let Some(msg) = &err.message {
        return msg.to_string();
    }
    match err.code.as_ref() {
        "length" => "has an invalid length".to_string(),
        "email" => "must be a valid email address".to_string(),
        "range" => "is out of range".to_string(),
        other => format!("is invalid ({other})"),
    }
}

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("must not be blank"));
        return Err(err);
    }
    Ok(())
}

/// Turn a free-text search box value into an `ILIKE` pattern.
///
/// Returns `None` for empty input. `%`, `_` and `\` are escaped so they
/// match literally.
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    let term = search?.trim();
    if term.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

/// Trim a required string field.
pub fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

/// Trim an optional string field; blank values collapse to `None`.
pub fn trimmed_opt(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}
