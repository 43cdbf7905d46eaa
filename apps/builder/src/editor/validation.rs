//! Required-field checks run before anything is written to the document.
//!
//! A failing check produces a `ValidationError` listing every offending field
//! so callers can surface all of them at once. The document is never touched
//! when validation fails.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("invalid fields: {}", field_names(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(field: &'static str, message: &str) -> Self {
        Self {
            fields: vec![FieldError {
                field,
                message: message.to_string(),
            }],
        }
    }

    #[cfg(test)]
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

fn field_names(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.field)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Accumulates field errors; `finish` turns them into a result.
#[derive(Debug, Default)]
pub struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whitespace-only values count as empty.
    pub fn require(mut self, field: &'static str, value: &str, message: &str) -> Self {
        if value.trim().is_empty() {
            self.push(field, message);
        }
        self
    }

    pub fn require_lines(mut self, field: &'static str, lines: &[String], message: &str) -> Self {
        if lines.iter().all(|l| l.trim().is_empty()) {
            self.push(field, message);
        }
        self
    }

    pub fn email(mut self, field: &'static str, value: &str) -> Self {
        if !is_valid_email(value) {
            self.push(field, "Invalid email");
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                fields: self.errors,
            })
        }
    }

    fn push(&mut self, field: &'static str, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }
}

/// Syntactic email check: `local@domain.tld`, no whitespace, one `@`, and a
/// domain made of non-empty dot-separated labels.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}
