//! Form definitions backing the console routes.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

pub mod auth;
pub mod book;
pub mod catalog;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}

impl FormError {
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Per-field messages ready to be shown next to the inputs.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            Self::Validation(errors) => FieldErrors::from(errors),
            Self::InvalidField { field, message } => {
                let mut errors = FieldErrors::default();
                errors.insert(field, message.clone());
                errors
            }
        }
    }
}

/// Validation messages keyed by form field name.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// First message of every field, for a single flash summary.
    pub fn summary(&self) -> String {
        self.0
            .values()
            .filter_map(|messages| messages.first())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = FieldErrors::default();
        for (field, errors) in errors.field_errors() {
            for error in errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                // Struct-level checks are keyed by the field named in their code.
                let field = if field == "__all__" {
                    error.code.as_ref()
                } else {
                    field.as_ref()
                };
                fields.insert(field, message);
            }
        }
        fields
    }
}

/// Builds a [`ValidationError`] carrying a human-readable message.
pub(crate) fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}
