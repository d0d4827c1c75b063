//! Error types for environment variable binding

use crate::value::{FieldType, Value};

/// Errors that can occur while binding environment variables into a record.
///
/// Every failure aborts the whole binding call. The variants fall into three groups:
/// - Definition errors (a bug in the caller's schema): `MalformedAnnotation`,
///   `InvalidConstraintDefinition`, `Assignment`
/// - Presence errors: `RequiredValueMissing`
/// - Data errors (the environment holds a bad value): everything else
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// The annotation of a field is empty or its key segment is unusable.
    #[error("Malformed annotation '{annotation}' on field '{field}': {reason}")]
    MalformedAnnotation {
        /// Name of the field carrying the annotation
        field: String,
        /// Raw annotation string as declared
        annotation: String,
        /// What is wrong with it
        reason: String,
    },

    /// Required environment variable is unset or empty.
    ///
    /// Occurs when the field's annotation has no `optional` clause.
    #[error("Environment variable '{key}' is required by field '{field}' but not set")]
    RequiredValueMissing {
        /// Environment variable name
        key: String,
        /// Name of the field it binds into
        field: String,
    },

    /// Value is not one of the literals listed by `oneof=`.
    #[error("Environment variable '{key}' for field '{field}' has value '{value}', must be one of [{allowed}]")]
    NotInAllowedSet {
        /// Environment variable name
        key: String,
        /// Name of the field it binds into
        field: String,
        /// Raw value read from the environment
        value: String,
        /// The comma-separated list from the annotation
        allowed: String,
    },

    /// Value is below the `min=` bound or is not numeric.
    #[error("Environment variable '{key}' for field '{field}' failed constraint min={min} with value '{value}'")]
    BelowMinimum {
        /// Environment variable name
        key: String,
        /// Name of the field it binds into
        field: String,
        /// Raw value read from the environment
        value: String,
        /// Lower bound as written in the annotation
        min: String,
    },

    /// Value is above the `max=` bound or is not numeric.
    #[error("Environment variable '{key}' for field '{field}' failed constraint max={max} with value '{value}'")]
    AboveMaximum {
        /// Environment variable name
        key: String,
        /// Name of the field it binds into
        field: String,
        /// Raw value read from the environment
        value: String,
        /// Upper bound as written in the annotation
        max: String,
    },

    /// Value does not match the `regex=` pattern.
    #[error("Environment variable '{key}' for field '{field}' does not match pattern '{pattern}'")]
    PatternMismatch {
        /// Environment variable name
        key: String,
        /// Name of the field it binds into
        field: String,
        /// Raw value read from the environment
        value: String,
        /// Pattern as written in the annotation
        pattern: String,
    },

    /// A constraint argument cannot be used (bad bound literal, bad pattern).
    #[error("Invalid constraint '{clause}' on field '{field}' (key '{key}'): {message}")]
    InvalidConstraintDefinition {
        /// Environment variable name
        key: String,
        /// Name of the field it binds into
        field: String,
        /// The clause as written, e.g. `min=abc`
        clause: String,
        /// Why the argument was rejected
        message: String,
    },

    /// Value does not satisfy the `format=` check.
    #[error("Environment variable '{key}' for field '{field}' is not a valid {format}: '{value}'")]
    InvalidFormat {
        /// Environment variable name
        key: String,
        /// Name of the field it binds into
        field: String,
        /// Raw value read from the environment
        value: String,
        /// Format name, e.g. `URL`
        format: String,
    },

    /// Value cannot be converted into the field's declared type.
    #[error("Failed to parse environment variable '{key}' for field '{field}' as {declared}: '{value}'")]
    Coercion {
        /// Environment variable name
        key: String,
        /// Name of the field it binds into
        field: String,
        /// Raw value read from the environment
        value: String,
        /// Type the field is declared with
        declared: FieldType,
    },

    /// The record refused the coerced value (unknown field or mismatched type).
    #[error("Failed to assign {actual} value to field '{field}' (key '{key}'), declared as {expected}")]
    Assignment {
        /// Environment variable name
        key: String,
        /// Name of the field it binds into
        field: String,
        /// Type the schema declares for the field
        expected: FieldType,
        /// Type of the value the record refused
        actual: FieldType,
    },
}

impl EnvError {
    /// Name of the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::MalformedAnnotation { field, .. }
            | Self::RequiredValueMissing { field, .. }
            | Self::NotInAllowedSet { field, .. }
            | Self::BelowMinimum { field, .. }
            | Self::AboveMaximum { field, .. }
            | Self::PatternMismatch { field, .. }
            | Self::InvalidConstraintDefinition { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::Coercion { field, .. }
            | Self::Assignment { field, .. } => field,
        }
    }

    /// Environment variable name the error refers to, if the annotation got far enough to have one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MalformedAnnotation { .. } => None,
            Self::RequiredValueMissing { key, .. }
            | Self::NotInAllowedSet { key, .. }
            | Self::BelowMinimum { key, .. }
            | Self::AboveMaximum { key, .. }
            | Self::PatternMismatch { key, .. }
            | Self::InvalidConstraintDefinition { key, .. }
            | Self::InvalidFormat { key, .. }
            | Self::Coercion { key, .. }
            | Self::Assignment { key, .. } => Some(key),
        }
    }

    /// Create a malformed annotation error
    pub(crate) fn malformed(
        field: impl Into<String>,
        annotation: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedAnnotation {
            field: field.into(),
            annotation: annotation.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing environment variable error
    pub(crate) fn missing(key: impl Into<String>, field: impl Into<String>) -> Self {
        Self::RequiredValueMissing {
            key: key.into(),
            field: field.into(),
        }
    }

    /// Create an assignment error from the value the record handed back
    pub(crate) fn assignment(
        key: impl Into<String>,
        field: impl Into<String>,
        // Type the schema declares for the field
        expected: FieldType,
        rejected: &Value,
    ) -> Self {
        Self::Assignment {
            key: key.into(),
            field: field.into(),
            expected,
            actual: rejected.field_type(),
        }
    }
}
