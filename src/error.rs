use std::path::PathBuf;

/// Errors raised while compiling a filter condition to SQL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// The JSON handler claimed a condition whose operator it cannot render.
    #[error("Unsupported JSON operator: {0}")]
    UnsupportedJsonOperator(String),

    /// The array handler claimed a condition whose operator it cannot render.
    #[error("Unsupported array operator: {0}")]
    UnsupportedArrayOperator(String),

    /// A comma-encoded range is missing one of its bounds.
    #[error(
        "Invalid range for column '{column}': expected two comma-separated values, got '{value}'"
    )]
    MalformedRange {
        /// Column the range was applied to.
        column: String,
        /// Raw value as supplied by the caller.
        value: String,
    },

    /// The condition names a column absent from the filter context.
    #[error("Unknown filter column: {0}")]
    UnknownColumn(String),

    /// No handler and no fallback operator matched.
    #[error("Unsupported filter operator: {0}")]
    UnsupportedOperator(String),

    /// The value shape does not fit the operator (e.g. `in` without a list).
    #[error("Invalid value for operator '{operator}' on column '{column}': {reason}")]
    InvalidValue {
        /// Column the condition targets.
        column: String,
        /// Operator token of the condition.
        operator: String,
        /// What was wrong with the value.
        reason: String,
    },
}

impl FilterError {
    /// True for errors caused by caller input, as opposed to a mismatch
    /// between the handler registry and a handler.
    pub fn is_user_error(&self) -> bool {
        match self {
            FilterError::MalformedRange { .. }
            | FilterError::UnknownColumn(_)
            | FilterError::UnsupportedOperator(_)
            | FilterError::InvalidValue { .. } => true,
            FilterError::UnsupportedJsonOperator(_) | FilterError::UnsupportedArrayOperator(_) => {
                false
            }
        }
    }
}

/// Errors raised while building or decoding a batched permission query.
#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    /// The `type` tag names no known check.
    #[error("Unknown permission check type: {0}")]
    UnknownCheckType(String),

    /// The `type` tag is known but the remaining fields do not decode.
    #[error("Invalid '{kind}' permission check: {reason}")]
    InvalidCheck {
        /// Check type tag.
        kind: String,
        /// Decoder message.
        reason: String,
    },

    /// A result row could not be decoded.
    #[error("Invalid permission result row: {0}")]
    InvalidRow(String),
}

/// Errors raised while loading [`crate::config::CompilerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid JSON for the expected shape.
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The permission schema cannot be spliced into SQL safely.
    #[error("Invalid permission schema '{0}': expected a lower-case SQL identifier")]
    InvalidSchema(String),

    /// The timezone setting is neither `local`, `utc`, nor a `+HH:MM` offset.
    #[error("Invalid timezone '{0}': expected 'local', 'utc' or an offset like '+02:00'")]
    InvalidTimezone(String),
}
