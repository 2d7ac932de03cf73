//! Result and error types for the core library

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::forms::FieldErrors;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    /// Form input rejected before anything was sent
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    /// Transport failure: connect, timeout, malformed body
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service answered with a non-success HTTP status
    #[error("Payments service returned HTTP {0}")]
    Status(u16),

    /// The service answered 200 but flagged the operation as failed
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Field errors, when this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for JSON output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: None,
        }
    }

    /// Create a failed result with context
    pub fn fail_with_context(
        error: impl Into<String>,
        context: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: Some(context),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(Error::Validation(errors)) => {
                // Field messages go into context so callers can render them inline
                let fields = errors
                    .iter()
                    .map(|(field, msg)| (field.name().to_string(), serde_json::Value::from(msg)))
                    .collect::<serde_json::Map<_, _>>();
                let mut context = HashMap::new();
                context.insert("fields".to_string(), serde_json::Value::Object(fields));
                Self::fail_with_context(Error::Validation(errors).to_string(), context)
            }
            Err(e) => Self::fail(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forms::SigninForm;

    #[test]
    fn test_operation_result_ok() {
        let result: OperationResult<i32> = OperationResult::ok(42);
        assert!(result.success);
        assert_eq!(result.data, Some(42));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_from_result() {
        let ok: Result<i32> = Ok(42);
        let result: OperationResult<i32> = ok.into();
        assert!(result.success);

        let err: Result<i32> = Err(Error::Status(503));
        let result: OperationResult<i32> = err.into();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("HTTP 503"));
    }

    #[test]
    fn test_validation_failure_carries_fields() {
        let errors = SigninForm::new("nope", "").validate().unwrap_err();
        let result: OperationResult<()> = Err(Error::from(errors)).into();
        assert!(!result.success);

        let context = result.context.unwrap();
        assert_eq!(context["fields"]["email"], "Invalid email address.");
        assert_eq!(context["fields"]["password"], "Password is required.");
    }
}
