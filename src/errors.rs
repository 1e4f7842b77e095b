//! Error handling for the energy optimizer
//!
//! Every fallible operation in the crate returns [`OptimizerResult`]. The
//! evaluator itself is total over finite numbers, so most variants belong to
//! the surfaces around it (input parsing, configuration, the HTTP layer).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Main error type for the energy optimizer
#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    #[error("Weight vector {layer} has {actual} entries, expected {expected}")]
    WeightShape {
        layer: String,
        expected: usize,
        actual: usize,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Resource not found: {resource} - {id}")]
    NotFound { resource: String, id: String },

    #[error("Lock poisoned: {resource}")]
    MutexPoisoned { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Result alias used throughout the crate
pub type OptimizerResult<T> = Result<T, OptimizerError>;

impl OptimizerError {
    /// Create an invalid input error for a named field
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a weight shape error
    pub fn weight_shape(layer: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::WeightShape {
            layer: layer.into(),
            expected,
            actual,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            OptimizerError::InvalidInput { .. }
            | OptimizerError::WeightShape { .. }
            | OptimizerError::Serialization { .. } => StatusCode::BAD_REQUEST,
            OptimizerError::NotFound { .. } => StatusCode::NOT_FOUND,
            OptimizerError::Config { .. }
            | OptimizerError::Io { .. }
            | OptimizerError::MutexPoisoned { .. }
            | OptimizerError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for OptimizerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Safe mutex locking that reports poisoning instead of panicking
pub trait SafeLock<T: ?Sized> {
    fn safe_lock(&self) -> OptimizerResult<std::sync::MutexGuard<'_, T>>;
}

impl<T: ?Sized> SafeLock<T> for std::sync::Mutex<T> {
    fn safe_lock(&self) -> OptimizerResult<std::sync::MutexGuard<'_, T>> {
        self.lock().map_err(|_| OptimizerError::MutexPoisoned {
            resource: "mutex".to_string(),
        })
    }
}

/// Safe RwLock read access
pub trait SafeReadLock<T: ?Sized> {
    fn safe_read(&self) -> OptimizerResult<std::sync::RwLockReadGuard<'_, T>>;
}

impl<T: ?Sized> SafeReadLock<T> for std::sync::RwLock<T> {
    fn safe_read(&self) -> OptimizerResult<std::sync::RwLockReadGuard<'_, T>> {
        self.read().map_err(|_| OptimizerError::MutexPoisoned {
            resource: "rwlock_read".to_string(),
        })
    }
}

/// Safe RwLock write access
pub trait SafeWriteLock<T: ?Sized> {
    fn safe_write(&self) -> OptimizerResult<std::sync::RwLockWriteGuard<'_, T>>;
}

impl<T: ?Sized> SafeWriteLock<T> for std::sync::RwLock<T> {
    fn safe_write(&self) -> OptimizerResult<std::sync::RwLockWriteGuard<'_, T>> {
        self.write().map_err(|_| OptimizerError::MutexPoisoned {
            resource: "rwlock_write".to_string(),
        })
    }
}

impl From<serde_json::Error> for OptimizerError {
    fn from(err: serde_json::Error) -> Self {
        OptimizerError::serialization("json_operation", err)
    }
}

impl From<std::io::Error> for OptimizerError {
    fn from(err: std::io::Error) -> Self {
        OptimizerError::io("io_operation", err)
    }
}

impl From<figment::Error> for OptimizerError {
    fn from(err: figment::Error) -> Self {
        OptimizerError::config(err.to_string())
    }
}
