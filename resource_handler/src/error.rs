use thiserror::Error;

pub type ResourceResult<T> = Result<T, ResourceError>;

pub const INSUFFICIENT_PARAMETERS: &str = "Insufficient parameters";

/// Failures raised while handling a resource request.
///
/// Every kind except `Store` is the caller's fault and maps to 400 at the
/// HTTP boundary. `Store` is opaque to the caller and maps to 500.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("Resource with identifier {identifier} not found")]
    NotFound { identifier: String },

    #[error("Resource with identifier {identifier} has no {field} in DB")]
    Integrity { identifier: String, field: &'static str },

    #[error("store error: {0}")]
    Store(String),
}

impl ResourceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ResourceError::BadRequest(message.into())
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ResourceError::Validation { field, message: message.into() }
    }

    pub fn not_found(identifier: &str) -> Self {
        ResourceError::NotFound { identifier: identifier.to_owned() }
    }

    pub fn store(err: impl std::fmt::Display) -> Self {
        ResourceError::Store(err.to_string())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ResourceError::Store(_) => 500,
            _ => 400,
        }
    }
}
