use thiserror::Error;

/// A single field-level validation failure, collected from the
/// `validator` derive on request DTOs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type that represents all possible errors in the system.
///
/// The domain contract knows exactly two kinds: `NotFound` (a referenced
/// identifier does not resolve to an existing record) and
/// `PreconditionFailed` (the request violates a domain rule — invalid
/// country, invalid name length, or an unassociated city/supermarket pair).
/// The remaining variants cover infrastructure failures and request-shape
/// validation, and never originate from the domain services.
#[derive(Error, Debug)]
pub enum AppError {
    /// Referenced record does not exist.
    /// The display string is part of the client-facing contract
    /// ("city not found", "supermarket not found").
    #[error("{entity} not found")]
    NotFound { entity: String, id: String },

    /// Domain precondition violated; maps to HTTP 412.
    #[error("{message}")]
    PreconditionFailed { message: String },

    /// Request body failed DTO validation
    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Builds the NotFound error for a missing record.
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Builds a PreconditionFailed error with the given contract message.
    pub fn precondition_failed(message: &str) -> Self {
        AppError::PreconditionFailed {
            message: message.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        match error {
            // Repositories use `.optional()` for lookups, so a bare NotFound
            // here means a RETURNING query affected zero rows.
            diesel::result::Error::NotFound => AppError::not_found("resource", "unknown"),
            other => AppError::Database {
                operation: "database operation".to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }
}

impl From<bb8::RunError<diesel_async::pooled_connection::PoolError>> for AppError {
    fn from(error: bb8::RunError<diesel_async::pooled_connection::PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(error: config::ConfigError) -> Self {
        AppError::Configuration {
            key: "configuration".to_string(),
            source: anyhow::Error::from(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let errors = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| ValidationFieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value for {field}")),
                })
            })
            .collect();
        AppError::ValidationErrors { errors }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_matches_contract() {
        let err = AppError::not_found("city", "4a9f");
        assert_eq!(err.to_string(), "city not found");

        let err = AppError::not_found("supermarket", "4a9f");
        assert_eq!(err.to_string(), "supermarket not found");
    }

    #[test]
    fn precondition_failed_carries_verbatim_message() {
        let err = AppError::precondition_failed("supermarket not associated with city");
        assert_eq!(err.to_string(), "supermarket not associated with city");
    }

    #[test]
    fn validator_errors_are_flattened_per_field() {
        use validator::Validate;

        #[derive(Validate)]
        struct Payload {
            #[validate(url(message = "website must be a valid URL"))]
            website: String,
        }

        let payload = Payload {
            website: "not a url".to_string(),
        };
        let err = AppError::from(payload.validate().unwrap_err());
        match err {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "website");
                assert_eq!(errors[0].message, "website must be a valid URL");
            }
            other => panic!("expected ValidationErrors, got {other:?}"),
        }
    }
}
