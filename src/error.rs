use miette::Diagnostic;
use thiserror::Error;

/// Errors raised across the accounts domain, its services and adapters.
#[derive(Error, Diagnostic, Debug)]
pub enum AccountsError {
    #[error("{0}")]
    #[diagnostic(code(accounts::validation))]
    Validation(String),

    #[error("{0}")]
    #[diagnostic(code(accounts::invalid_filter))]
    InvalidFilter(String),

    #[error("{entity} with identifier '{id}' not found")]
    #[diagnostic(code(accounts::not_found))]
    NotFound { entity: &'static str, id: String },

    #[error("Organization with domain {0} already exists")]
    #[diagnostic(code(accounts::domain_already_exists))]
    DomainAlreadyExists(String),

    #[error("User with email {0} already exists")]
    #[diagnostic(code(accounts::user_already_exists))]
    UserAlreadyExists(String),

    #[error("{0}")]
    #[diagnostic(code(accounts::conflict))]
    Conflict(String),

    #[error("{0}")]
    #[diagnostic(code(accounts::invalid_state))]
    InvalidState(String),

    #[error("{0}")]
    #[diagnostic(code(accounts::authentication))]
    Authentication(String),

    #[error("User account is not active")]
    #[diagnostic(code(accounts::inactive_user))]
    InactiveUser,

    #[error("Invalid token: {0}")]
    #[diagnostic(code(accounts::invalid_token))]
    InvalidToken(String),

    #[error("Token has expired")]
    #[diagnostic(code(accounts::expired_token))]
    ExpiredToken,

    #[error("Password hashing failed: {0}")]
    #[diagnostic(code(accounts::hashing))]
    Hashing(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(accounts::config))]
    Config(String),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(accounts::serialization))]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(accounts::io))]
    Io(#[from] std::io::Error),

    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    #[diagnostic(code(accounts::storage))]
    Storage(#[from] rocksdb::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(accounts::internal))]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl AccountsError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AccountsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = AccountsError::not_found("User", "user@example.com");
        assert_eq!(
            err.to_string(),
            "User with identifier 'user@example.com' not found"
        );
    }

    #[test]
    fn test_diagnostic_code() {
        let err = AccountsError::ExpiredToken;
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("accounts::expired_token"));
    }
}
