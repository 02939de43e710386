use thiserror::Error;

use crate::domain::auth::models::AppId;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Errors surfaced by the credential store contract.
///
/// Not-found and conflict are tagged variants so the service can branch
/// on them exhaustively instead of inspecting error text.
#[derive(Debug, Clone, Error)]
pub enum CredentialStoreError {
    #[error("user not found")]
    UserNotFound,

    #[error("user already exists")]
    UserExists,

    #[error("storage failure: {0}")]
    Database(String),
}

/// Errors surfaced by the app registry contract.
#[derive(Debug, Clone, Error)]
pub enum AppRegistryError {
    #[error("app not found")]
    AppNotFound,

    #[error("registry failure: {0}")]
    Database(String),
}

/// Top-level error for authentication operations.
///
/// Wrong email and wrong password are unified into `InvalidCredentials`
/// so a caller cannot probe which addresses are registered. `Internal`
/// keeps the underlying cause for diagnostics; the transport layer must
/// not relay that text to callers.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("App not found: {0}")]
    AppNotFound(AppId),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}
