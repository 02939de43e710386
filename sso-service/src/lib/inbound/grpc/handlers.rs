use tonic::Status;

use crate::domain::auth::errors::AuthError;

pub mod login;
pub mod register;

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail(_) | AuthError::EmptyPassword => {
                Status::invalid_argument(err.to_string())
            }
            AuthError::InvalidCredentials => Status::unauthenticated("invalid credentials"),
            AuthError::UserAlreadyExists => Status::already_exists("user already exists"),
            AuthError::AppNotFound(_) => Status::not_found("app not found"),
            AuthError::Cancelled => Status::deadline_exceeded("request timed out"),
            AuthError::Internal(cause) => {
                // Cause goes to the log only; callers get an opaque status
                tracing::error!(error = %cause, "internal error");
                Status::internal("internal error")
            }
        }
    }
}
