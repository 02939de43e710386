use std::sync::Arc;
use std::time::Duration;

use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: Arc<S>,
    timeout: Duration,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    if request.email.is_empty() {
        return Err(Status::invalid_argument("email is required"));
    }
    if request.password.is_empty() {
        return Err(Status::invalid_argument("password is required"));
    }

    let outcome = tokio::time::timeout(
        timeout,
        service.register(&request.email, &request.password),
    )
    .await
    // Dropping the inner future aborts the pending store call
    .unwrap_or(Err(AuthError::Cancelled));

    match outcome {
        Ok(user_id) => Ok(RegisterResponse { user_id: user_id.0 }),
        Err(e) => Err(e.into()),
    }
}
