use std::sync::Arc;
use std::time::Duration;

use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: AuthServicePort>(
    service: Arc<S>,
    timeout: Duration,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    if request.email.is_empty() {
        return Err(Status::invalid_argument("email is required"));
    }
    if request.password.is_empty() {
        return Err(Status::invalid_argument("password is required"));
    }
    if request.app_id == 0 {
        return Err(Status::invalid_argument("app_id is required"));
    }

    let outcome = tokio::time::timeout(
        timeout,
        service.login(&request.email, &request.password, AppId(request.app_id)),
    )
    .await
    .unwrap_or(Err(AuthError::Cancelled));

    match outcome {
        Ok(token) => Ok(LoginResponse { token }),
        Err(e) => Err(e.into()),
    }
}
