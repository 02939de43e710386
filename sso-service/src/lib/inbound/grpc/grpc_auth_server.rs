use std::sync::Arc;
use std::time::Duration;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::login;
use super::handlers::register;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::auth_server::Auth;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

/// gRPC adapter exposing the authentication service.
///
/// Generic over the service port so tests can run it against in-memory
/// contract implementations. Each request runs under `request_timeout`.
pub struct AuthGrpcService<S: AuthServicePort> {
    service: Arc<S>,
    request_timeout: Duration,
}

impl<S: AuthServicePort> AuthGrpcService<S> {
    pub fn new(service: Arc<S>, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }
}

#[tonic::async_trait]
impl<S: AuthServicePort> Auth for AuthGrpcService<S> {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let response = register::register(
            Arc::clone(&self.service),
            self.request_timeout,
            request.into_inner(),
        )
        .await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response = login::login(
            Arc::clone(&self.service),
            self.request_timeout,
            request.into_inner(),
        )
        .await?;
        Ok(Response::new(response))
    }
}
