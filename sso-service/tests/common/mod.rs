use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use sso_service::domain::auth::errors::AppRegistryError;
use sso_service::domain::auth::errors::CredentialStoreError;
use sso_service::domain::auth::models::App;
use sso_service::domain::auth::models::AppId;
use sso_service::domain::auth::models::EmailAddress;
use sso_service::domain::auth::models::User;
use sso_service::domain::auth::models::UserId;
use sso_service::domain::auth::ports::AppRegistry;
use sso_service::domain::auth::ports::CredentialStore;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::proto::auth_client::AuthClient;
use sso_service::proto::auth_server::AuthServer;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::transport::Endpoint;
use tonic::transport::Server;

pub const TEST_APP_ID: i64 = 1;
pub const TEST_APP_SECRET: &str = "test-secret-at-least-32-bytes-long!!";
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Test application that spawns a real gRPC server over in-memory
/// contract implementations
pub struct TestApp {
    pub client: AuthClient<Channel>,
}

impl TestApp {
    /// Spawn the gRPC server on a random port and return a connected client
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = listener.local_addr().expect("Failed to read local addr");

        let store = Arc::new(InMemoryCredentialStore::new());
        let registry = Arc::new(InMemoryAppRegistry::with_app(App {
            id: AppId(TEST_APP_ID),
            name: "test-app".to_string(),
            secret: TEST_APP_SECRET.to_string(),
        }));

        let service = Arc::new(AuthService::new(
            store,
            registry,
            chrono::Duration::seconds(TOKEN_TTL_SECS),
        ));
        let grpc_service = AuthGrpcService::new(service, Duration::from_secs(5));

        tokio::spawn(async move {
            Server::builder()
                .add_service(AuthServer::new(grpc_service))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("gRPC server failed");
        });

        let channel = Endpoint::from_shared(format!("http://{}", address))
            .expect("Invalid endpoint")
            .connect_lazy();

        Self {
            client: AuthClient::new(channel),
        }
    }
}

/// Credential store backed by a mutex-guarded map.
///
/// The lock makes add_user check-and-insert atomic, matching the
/// uniqueness guarantee the Postgres store gets from its constraint.
pub struct InMemoryCredentialStore {
    state: Mutex<StoreState>,
}

struct StoreState {
    next_id: i64,
    users_by_email: HashMap<String, User>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                next_id: 1,
                users_by_email: HashMap::new(),
            }),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn add_user(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<UserId, CredentialStoreError> {
        let mut state = self.state.lock().expect("store lock poisoned");

        if state.users_by_email.contains_key(email.as_str()) {
            return Err(CredentialStoreError::UserExists);
        }

        let id = UserId(state.next_id);
        state.next_id += 1;
        state.users_by_email.insert(
            email.as_str().to_string(),
            User {
                id,
                email: email.clone(),
                password_hash: password_hash.to_string(),
            },
        );

        Ok(id)
    }

    async fn user_by_email(&self, email: &EmailAddress) -> Result<User, CredentialStoreError> {
        let state = self.state.lock().expect("store lock poisoned");

        state
            .users_by_email
            .get(email.as_str())
            .cloned()
            .ok_or(CredentialStoreError::UserNotFound)
    }
}

pub struct InMemoryAppRegistry {
    apps: HashMap<i64, App>,
}

impl InMemoryAppRegistry {
    pub fn with_app(app: App) -> Self {
        let mut apps = HashMap::new();
        apps.insert(app.id.0, app);
        Self { apps }
    }
}

#[async_trait]
impl AppRegistry for InMemoryAppRegistry {
    async fn app_by_id(&self, id: AppId) -> Result<App, AppRegistryError> {
        self.apps
            .get(&id.0)
            .cloned()
            .ok_or(AppRegistryError::AppNotFound)
    }
}
