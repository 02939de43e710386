use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessClaims;
use auth::PasswordHasher;
use auth::TokenSigner;
use chrono::Duration;

use crate::domain::auth::errors::AppRegistryError;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::CredentialStoreError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AppRegistry;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialStore;

/// Domain service implementation for authentication operations.
///
/// Stateless orchestrator over the injected credential store and app
/// registry; safe for concurrent use. Shared mutable state (user rows,
/// app secrets) lives entirely behind the contracts.
pub struct AuthService<CS, AR>
where
    CS: CredentialStore,
    AR: AppRegistry,
{
    store: Arc<CS>,
    apps: Arc<AR>,
    password_hasher: PasswordHasher,
    token_ttl: Duration,
}

impl<CS, AR> AuthService<CS, AR>
where
    CS: CredentialStore,
    AR: AppRegistry,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `apps` - App registry implementation
    /// * `token_ttl` - Lifetime applied to every issued token
    pub fn new(store: Arc<CS>, apps: Arc<AR>, token_ttl: Duration) -> Self {
        Self {
            store,
            apps,
            password_hasher: PasswordHasher::new(),
            token_ttl,
        }
    }
}

#[async_trait]
impl<CS, AR> AuthServicePort for AuthService<CS, AR>
where
    CS: CredentialStore,
    AR: AppRegistry,
{
    async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        let email = EmailAddress::new(email.to_string())?;
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        tracing::info!(email = %email, "registering user");

        let password_hash = self
            .password_hasher
            .hash(password)
            .map_err(|e| AuthError::Internal(format!("password hashing failed: {}", e)))?;

        let user_id = match self.store.add_user(&email, &password_hash).await {
            Ok(id) => id,
            Err(CredentialStoreError::UserExists) => return Err(AuthError::UserAlreadyExists),
            Err(e) => return Err(AuthError::Internal(format!("failed to add user: {}", e))),
        };

        tracing::info!(user_id = %user_id, "user registered");

        Ok(user_id)
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
        app_id: AppId,
    ) -> Result<String, AuthError> {
        // A malformed address can belong to no account; login reveals
        // nothing about why the credentials were rejected
        let email =
            EmailAddress::new(email.to_string()).map_err(|_| AuthError::InvalidCredentials)?;

        tracing::info!(email = %email, app_id = %app_id, "authenticating user");

        let user = match self.store.user_by_email(&email).await {
            Ok(user) => user,
            Err(CredentialStoreError::UserNotFound) => {
                tracing::warn!(email = %email, "login attempt for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(AuthError::Internal(format!("failed to look up user: {}", e))),
        };

        let matched = self
            .password_hasher
            .verify(password, &user.password_hash)
            .map_err(|e| AuthError::Internal(format!("password verification failed: {}", e)))?;

        if !matched {
            tracing::warn!(email = %email, "login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        // Credential checks above must stay ahead of app resolution so a
        // bogus app id cannot be used to probe account existence
        let app = match self.apps.app_by_id(app_id).await {
            Ok(app) => app,
            Err(AppRegistryError::AppNotFound) => return Err(AuthError::AppNotFound(app_id)),
            Err(e) => return Err(AuthError::Internal(format!("failed to resolve app: {}", e))),
        };

        let claims = AccessClaims::new(user.id.0, user.email.as_str(), app.id.0, self.token_ttl);
        let token = TokenSigner::new(app.secret.as_bytes())
            .encode(&claims)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {}", e)))?;

        tracing::info!(user_id = %user.id, app_id = %app.id, "user logged in");

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::auth::models::App;
    use crate::domain::auth::models::User;

    // Define mocks in the test module using mockall
    mock! {
        pub TestCredentialStore {}

        #[async_trait]
        impl CredentialStore for TestCredentialStore {
            async fn add_user(&self, email: &EmailAddress, password_hash: &str) -> Result<UserId, CredentialStoreError>;
            async fn user_by_email(&self, email: &EmailAddress) -> Result<User, CredentialStoreError>;
        }
    }

    mock! {
        pub TestAppRegistry {}

        #[async_trait]
        impl AppRegistry for TestAppRegistry {
            async fn app_by_id(&self, id: AppId) -> Result<App, AppRegistryError>;
        }
    }

    const TEST_SECRET: &str = "test_secret_key_at_least_32_bytes!";

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::new(raw.to_string()).unwrap()
    }

    fn test_app() -> App {
        App {
            id: AppId(1),
            name: "test-app".to_string(),
            secret: TEST_SECRET.to_string(),
        }
    }

    fn stored_user(password: &str) -> User {
        User {
            id: UserId(42),
            email: email("alice@example.com"),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
        }
    }

    fn auth_service(
        store: MockTestCredentialStore,
        apps: MockTestAppRegistry,
    ) -> AuthService<MockTestCredentialStore, MockTestAppRegistry> {
        AuthService::new(Arc::new(store), Arc::new(apps), Duration::seconds(3600))
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut store = MockTestCredentialStore::new();
        let apps = MockTestAppRegistry::new();

        store
            .expect_add_user()
            .withf(|email, hash| {
                email.as_str() == "alice@example.com" && hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|_, _| Ok(UserId(1)));

        let service = auth_service(store, apps);

        let result = service.register("alice@example.com", "password123").await;
        assert_eq!(result.unwrap(), UserId(1));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut store = MockTestCredentialStore::new();
        let apps = MockTestAppRegistry::new();

        store
            .expect_add_user()
            .times(1)
            .returning(|_, _| Err(CredentialStoreError::UserExists));

        let service = auth_service(store, apps);

        let result = service.register("alice@example.com", "password123").await;
        assert!(matches!(result, Err(AuthError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let mut store = MockTestCredentialStore::new();
        let apps = MockTestAppRegistry::new();

        store.expect_add_user().times(0);

        let service = auth_service(store, apps);

        let result = service.register("not-an-email", "password123").await;
        assert!(matches!(result, Err(AuthError::InvalidEmail(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_empty_password() {
        let mut store = MockTestCredentialStore::new();
        let apps = MockTestAppRegistry::new();

        store.expect_add_user().times(0);

        let service = auth_service(store, apps);

        let result = service.register("alice@example.com", "").await;
        assert!(matches!(result, Err(AuthError::EmptyPassword)));
    }

    #[tokio::test]
    async fn test_register_store_failure_is_internal() {
        let mut store = MockTestCredentialStore::new();
        let apps = MockTestAppRegistry::new();

        store
            .expect_add_user()
            .times(1)
            .returning(|_, _| Err(CredentialStoreError::Database("connection reset".to_string())));

        let service = auth_service(store, apps);

        let result = service.register("alice@example.com", "password123").await;
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }

    #[tokio::test]
    async fn test_login_success_issues_app_scoped_token() {
        let mut store = MockTestCredentialStore::new();
        let mut apps = MockTestAppRegistry::new();

        let user = stored_user("password123");
        store
            .expect_user_by_email()
            .withf(|email| email.as_str() == "alice@example.com")
            .times(1)
            .returning(move |_| Ok(user.clone()));

        apps.expect_app_by_id()
            .with(eq(AppId(1)))
            .times(1)
            .returning(|_| Ok(test_app()));

        let service = auth_service(store, apps);

        let issued_at = Utc::now();
        let token = service
            .login("alice@example.com", "password123", AppId(1))
            .await
            .expect("Login failed");

        let claims = TokenSigner::new(TEST_SECRET.as_bytes())
            .decode(&token)
            .expect("Failed to decode issued token");

        assert_eq!(claims.uid, 42);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.app_id, 1);
        let expected_exp = issued_at.timestamp() + 3600;
        assert!((claims.exp - expected_exp).abs() <= 1);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut store = MockTestCredentialStore::new();
        let mut apps = MockTestAppRegistry::new();

        let user = stored_user("password123");
        store
            .expect_user_by_email()
            .times(1)
            .returning(move |_| Ok(user.clone()));

        apps.expect_app_by_id().times(0);

        let service = auth_service(store, apps);

        let result = service
            .login("alice@example.com", "wrong_password", AppId(1))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut store = MockTestCredentialStore::new();
        let mut apps = MockTestAppRegistry::new();

        store
            .expect_user_by_email()
            .times(1)
            .returning(|_| Err(CredentialStoreError::UserNotFound));

        // Credential failure must be reported before the app is ever
        // resolved, even for a valid app id
        apps.expect_app_by_id().times(0);

        let service = auth_service(store, apps);

        let result = service
            .login("nobody@example.com", "password123", AppId(1))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_app() {
        let mut store = MockTestCredentialStore::new();
        let mut apps = MockTestAppRegistry::new();

        let user = stored_user("password123");
        store
            .expect_user_by_email()
            .times(1)
            .returning(move |_| Ok(user.clone()));

        apps.expect_app_by_id()
            .with(eq(AppId(99)))
            .times(1)
            .returning(|_| Err(AppRegistryError::AppNotFound));

        let service = auth_service(store, apps);

        let result = service
            .login("alice@example.com", "password123", AppId(99))
            .await;
        assert!(matches!(result, Err(AuthError::AppNotFound(AppId(99)))));
    }

    #[tokio::test]
    async fn test_login_store_failure_is_internal() {
        let mut store = MockTestCredentialStore::new();
        let apps = MockTestAppRegistry::new();

        store
            .expect_user_by_email()
            .times(1)
            .returning(|_| Err(CredentialStoreError::Database("connection reset".to_string())));

        let service = auth_service(store, apps);

        let result = service
            .login("alice@example.com", "password123", AppId(1))
            .await;
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }
}
