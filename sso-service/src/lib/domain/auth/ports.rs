use async_trait::async_trait;

use crate::domain::auth::errors::AppRegistryError;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::CredentialStoreError;
use crate::domain::auth::models::App;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with a hashed credential.
    ///
    /// # Arguments
    /// * `email` - Raw email address; validated here, the service does
    ///   not assume the transport already did
    /// * `password` - Plaintext password, hashed exactly once
    ///
    /// # Returns
    /// Identifier assigned by the credential store
    ///
    /// # Errors
    /// * `InvalidEmail` / `EmptyPassword` - Input rejected
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Internal` - Hashing or storage failed
    async fn register(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    /// Verify credentials and issue a signed access token for an app.
    ///
    /// Credential checks run before app resolution, so invalid
    /// credentials are never masked as an app-configuration problem and
    /// an unknown app id cannot be used to probe account existence.
    ///
    /// # Arguments
    /// * `email` - Email to authenticate
    /// * `password` - Plaintext password to verify
    /// * `app_id` - Application the token will be scoped to
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `AppNotFound` - No app registered under `app_id`
    /// * `Internal` - Storage, verification, or signing failed
    async fn login(&self, email: &str, password: &str, app_id: AppId)
        -> Result<String, AuthError>;
}

/// Persistence contract for user credential records.
///
/// The store owns the email-uniqueness invariant and must enforce it
/// atomically under concurrent registrations.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new user row.
    ///
    /// # Arguments
    /// * `email` - Unique email address
    /// * `password_hash` - PHC-format password hash
    ///
    /// # Returns
    /// Store-assigned user identifier
    ///
    /// # Errors
    /// * `UserExists` - Email is already taken
    /// * `Database` - Storage operation failed
    async fn add_user(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<UserId, CredentialStoreError>;

    /// Retrieve a user by email address.
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Database` - Storage operation failed
    async fn user_by_email(&self, email: &EmailAddress) -> Result<User, CredentialStoreError>;
}

/// Lookup contract resolving an app id to its signing secret.
#[async_trait]
pub trait AppRegistry: Send + Sync + 'static {
    /// Retrieve an app by identifier.
    ///
    /// # Errors
    /// * `AppNotFound` - No app with this id
    /// * `Database` - Lookup operation failed
    async fn app_by_id(&self, id: AppId) -> Result<App, AppRegistryError>;
}
