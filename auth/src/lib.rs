//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id)
//! - JWT access-token signing and verification
//!
//! Each service defines its own ports around these implementations. The
//! library holds no key material of its own: a [`TokenSigner`] is built
//! from whatever secret the caller resolves, so a multi-tenant service
//! can sign each token with its tenant's key.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{AccessClaims, TokenSigner};
//! use chrono::Duration;
//!
//! let signer = TokenSigner::new(b"app_secret_at_least_32_bytes_long!!");
//! let claims = AccessClaims::new(42, "alice@example.com", 1, Duration::hours(1));
//! let token = signer.encode(&claims).unwrap();
//! let decoded = signer.decode(&token).unwrap();
//! assert_eq!(decoded.uid, 42);
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::AccessClaims;
pub use jwt::TokenError;
pub use jwt::TokenSigner;
pub use password::PasswordError;
pub use password::PasswordHasher;
