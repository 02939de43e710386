use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::errors::TokenError;

/// Signs and verifies access tokens for a single signing secret.
///
/// Uses HS256 (HMAC with SHA-256). A signer is cheap to construct, so a
/// multi-tenant service builds one per resolved tenant secret; a token
/// signed under one secret never verifies under another.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenSigner {
    /// Create a token signer from a symmetric secret.
    ///
    /// # Arguments
    /// * `secret` - Signing key; should be at least 256 bits for HS256
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed compact token.
    ///
    /// The signature covers header and claims, so any mutation of either
    /// invalidates the token.
    ///
    /// # Arguments
    /// * `claims` - Claims to embed
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `SigningFailed` - Signing failed, e.g. unusable key material
    pub fn encode(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Decode a token and verify its signature and expiry.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    ///
    /// # Returns
    /// The embedded claims
    ///
    /// # Errors
    /// * `Expired` - The `exp` claim is in the past
    /// * `InvalidSignature` - Signature does not match this secret
    /// * `DecodingFailed` - Token is malformed
    pub fn decode(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::DecodingFailed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
