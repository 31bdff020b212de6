use jsonwebtoken::{Algorithm, EncodingKey, Header};

use crate::services::auth::access_jwt::AccessTokenClaims;

/// Mints `x-auth-token` credentials with the shared HS256 secret.
///
/// Real tokens come from the account service; this exists for `token-gen`
/// and for tests so both sides agree on the claim layout.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    ttl_seconds: u64,
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl_seconds,
        }
    }

    pub fn sign(&self, subject: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;

        let claims = AccessTokenClaims {
            id: Some(subject.to_string()),
            sub: None,
            exp: now + self.ttl_seconds,
            iat: Some(now),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
    }
}
