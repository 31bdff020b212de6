use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::auth::Identity;

/// Errors returned by credential verification.
///
/// The middleware collapses all of them into a single 401; the variants only
/// exist so the cause can be logged.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("missing or empty subject claim")]
    EmptySubject,
}

/// `x-auth-token` claims.
///
/// The issuer puts the account id into `id`. Standard JWT tooling uses `sub`
/// instead, and some issuers send both; `id` wins when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

/// AuthService が返す「検証済み・アプリ側で使う型」
#[derive(Debug, Clone)]
pub struct VerifiedAccessToken {
    pub identity: Identity,
    pub expires_at: u64,
}

/// HS256 access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("algorithms", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        // Tokens are not audience-bound; an `aud` claim is ignored rather than rejected.
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Signature + `exp` check, then resolve the subject into an `Identity`.
    ///
    /// jsonwebtoken rejects a token whose header names any algorithm other
    /// than HS256, so `alg: none` and key-confusion tokens never get here.
    pub fn verify(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        let claims = data.claims;
        let identity = claims
            .id
            .or(claims.sub)
            .as_deref()
            .and_then(Identity::parse)
            .ok_or(AccessJwtError::EmptySubject)?;

        Ok(VerifiedAccessToken {
            identity,
            expires_at: claims.exp,
        })
    }
}
