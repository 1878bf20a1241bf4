/// Signed session tokens.
///
/// RS256 only; the PKCS8 keypair is loaded once at startup and shared
/// read-only by every concurrent signing or verification call. Tokens are
/// stateless and non-revocable; their whole lifetime is client-held.
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::error::IdentityError;
use crate::models::User;

/// Issuer stamped into every token; verification requires it back.
pub const TOKEN_ISSUER: &str = "aeminium-identity";

/// Sessions live exactly this long; there is no refresh flow.
pub const TOKEN_VALIDITY_DAYS: i64 = 3;

const JWT_ALGORITHM: Algorithm = Algorithm::RS256;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Display name of the subject.
    pub upn: String,
    /// User id, as a string.
    pub sub: String,
    pub iss: String,
    /// Fresh per token.
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    /// Role names granted to the subject.
    pub groups: Vec<String>,
}

/// Holds the RSA key material for the lifetime of the process.
///
/// Immutable after construction; an `Arc` around it is the only
/// synchronization concurrent callers need.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    /// Load the PKCS8 PEM keypair from the configured locations.
    ///
    /// Without a parseable signing key the service cannot issue tokens, so
    /// the caller must treat this error as fatal to startup.
    pub fn load(settings: &JwtSettings) -> Result<Self> {
        let private_pem = std::fs::read(&settings.private_key_path).with_context(|| {
            format!(
                "Failed to read private key at {}",
                settings.private_key_path
            )
        })?;
        let public_pem = std::fs::read(&settings.public_key_path).with_context(|| {
            format!("Failed to read public key at {}", settings.public_key_path)
        })?;

        let encoding_key =
            EncodingKey::from_rsa_pem(&private_pem).context("Failed to parse RSA private key")?;
        let decoding_key =
            DecodingKey::from_rsa_pem(&public_pem).context("Failed to parse RSA public key")?;

        Ok(Self {
            encoding_key,
            decoding_key,
        })
    }

    /// Mint a signed token for a freshly authenticated user.
    pub fn issue(&self, user: &User) -> std::result::Result<String, IdentityError> {
        let now = Utc::now();
        let expiry = now + Duration::days(TOKEN_VALIDITY_DAYS);

        let claims = Claims {
            upn: user.name.clone(),
            sub: user.id.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            groups: user.roles_as_strings(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| IdentityError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Verify signature, expiry and issuer; returns the decoded claims.
    pub fn verify(&self, token: &str) -> std::result::Result<Claims, IdentityError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.set_issuer(&[TOKEN_ISSUER]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| IdentityError::InvalidToken)
    }
}
