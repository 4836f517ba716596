use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::{AuthError, Identity};

/// Fixed token lifetime from issuance.
const TOKEN_EXPIRY_HOURS: i64 = 24;

/// Claims carried by an identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Claims {
    /// Subject (user identifier).
    pub sub: String,
    /// Authorization role. Empty means "default/unprivileged".
    #[serde(default)]
    pub role: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

/// Issues and verifies HS256-signed identity tokens.
///
/// The codec owns its keys; the signing secret is injected at construction
/// (typically from service configuration) and there is no process-global
/// state. Verification is purely local, which is what lets every service
/// check identity without a shared session store.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Create a codec from the shared signing secret.
    ///
    /// Fails with [`AuthError::EmptySecret`] when the secret is empty, so a
    /// misconfigured process refuses to start instead of issuing unsigned
    /// garbage.
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Issue a token for `subject` with the default (empty) role.
    ///
    /// Expires [`TOKEN_EXPIRY_HOURS`] after issuance.
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        self.issue_with_role(subject, "")
    }

    /// Issue a token carrying an explicit role, e.g. `admin`.
    pub fn issue_with_role(&self, subject: &str, role: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_EXPIRY_HOURS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| AuthError::Malformed)
    }

    /// Verify a token and return the identity it encodes.
    ///
    /// Distinguishes the three failure classes callers care about:
    /// [`AuthError::InvalidSignature`], [`AuthError::Expired`] (checked with
    /// zero leeway — a token is valid only while `now < exp`), and
    /// [`AuthError::Malformed`] for anything that does not parse into the
    /// claim shape.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Malformed,
            }
        })?;

        Ok(Identity::new(data.claims.sub, data.claims.role))
    }
}
