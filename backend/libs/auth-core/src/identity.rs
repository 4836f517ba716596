use serde::{Deserialize, Serialize};

/// Role carried by tokens issued without an explicit role.
pub const ROLE_USER: &str = "user";

/// Role required for administrative operations.
pub const ROLE_ADMIN: &str = "admin";

/// The verified caller identity for one in-flight request.
///
/// Produced by a transport gateway from a verified token and attached to the
/// request's extensions; handlers read it from there and never re-verify.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user identifier (the token's `sub` claim).
    pub subject: String,
    /// Authorization role. Tokens with an empty role claim default to
    /// [`ROLE_USER`].
    pub role: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>, role: impl Into<String>) -> Self {
        let role = role.into();
        Self {
            subject: subject.into(),
            role: if role.is_empty() {
                ROLE_USER.to_string()
            } else {
                role
            },
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
