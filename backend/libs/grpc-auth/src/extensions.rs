//! Request extension trait for identity access
//!
//! Handler-side helpers over the [`Identity`] stored by
//! [`AuthInterceptor`](crate::AuthInterceptor).

use auth_core::Identity;
use tonic::{Request, Status};

/// Access the verified caller identity from a gRPC request.
///
/// A missing identity means the interceptor was not attached (or was
/// bypassed) and is always `Status::unauthenticated`; a role mismatch is
/// `Status::permission_denied`. The gate never re-verifies the token.
pub trait IdentityExt {
    /// The identity stored by the server interceptor.
    fn identity(&self) -> Result<&Identity, Status>;

    /// The RPC-side role gate: identity must be present and carry `role`.
    fn require_role(&self, role: &str) -> Result<&Identity, Status>;
}

impl<T> IdentityExt for Request<T> {
    fn identity(&self) -> Result<&Identity, Status> {
        self.extensions().get::<Identity>().ok_or_else(|| {
            Status::unauthenticated("no identity on request; is the auth interceptor attached?")
        })
    }

    fn require_role(&self, role: &str) -> Result<&Identity, Status> {
        let identity = self.identity()?;
        if identity.role != role {
            return Err(Status::permission_denied(format!(
                "requires role '{role}'"
            )));
        }
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(identity: Identity) -> Request<()> {
        let mut request = Request::new(());
        request.extensions_mut().insert(identity);
        request
    }

    #[test]
    fn identity_missing_is_unauthenticated() {
        let request = Request::new(());
        let status = request.identity().unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }

    #[test]
    fn identity_present_is_returned() {
        let request = request_with(Identity::new("user-9", ""));
        let identity = request.identity().unwrap();
        assert_eq!(identity.subject, "user-9");
        assert_eq!(identity.role, "user");
    }

    #[test]
    fn require_role_accepts_matching_role() {
        let request = request_with(Identity::new("root", "admin"));
        assert!(request.require_role("admin").is_ok());
    }

    #[test]
    fn require_role_rejects_other_roles() {
        let request = request_with(Identity::new("user-9", "user"));
        let status = request.require_role("admin").unwrap_err();
        assert_eq!(status.code(), tonic::Code::PermissionDenied);
    }

    #[test]
    fn require_role_without_identity_is_unauthenticated() {
        let request = Request::new(());
        let status = request.require_role("admin").unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }
}
