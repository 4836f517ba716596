//! Client-side bearer interceptor
//!
//! Attaches the bearer credential to every outgoing gRPC request so the
//! callee's auth interceptor can establish the same identity on its side.

use tonic::metadata::{AsciiMetadataValue, MetadataMap};
use tonic::service::Interceptor;
use tonic::{Request, Status};

/// Injects `authorization: Bearer <token>` into outgoing request metadata.
///
/// The header value is formatted and validated once at construction; the
/// per-request work is a metadata insert.
#[derive(Clone)]
pub struct BearerInterceptor {
    auth_header: AsciiMetadataValue,
}

impl BearerInterceptor {
    /// Build from a raw token (without the `Bearer ` prefix).
    ///
    /// Fails when the token contains non-ASCII bytes; signed tokens are
    /// base64url and never do.
    pub fn new(token: impl Into<String>) -> Result<Self, Status> {
        let value = format!("Bearer {}", token.into());
        let auth_header = AsciiMetadataValue::try_from(value)
            .map_err(|_| Status::internal("token contains non-ASCII characters"))?;
        Ok(Self { auth_header })
    }

    /// Build from an already-parsed header value, e.g. when forwarding an
    /// inbound request's credential to a downstream service unchanged.
    pub fn from_header(auth_header: AsciiMetadataValue) -> Self {
        Self { auth_header }
    }

    /// The inbound `authorization` value, for gateway-style forwarding.
    pub fn extract_from_metadata(metadata: &MetadataMap) -> Result<&AsciiMetadataValue, Status> {
        metadata
            .get("authorization")
            .ok_or_else(|| Status::unauthenticated("missing authorization metadata"))
    }
}

impl Interceptor for BearerInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        request
            .metadata_mut()
            .insert("authorization", self.auth_header.clone());
        Ok(request)
    }
}
