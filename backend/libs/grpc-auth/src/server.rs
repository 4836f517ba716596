//! Server-side auth interceptor
//!
//! Verifies the bearer credential on every incoming call and stores the
//! resulting identity in request extensions before any handler runs.

use std::sync::Arc;

use tonic::metadata::MetadataMap;
use tonic::service::Interceptor;
use tonic::{Request, Status};
use tracing::warn;

use auth_core::{authenticate, Identity, TokenCodec};

/// The RPC AuthGateway.
///
/// Reads the `authorization` metadata entry (first value when the key is
/// repeated), runs it through the shared `authenticate` path, and attaches
/// the verified [`Identity`] to the request. Every failure — missing entry,
/// malformed scheme, bad signature, expired token — is rejected with
/// `Status::unauthenticated` before the service method is invoked. The
/// credential itself is forwarded untouched.
#[derive(Clone)]
pub struct AuthInterceptor {
    codec: Arc<TokenCodec>,
}

impl AuthInterceptor {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    fn verify_metadata(&self, metadata: &MetadataMap) -> Result<Identity, Status> {
        let raw = metadata
            .get("authorization")
            .and_then(|value| value.to_str().ok());

        authenticate(&self.codec, raw).map_err(|e| {
            warn!("rejected call credential: {}", e);
            Status::unauthenticated(e.to_string())
        })
    }
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let identity = self.verify_metadata(request.metadata())?;
        request.extensions_mut().insert(identity);
        Ok(request)
    }
}
