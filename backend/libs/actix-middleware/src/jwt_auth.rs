use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use auth_core::{authenticate, Identity, TokenCodec};

/// Bearer-token authentication middleware (the HTTP AuthGateway).
///
/// Reads the `Authorization` header, runs it through auth-core's shared
/// extraction/verification path, and attaches the resulting [`Identity`] to
/// the request's extensions. Requests with a missing, malformed, invalid or
/// expired credential are rejected with 401 before the wrapped handler runs.
/// The token itself is never mutated or re-issued.
pub struct JwtAuth {
    codec: Arc<TokenCodec>,
}

impl JwtAuth {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthService {
            service: Rc::new(service),
            codec: self.codec.clone(),
        }))
    }
}

pub struct JwtAuthService<S> {
    service: Rc<S>,
    codec: Arc<TokenCodec>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let codec = self.codec.clone();

        Box::pin(async move {
            let raw = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok());

            let identity = authenticate(&codec, raw).map_err(|e| {
                tracing::warn!("rejected request credential: {}", e);
                actix_web::error::ErrorUnauthorized(e.to_string())
            })?;

            req.extensions_mut().insert(identity);

            service.call(req).await
        })
    }
}

/// Extractor handing the verified identity to a handler.
///
/// Only works behind [`JwtAuth`]; extracting without a stored identity is a
/// 401, never a panic.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Identity);

impl actix_web::FromRequest for Authenticated {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<Identity>() {
            Some(identity) => ready(Ok(Authenticated(identity.clone()))),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "caller is not authenticated",
            ))),
        }
    }
}
