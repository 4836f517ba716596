use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use auth_core::{Identity, ROLE_ADMIN};

/// Role gate for routes that require a specific role.
///
/// Reads the [`Identity`] a [`JwtAuth`](crate::JwtAuth) gateway stored
/// earlier in the chain — it never re-authenticates. A role mismatch is
/// 403; a missing identity (gate mounted without the gateway) also fails
/// closed with 403.
pub struct RequireRole {
    role: &'static str,
}

impl RequireRole {
    pub fn new(role: &'static str) -> Self {
        Self { role }
    }

    /// Gate for administrator-only routes.
    pub fn admin() -> Self {
        Self::new(ROLE_ADMIN)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequireRoleService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleService {
            service: Rc::new(service),
            role: self.role,
        }))
    }
}

pub struct RequireRoleService<S> {
    service: Rc<S>,
    role: &'static str,
}

impl<S, B> Service<ServiceRequest> for RequireRoleService<S>
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
        let allowed = req
            .extensions()
            .get::<Identity>()
            .map(|identity| identity.role == self.role)
            .unwrap_or(false);

        if !allowed {
            let role = self.role;
            return Box::pin(async move {
                Err(actix_web::error::ErrorForbidden(format!(
                    "requires role '{role}'"
                )))
            });
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}
