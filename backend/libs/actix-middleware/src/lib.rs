//! # Actix Middleware Library
//!
//! Unified middleware components for the ecom Actix services
//!
//! ## Modules
//! - `jwt_auth`: bearer-token authentication middleware (the HTTP
//!   AuthGateway) plus the `Authenticated` extractor
//! - `require_role`: role gate for administrator-only routes

pub mod jwt_auth;
pub mod require_role;

pub use jwt_auth::{Authenticated, JwtAuth};
pub use require_role::RequireRole;
