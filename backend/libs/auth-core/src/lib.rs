//! Stateless identity for the ecom services
//!
//! This library is the single source of truth for bearer-token handling.
//! Every service verifies tokens locally with a shared symmetric secret,
//! so no session store or auth round-trip is needed on any hop.
//!
//! ## Core Components
//!
//! - **TokenCodec**: issues and verifies HS256 identity tokens
//! - **Identity**: the verified `(subject, role)` pair attached to one
//!   request's processing lifetime
//! - **authenticate / extract_bearer**: the one credential-extraction path
//!   shared by the HTTP middleware and the gRPC interceptor — transports
//!   only supply the raw carrier value

mod bearer;
mod error;
mod identity;
mod token;

pub use bearer::{authenticate, extract_bearer};
pub use error::AuthError;
pub use identity::{Identity, ROLE_ADMIN, ROLE_USER};
pub use token::TokenCodec;
