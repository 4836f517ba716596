//! Bearer-credential handling for gRPC services
//!
//! The RPC twin of the HTTP auth middleware: both feed the raw credential
//! carrier into auth-core's single extraction/verification path, so the two
//! transports cannot drift apart.
//!
//! ## Core Components
//!
//! - **AuthInterceptor**: server interceptor that verifies the
//!   `authorization` metadata entry and stores the [`Identity`] in request
//!   extensions
//! - **IdentityExt**: request extension trait for handler-side identity
//!   access and role checks
//! - **BearerInterceptor**: client interceptor that attaches the bearer
//!   credential to outgoing requests

mod client;
mod extensions;
mod server;

pub use auth_core::Identity;
pub use client::BearerInterceptor;
pub use extensions::IdentityExt;
pub use server::AuthInterceptor;

// Re-export tonic Status for convenience
pub use tonic::Status;
