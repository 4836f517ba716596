use thiserror::Error;

/// Credential and token failures.
///
/// Everything except `EmptySecret` surfaces as an Unauthenticated outcome at
/// the transport gateways; `EmptySecret` is a startup configuration error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("missing credential")]
    MissingCredential,

    #[error("malformed authorization header (expected 'Bearer <token>')")]
    MalformedCredential,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("malformed token")]
    Malformed,
}
