/// Error types for order-service
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Business precondition: checkout requires a non-empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A required remote dependency call failed. The message names the
    /// failing step.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("not found: {0}")]
    NotFound(String),

    /// Status strings outside the closed order-status set are rejected.
    #[error("invalid order status: {0}")]
    InvalidStatus(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Convert ServiceError to tonic::Status for gRPC responses
impl From<ServiceError> for tonic::Status {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::EmptyCart => tonic::Status::failed_precondition("cart is empty"),
            ServiceError::UpstreamUnavailable(msg) => {
                tonic::Status::unavailable(format!("upstream unavailable: {}", msg))
            }
            ServiceError::Database(e) => {
                tonic::Status::internal(format!("database error: {}", e))
            }
            ServiceError::NotFound(msg) => tonic::Status::not_found(msg),
            ServiceError::InvalidStatus(msg) => {
                tonic::Status::invalid_argument(format!("invalid order status: {}", msg))
            }
            ServiceError::Config(msg) => tonic::Status::internal(format!("config error: {}", msg)),
            ServiceError::Internal(msg) => tonic::Status::internal(msg),
        }
    }
}

/// HTTP mapping for actix handlers
impl actix_web::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::EmptyCart => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            ServiceError::Database(_) | ServiceError::Config(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grpc_codes_match_the_taxonomy() {
        assert_eq!(
            tonic::Status::from(ServiceError::EmptyCart).code(),
            tonic::Code::FailedPrecondition
        );
        assert_eq!(
            tonic::Status::from(ServiceError::UpstreamUnavailable("cart".into())).code(),
            tonic::Code::Unavailable
        );
        assert_eq!(
            tonic::Status::from(ServiceError::NotFound("order x".into())).code(),
            tonic::Code::NotFound
        );
        assert_eq!(
            tonic::Status::from(ServiceError::InvalidStatus("SHIPPED".into())).code(),
            tonic::Code::InvalidArgument
        );
    }

    #[test]
    fn http_codes_match_the_taxonomy() {
        use actix_web::ResponseError;

        assert_eq!(
            ServiceError::EmptyCart.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServiceError::UpstreamUnavailable("cart".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ServiceError::NotFound("order x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::InvalidStatus("SHIPPED".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
