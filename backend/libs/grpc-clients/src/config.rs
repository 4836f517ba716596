/// gRPC client configuration
///
/// Endpoint URLs and channel tuning for the order service's remote
/// collaborators. Timeouts live here, on the transport, not in the saga:
/// every remote call is bounded by the endpoint's connect/request timeouts.
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use tonic::transport::{Channel, Endpoint};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrpcConfig {
    /// Cart service endpoint
    pub cart_service_url: String,

    /// Payment service endpoint
    pub payment_service_url: String,

    /// Connect timeout in seconds
    pub connection_timeout_secs: u64,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// HTTP/2 keep-alive interval in seconds
    pub keepalive_interval_secs: u64,

    /// HTTP/2 keep-alive timeout in seconds
    pub keepalive_timeout_secs: u64,
}

impl GrpcConfig {
    /// Load configuration from environment variables, falling back to the
    /// docker-compose service names for development.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            cart_service_url: env::var("GRPC_CART_SERVICE_URL")
                .unwrap_or_else(|_| "http://cart-service:9080".to_string()),
            payment_service_url: env::var("GRPC_PAYMENT_SERVICE_URL")
                .unwrap_or_else(|_| "http://payment-service:9080".to_string()),
            connection_timeout_secs: env::var("GRPC_CONNECTION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            request_timeout_secs: env::var("GRPC_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            keepalive_interval_secs: env::var("GRPC_KEEPALIVE_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            keepalive_timeout_secs: env::var("GRPC_KEEPALIVE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        })
    }

    /// Configuration for local development and testing.
    pub fn development() -> Self {
        Self {
            cart_service_url: "http://localhost:9081".to_string(),
            payment_service_url: "http://localhost:9082".to_string(),
            connection_timeout_secs: 10,
            request_timeout_secs: 30,
            keepalive_interval_secs: 30,
            keepalive_timeout_secs: 10,
        }
    }

    /// Build a tonic Endpoint from a URL with timeouts and keepalive applied.
    pub fn make_endpoint(&self, url: &str) -> Result<Endpoint, Box<dyn std::error::Error>> {
        Ok(Endpoint::from_shared(url.to_string())?
            .connect_timeout(Duration::from_secs(self.connection_timeout_secs))
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .http2_keep_alive_interval(Duration::from_secs(self.keepalive_interval_secs))
            .keep_alive_timeout(Duration::from_secs(self.keepalive_timeout_secs))
            .tcp_nodelay(true))
    }

    /// Connect a Channel using this configuration.
    pub async fn connect_channel(&self, url: &str) -> Result<Channel, Box<dyn std::error::Error>> {
        Ok(self.make_endpoint(url)?.connect().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_endpoints_are_valid() {
        let config = GrpcConfig::development();
        assert!(config.make_endpoint(&config.cart_service_url).is_ok());
        assert!(config.make_endpoint(&config.payment_service_url).is_ok());
    }

    #[test]
    fn invalid_url_is_rejected() {
        let config = GrpcConfig::development();
        assert!(config.make_endpoint("not a url").is_err());
    }
}
