/// gRPC clients library
///
/// Centralizes client code generation for the order service's remote
/// collaborators (cart, payment) and provides a small connection pool over
/// the generated stubs. Channels are created once at startup and cloned
/// cheaply per call.
pub mod config;

pub use config::GrpcConfig;

// Re-export generated proto client modules
pub mod ecom {
    pub mod cart {
        pub mod v1 {
            tonic::include_proto!("ecom.cart.v1");
        }
        pub use v1::*;
    }
    pub mod payment {
        pub mod v1 {
            tonic::include_proto!("ecom.payment.v1");
        }
        pub use v1::*;
    }
}

use std::sync::Arc;
use tonic::transport::Channel;

pub use ecom::cart::cart_service_client::CartServiceClient;
pub use ecom::payment::payment_service_client::PaymentServiceClient;

#[derive(Clone)]
pub struct GrpcClientPool {
    cart_client: Arc<CartServiceClient<Channel>>,
    payment_client: Arc<PaymentServiceClient<Channel>>,
}

impl GrpcClientPool {
    /// Create a new gRPC client pool from configuration.
    ///
    /// If a collaborator is unreachable at startup, a lazy placeholder
    /// channel is installed instead so this service can still boot; calls on
    /// that client fail at call-time and surface through the saga's normal
    /// failure policy.
    pub async fn new(config: &GrpcConfig) -> Result<Self, Box<dyn std::error::Error>> {
        async fn connect_or_placeholder(
            config: &GrpcConfig,
            url: &str,
            service_name: &str,
        ) -> Channel {
            match config.connect_channel(url).await {
                Ok(channel) => {
                    tracing::debug!("connected to {}", service_name);
                    channel
                }
                Err(e) => {
                    tracing::warn!(
                        "failed to connect to {} at {}: {}; calls will fail until it is reachable",
                        service_name,
                        url,
                        e
                    );
                    // Placeholder endpoint that fails at call-time
                    config
                        .make_endpoint("http://unavailable.local:1")
                        .expect("hardcoded placeholder URL must be valid")
                        .connect_lazy()
                }
            }
        }

        let cart_client = Arc::new(CartServiceClient::new(
            connect_or_placeholder(config, &config.cart_service_url, "cart-service").await,
        ));
        let payment_client = Arc::new(PaymentServiceClient::new(
            connect_or_placeholder(config, &config.payment_service_url, "payment-service").await,
        ));

        Ok(Self {
            cart_client,
            payment_client,
        })
    }

    pub fn cart(&self) -> CartServiceClient<Channel> {
        (*self.cart_client).clone()
    }

    pub fn payment(&self) -> PaymentServiceClient<Channel> {
        (*self.payment_client).clone()
    }
}
