//! gRPC-backed collaborator gateways
//!
//! Thin adapters from the saga's gateway ports onto the generated cart and
//! payment client stubs. Channel tuning (timeouts, keepalive) lives in
//! grpc-clients; these only translate between wire and domain types.

use async_trait::async_trait;
use tonic::transport::Channel;
use uuid::Uuid;

use grpc_clients::ecom::{cart, payment};
use grpc_clients::{CartServiceClient, PaymentServiceClient};

use crate::domain::{CartLine, CartSnapshot};
use crate::services::{CartGateway, PaymentGateway};

pub struct GrpcCartGateway {
    client: CartServiceClient<Channel>,
}

impl GrpcCartGateway {
    pub fn new(client: CartServiceClient<Channel>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CartGateway for GrpcCartGateway {
    async fn get_cart(&self, user_id: &str) -> anyhow::Result<CartSnapshot> {
        let mut client = self.client.clone();
        let response = client
            .get_cart(cart::GetCartRequest {
                user_id: user_id.to_string(),
            })
            .await?;

        let items = response
            .into_inner()
            .items
            .into_iter()
            .map(|item| CartLine {
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
            })
            .collect();

        Ok(CartSnapshot { items })
    }

    async fn clear_cart(&self, user_id: &str) -> anyhow::Result<()> {
        let mut client = self.client.clone();
        client
            .clear_cart(cart::ClearCartRequest {
                user_id: user_id.to_string(),
            })
            .await?;
        Ok(())
    }
}

pub struct GrpcPaymentGateway {
    client: PaymentServiceClient<Channel>,
}

impl GrpcPaymentGateway {
    pub fn new(client: PaymentServiceClient<Channel>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentGateway for GrpcPaymentGateway {
    async fn notify_order_created(&self, order_id: Uuid) -> anyhow::Result<String> {
        let mut client = self.client.clone();
        let response = client
            .notify_order_created(payment::NotifyOrderRequest {
                order_id: order_id.to_string(),
            })
            .await?;
        Ok(response.into_inner().message)
    }
}
