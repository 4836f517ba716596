use std::sync::Arc;

use tonic::{Request, Response, Status};
use uuid::Uuid;

use auth_core::ROLE_ADMIN;
use grpc_auth::IdentityExt;

use crate::domain::{self, OrderDraft};
use crate::services::OrderService;

// Generated protobuf code (from backend/proto/services/order_service.proto)
pub mod order {
    tonic::include_proto!("ecom.order.v1");
}

pub use order::order_service_server::OrderServiceServer;
use order::*;

/// gRPC surface of the order service.
///
/// Runs behind the auth interceptor: every request reaching a method here
/// already carries a verified identity in its extensions. The caller's user
/// id is taken from that identity, never from the request body.
pub struct OrderGrpcService {
    service: Arc<OrderService>,
}

impl OrderGrpcService {
    pub fn new(service: Arc<OrderService>) -> Self {
        Self { service }
    }
}

// A malformed id can never reference an existing order, so it reports the
// same way as an absent one.
fn parse_order_id(value: &str) -> Result<Uuid, Status> {
    Uuid::parse_str(value).map_err(|_| Status::not_found(format!("order {} not found", value)))
}

#[tonic::async_trait]
impl order::order_service_server::OrderService for OrderGrpcService {
    async fn create_order_from_cart(
        &self,
        request: Request<CreateOrderFromCartRequest>,
    ) -> Result<Response<OrderResponse>, Status> {
        let identity = request.identity()?.clone();

        let order = self
            .service
            .place_order_from_cart(&identity.subject)
            .await?;

        Ok(Response::new(OrderResponse {
            order: Some(to_proto(&order)),
        }))
    }

    async fn create_order(
        &self,
        request: Request<CreateOrderRequest>,
    ) -> Result<Response<OrderResponse>, Status> {
        let identity = request.identity()?.clone();
        let req = request.into_inner();

        let items = req
            .items
            .into_iter()
            .map(|item| domain::OrderItem {
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
            })
            .collect();
        let draft = OrderDraft::new(&identity.subject, items);

        let order = self.service.create_order(draft).await?;

        Ok(Response::new(OrderResponse {
            order: Some(to_proto(&order)),
        }))
    }

    async fn get_order(
        &self,
        request: Request<GetOrderRequest>,
    ) -> Result<Response<OrderResponse>, Status> {
        let req = request.into_inner();
        let id = parse_order_id(&req.id)?;

        let order = self.service.get_order(id).await?;

        Ok(Response::new(OrderResponse {
            order: Some(to_proto(&order)),
        }))
    }

    async fn list_orders(
        &self,
        _request: Request<ListOrdersRequest>,
    ) -> Result<Response<ListOrdersResponse>, Status> {
        let orders = self.service.list_orders().await?;

        Ok(Response::new(ListOrdersResponse {
            orders: orders.iter().map(to_proto).collect(),
        }))
    }

    async fn update_order_status(
        &self,
        request: Request<UpdateOrderStatusRequest>,
    ) -> Result<Response<OrderResponse>, Status> {
        let req = request.into_inner();
        let id = parse_order_id(&req.id)?;

        let order = self.service.update_status(id, &req.status).await?;

        Ok(Response::new(OrderResponse {
            order: Some(to_proto(&order)),
        }))
    }

    async fn delete_order(
        &self,
        request: Request<DeleteOrderRequest>,
    ) -> Result<Response<DeleteOrderResponse>, Status> {
        request.require_role(ROLE_ADMIN)?;

        let req = request.into_inner();
        let id = parse_order_id(&req.id)?;

        self.service.delete_order(id).await?;

        Ok(Response::new(DeleteOrderResponse {
            message: "order deleted successfully".to_string(),
        }))
    }
}

// helper to convert domain -> proto
fn to_proto(order: &domain::Order) -> Order {
    Order {
        id: order.id.to_string(),
        user_id: order.user_id.clone(),
        items: order
            .items
            .iter()
            .map(|item| OrderItem {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                price: item.price,
            })
            .collect(),
        total: order.total,
        status: order.status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;
    use chrono::Utc;

    #[test]
    fn to_proto_maps_every_field() {
        let order = domain::Order {
            id: Uuid::new_v4(),
            user_id: "user-1".into(),
            items: vec![domain::OrderItem {
                product_id: "p1".into(),
                quantity: 2,
                price: 10.0,
            }],
            total: 20.0,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let proto = to_proto(&order);

        assert_eq!(proto.id, order.id.to_string());
        assert_eq!(proto.user_id, "user-1");
        assert_eq!(proto.items.len(), 1);
        assert_eq!(proto.items[0].product_id, "p1");
        assert_eq!(proto.total, 20.0);
        assert_eq!(proto.status, "PENDING");
    }

    #[test]
    fn malformed_order_id_reports_not_found() {
        let status = parse_order_id("missing-id").unwrap_err();
        assert_eq!(status.code(), tonic::Code::NotFound);
    }
}
