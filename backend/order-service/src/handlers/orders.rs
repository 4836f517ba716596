/// Order handlers
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use actix_middleware::Authenticated;

use crate::domain::Order;
use crate::error::ServiceError;
use crate::services::OrderService;

/// Shared state for the HTTP handlers.
pub struct AppState {
    pub orders: Arc<OrderService>,
}

/// Response envelope for mutations.
#[derive(Debug, Serialize)]
pub struct OrderEnvelope {
    pub message: String,
    pub order: Order,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Place a new order from the authenticated caller's cart.
pub async fn create_order(
    state: web::Data<AppState>,
    identity: Authenticated,
) -> Result<HttpResponse, ServiceError> {
    let order = state
        .orders
        .place_order_from_cart(&identity.0.subject)
        .await?;

    Ok(HttpResponse::Created().json(OrderEnvelope {
        message: "order placed successfully".to_string(),
        order,
    }))
}

pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let order = state.orders.get_order(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(order))
}

pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let orders = state.orders.list_orders().await?;
    Ok(HttpResponse::Ok().json(orders))
}

/// Transition an order to a new status. Invoked by administrative callers
/// and by the payment collaborator reporting an outcome.
pub async fn update_order_status(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, ServiceError> {
    let order = state
        .orders
        .update_status(path.into_inner(), &payload.status)
        .await?;

    Ok(HttpResponse::Ok().json(OrderEnvelope {
        message: "order status updated successfully".to_string(),
        order,
    }))
}

/// Administrative delete; mounted behind the admin role gate.
pub async fn delete_order(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    state.orders.delete_order(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "order deleted successfully".to_string(),
    }))
}
