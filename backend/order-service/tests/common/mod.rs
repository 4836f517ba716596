//! In-memory collaborators for exercising the checkout saga without a
//! database or network.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use order_service::domain::{CartLine, CartSnapshot, Order, OrderDraft, OrderStatus};
use order_service::error::{ServiceError, ServiceResult};
use order_service::repository::OrderRepository;
use order_service::services::{CartGateway, OrderService, PaymentGateway};

#[derive(Default)]
pub struct InMemoryOrderRepository {
    pub orders: Mutex<HashMap<Uuid, Order>>,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    fail_create: bool,
}

impl InMemoryOrderRepository {
    pub fn failing_on_create() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    pub fn created(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn updated(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> usize {
        self.orders.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, draft: OrderDraft) -> ServiceResult<Order> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(ServiceError::Database(sqlx::Error::PoolTimedOut));
        }

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            user_id: draft.user_id,
            items: draft.items,
            total: draft.total,
            status: draft.status,
            created_at: now,
            updated_at: now,
        };
        self.orders.lock().unwrap().insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> ServiceResult<Order> {
        self.orders
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("order {}", id)))
    }

    async fn list(&self) -> ServiceResult<Vec<Order>> {
        Ok(self.orders.lock().unwrap().values().cloned().collect())
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> ServiceResult<Order> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .get_mut(&id)
            .ok_or_else(|| ServiceError::NotFound(format!("order {}", id)))?;
        order.status = status;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }

    async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        self.orders
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::NotFound(format!("order {}", id)))
    }
}

pub struct StubCartGateway {
    pub items: Vec<CartLine>,
    pub fail_fetch: bool,
    pub fail_clear: bool,
    clear_calls: AtomicUsize,
}

impl StubCartGateway {
    pub fn with_items(items: Vec<CartLine>) -> Self {
        Self {
            items,
            fail_fetch: false,
            fail_clear: false,
            clear_calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn unreachable() -> Self {
        Self {
            fail_fetch: true,
            ..Self::empty()
        }
    }

    pub fn cleared(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CartGateway for StubCartGateway {
    async fn get_cart(&self, _user_id: &str) -> anyhow::Result<CartSnapshot> {
        if self.fail_fetch {
            anyhow::bail!("connection refused");
        }
        Ok(CartSnapshot {
            items: self.items.clone(),
        })
    }

    async fn clear_cart(&self, _user_id: &str) -> anyhow::Result<()> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_clear {
            anyhow::bail!("connection reset");
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct StubPaymentGateway {
    pub fail: bool,
    notify_calls: AtomicUsize,
    pub last_order: Mutex<Option<Uuid>>,
}

impl StubPaymentGateway {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn notified(&self) -> usize {
        self.notify_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for StubPaymentGateway {
    async fn notify_order_created(&self, order_id: Uuid) -> anyhow::Result<String> {
        self.notify_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("payment service unavailable");
        }
        *self.last_order.lock().unwrap() = Some(order_id);
        Ok("payment initiated".to_string())
    }
}

/// The cart from the canonical end-to-end scenario: 2 x p1 @ 10.0 plus
/// 1 x p2 @ 5.0, totalling 25.0.
pub fn two_item_cart() -> Vec<CartLine> {
    vec![
        CartLine {
            product_id: "p1".into(),
            quantity: 2,
            price: 10.0,
        },
        CartLine {
            product_id: "p2".into(),
            quantity: 1,
            price: 5.0,
        },
    ]
}

pub fn service(
    repo: Arc<InMemoryOrderRepository>,
    cart: Arc<StubCartGateway>,
    payment: Arc<StubPaymentGateway>,
) -> OrderService {
    OrderService::new(repo, cart, payment)
}
