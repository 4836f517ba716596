use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{CartSnapshot, Order, OrderDraft, OrderStatus};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::OrderRepository;

/// Remote cart collaborator, reachable only by RPC.
#[async_trait]
pub trait CartGateway: Send + Sync {
    async fn get_cart(&self, user_id: &str) -> anyhow::Result<CartSnapshot>;

    async fn clear_cart(&self, user_id: &str) -> anyhow::Result<()>;
}

/// Remote payment collaborator. It processes payments on its own schedule
/// and reports outcomes back through `update_status`.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn notify_order_created(&self, order_id: Uuid) -> anyhow::Result<String>;
}

/// Failure classification of a saga step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    /// Failure aborts the whole operation.
    Required,
    /// Failure is logged and suppressed; checkout continues.
    BestEffort,
}

/// The ordered steps of the checkout saga, each with its failure policy.
///
/// Required steps are the ones that would leave inconsistent state if
/// skipped; best-effort steps are idempotent-recoverable later (a missed
/// payment notification has a reconciliation path, a stale cart is a lesser
/// harm than losing a persisted order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SagaStep {
    FetchCart,
    PersistOrder,
    NotifyPayment,
    ClearCart,
}

impl SagaStep {
    pub fn policy(self) -> StepPolicy {
        match self {
            SagaStep::FetchCart | SagaStep::PersistOrder => StepPolicy::Required,
            SagaStep::NotifyPayment | SagaStep::ClearCart => StepPolicy::BestEffort,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SagaStep::FetchCart => "fetch-cart",
            SagaStep::PersistOrder => "persist-order",
            SagaStep::NotifyPayment => "notify-payment",
            SagaStep::ClearCart => "clear-cart",
        }
    }
}

/// Coordinates the checkout saga and the order lifecycle.
///
/// All remote calls are synchronous and strictly sequential for one
/// in-flight request; nothing is retried. The only shared state is behind
/// the collaborators themselves.
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    cart: Arc<dyn CartGateway>,
    payment: Arc<dyn PaymentGateway>,
}

impl OrderService {
    pub fn new(
        repo: Arc<dyn OrderRepository>,
        cart: Arc<dyn CartGateway>,
        payment: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            repo,
            cart,
            payment,
        }
    }

    /// Turn the caller's cart into a persisted `PENDING` order.
    ///
    /// Step order and failure policy (see [`SagaStep`]):
    /// 1. fetch cart — required, fails as `UpstreamUnavailable`
    /// 2. reject an empty cart — `EmptyCart`, nothing persisted
    /// 3. build the order from the snapshot (lines copied verbatim)
    /// 4. persist — required; nothing downstream has happened yet, so no
    ///    compensation is needed on failure
    /// 5. notify payment — best-effort
    /// 6. clear the cart — best-effort
    /// 7. return the persisted order regardless of steps 5–6
    pub async fn place_order_from_cart(&self, user_id: &str) -> ServiceResult<Order> {
        let cart = self.cart.get_cart(user_id).await.map_err(|e| {
            ServiceError::UpstreamUnavailable(format!("{}: {:#}", SagaStep::FetchCart.as_str(), e))
        })?;

        if cart.is_empty() {
            return Err(ServiceError::EmptyCart);
        }

        let draft = OrderDraft::from_cart(user_id, &cart);
        let order = self.repo.create(draft).await?;

        info!(
            order_id = %order.id,
            user_id,
            total = order.total,
            "order created from cart"
        );

        let notified = self
            .payment
            .notify_order_created(order.id)
            .await
            .map(|ack| info!(order_id = %order.id, "payment service acknowledged: {}", ack));
        log_best_effort(SagaStep::NotifyPayment, notified);

        let cleared = self.cart.clear_cart(user_id).await;
        log_best_effort(SagaStep::ClearCart, cleared);

        Ok(order)
    }

    /// Persist a directly supplied order (gRPC surface). The status is
    /// forced to `PENDING`; payment notification is best-effort, as in the
    /// cart flow.
    pub async fn create_order(&self, mut draft: OrderDraft) -> ServiceResult<Order> {
        draft.status = OrderStatus::Pending;
        let order = self.repo.create(draft).await?;

        let notified = self
            .payment
            .notify_order_created(order.id)
            .await
            .map(|ack| info!(order_id = %order.id, "payment service acknowledged: {}", ack));
        log_best_effort(SagaStep::NotifyPayment, notified);

        Ok(order)
    }

    pub async fn get_order(&self, id: Uuid) -> ServiceResult<Order> {
        self.repo.find_by_id(id).await
    }

    pub async fn list_orders(&self) -> ServiceResult<Vec<Order>> {
        self.repo.list().await
    }

    /// Transition an order to a new status.
    ///
    /// The status string must belong to the closed [`OrderStatus`] set;
    /// anything else fails with `InvalidStatus` before the repository is
    /// touched. Beyond that the only legality check is that the order
    /// exists.
    pub async fn update_status(&self, id: Uuid, status: &str) -> ServiceResult<Order> {
        let status: OrderStatus = status.parse()?;
        let order = self.repo.update_status(id, status).await?;
        info!(order_id = %order.id, status = %order.status, "order status updated");
        Ok(order)
    }

    pub async fn delete_order(&self, id: Uuid) -> ServiceResult<()> {
        self.repo.delete(id).await
    }
}

/// The single funnel for best-effort step outcomes: failures are logged
/// with the step name and swallowed, never surfaced to the caller.
fn log_best_effort(step: SagaStep, result: anyhow::Result<()>) {
    debug_assert_eq!(step.policy(), StepPolicy::BestEffort);
    if let Err(e) = result {
        warn!(
            step = step.as_str(),
            "best-effort saga step failed, continuing checkout: {:#}", e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_policies_are_fixed() {
        assert_eq!(SagaStep::FetchCart.policy(), StepPolicy::Required);
        assert_eq!(SagaStep::PersistOrder.policy(), StepPolicy::Required);
        assert_eq!(SagaStep::NotifyPayment.policy(), StepPolicy::BestEffort);
        assert_eq!(SagaStep::ClearCart.policy(), StepPolicy::BestEffort);
    }
}
