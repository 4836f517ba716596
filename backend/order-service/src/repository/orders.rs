use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Order, OrderDraft, OrderItem, OrderStatus};
use crate::error::{ServiceError, ServiceResult};

/// Storage port for orders.
///
/// The id is assigned on create. `update_status` and `delete` fail with
/// `NotFound` when the referenced order does not exist.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, draft: OrderDraft) -> ServiceResult<Order>;

    async fn find_by_id(&self, id: Uuid) -> ServiceResult<Order>;

    async fn list(&self) -> ServiceResult<Vec<Order>>;

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> ServiceResult<Order>;

    async fn delete(&self, id: Uuid) -> ServiceResult<()>;
}

/// Postgres-backed repository. Items are stored as a jsonb copy of the
/// order lines.
#[derive(Clone)]
pub struct SqlxOrderRepository {
    pool: PgPool,
}

impl SqlxOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: String,
    items: Json<Vec<OrderItem>>,
    total: f64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = ServiceError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        // The status column only ever holds members of the closed set, but
        // the parse still guards against rows written by anything else.
        let status = row.status.parse::<OrderStatus>()?;
        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            items: row.items.0,
            total: row.total,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl OrderRepository for SqlxOrderRepository {
    async fn create(&self, draft: OrderDraft) -> ServiceResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (user_id, items, total, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, items, total, status, created_at, updated_at
            "#,
        )
        .bind(&draft.user_id)
        .bind(Json(&draft.items))
        .bind(draft.total)
        .bind(draft.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> ServiceResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, items, total, status, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("order {}", id)))?;

        row.try_into()
    }

    async fn list(&self) -> ServiceResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, items, total, status, created_at, updated_at
            FROM orders
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> ServiceResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, items, total, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("order {}", id)))?;

        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound(format!("order {}", id)));
        }
        Ok(())
    }
}
