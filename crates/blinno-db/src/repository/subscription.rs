//! # Subscription Repository
//!
//! Read-only access to the `subscriptions` table. Rows are written by the
//! billing webhooks, never by this service.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use crate::store::{SubscriptionRecord, SubscriptionStore};

/// Repository for subscription lookups.
#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    /// Creates a new SubscriptionRepository.
    pub fn new(pool: PgPool) -> Self {
        SubscriptionRepository { pool }
    }
}

#[async_trait]
impl SubscriptionStore for SubscriptionRepository {
    async fn find_by_user(&self, user_id: Uuid) -> DbResult<Option<SubscriptionRecord>> {
        debug!(user_id = %user_id, "Fetching subscription");

        let record = sqlx::query_as::<_, SubscriptionRecord>(
            r#"
            SELECT
                user_id, tier, pricing_model, percentage_tier,
                status, current_period_end
            FROM subscriptions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
