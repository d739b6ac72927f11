//! # Resource Repository
//!
//! Counts and inserts for the two limited resources, `products` and
//! `portfolios`.
//!
//! ## Guarded Inserts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              insert_*(owner, .., max_owned = Some(cap))                 │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    pg_advisory_xact_lock(hash("products:<owner>"))  ← serializes owner │
//! │    SELECT COUNT(*) FROM products WHERE creator_id = owner              │
//! │       │                                                                 │
//! │       ├── count >= cap ──► ROLLBACK, Ok(None)                          │
//! │       │                                                                 │
//! │       └── count <  cap ──► INSERT ... RETURNING *                      │
//! │  COMMIT                    (lock released here)                         │
//! │                                                                         │
//! │  max_owned = None skips the lock and the count.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::{PgConnection, PgExecutor, PgPool};
use tracing::debug;
use uuid::Uuid;

use blinno_core::ResourceKind;

use crate::error::DbResult;
use crate::store::{NewPortfolio, NewProduct, PortfolioRecord, ProductRecord, ResourceStore};

/// Repository for products and portfolios.
#[derive(Debug, Clone)]
pub struct ResourceRepository {
    pool: PgPool,
}

impl ResourceRepository {
    /// Creates a new ResourceRepository.
    pub fn new(pool: PgPool) -> Self {
        ResourceRepository { pool }
    }
}

#[async_trait]
impl ResourceStore for ResourceRepository {
    async fn count_owned(&self, kind: ResourceKind, owner: Uuid) -> DbResult<i64> {
        count_owned(&self.pool, kind, owner).await
    }

    async fn insert_product(
        &self,
        owner: Uuid,
        product: &NewProduct,
        max_owned: Option<u32>,
    ) -> DbResult<Option<ProductRecord>> {
        let mut tx = self.pool.begin().await?;

        if let Some(cap) = max_owned {
            if !reserve_slot(&mut tx, ResourceKind::Product, owner, cap).await? {
                tx.rollback().await?;
                return Ok(None);
            }
        }

        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            INSERT INTO products (creator_id, title, description, price_minor, currency)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, creator_id, title, description, price_minor, currency, created_at
            "#,
        )
        .bind(owner)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price.minor())
        .bind(product.currency.code())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(id = %record.id, creator_id = %owner, "Product inserted");
        Ok(Some(record))
    }

    async fn insert_portfolio(
        &self,
        owner: Uuid,
        portfolio: &NewPortfolio,
        max_owned: Option<u32>,
    ) -> DbResult<Option<PortfolioRecord>> {
        let mut tx = self.pool.begin().await?;

        if let Some(cap) = max_owned {
            if !reserve_slot(&mut tx, ResourceKind::Portfolio, owner, cap).await? {
                tx.rollback().await?;
                return Ok(None);
            }
        }

        let record = sqlx::query_as::<_, PortfolioRecord>(
            r#"
            INSERT INTO portfolios (creator_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, creator_id, title, description, created_at
            "#,
        )
        .bind(owner)
        .bind(&portfolio.title)
        .bind(&portfolio.description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(id = %record.id, creator_id = %owner, "Portfolio inserted");
        Ok(Some(record))
    }
}

// =============================================================================
// Helpers
// =============================================================================

async fn count_owned<'e, E>(executor: E, kind: ResourceKind, owner: Uuid) -> DbResult<i64>
where
    E: PgExecutor<'e>,
{
    // Table names come from a closed enum, never from input.
    let sql = format!("SELECT COUNT(*) FROM {} WHERE creator_id = $1", kind.table());

    let count: i64 = sqlx::query_scalar(&sql)
        .bind(owner)
        .fetch_one(executor)
        .await?;

    debug!(kind = %kind, owner = %owner, count, "Counted owned resources");
    Ok(count)
}

/// Takes the per-owner lock for `kind` and reports whether one more row fits
/// under `cap`. Must run inside a transaction.
async fn reserve_slot(
    conn: &mut PgConnection,
    kind: ResourceKind,
    owner: Uuid,
    cap: u32,
) -> DbResult<bool> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
        .bind(lock_key(kind, owner))
        .execute(&mut *conn)
        .await?;

    let count = count_owned(&mut *conn, kind, owner).await?;
    Ok(count < i64::from(cap))
}

fn lock_key(kind: ResourceKind, owner: Uuid) -> String {
    format!("{}:{}", kind.table(), owner)
}
