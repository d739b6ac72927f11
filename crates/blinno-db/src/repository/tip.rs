//! # Tip Repository
//!
//! Writes a tip and its `platform_fees` audit row in a single transaction,
//! so the ledger never holds a tip without its fee split.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use blinno_core::FeeAbsorption;

use crate::error::DbResult;
use crate::store::{NewTip, RecordedTip, TipLedger, TipRecord};

/// `platform_fees.transaction_type` for tips.
pub const TRANSACTION_TYPE_TIP: &str = "tip";

/// Repository for the tip ledger.
#[derive(Debug, Clone)]
pub struct TipRepository {
    pool: PgPool,
}

impl TipRepository {
    /// Creates a new TipRepository.
    pub fn new(pool: PgPool) -> Self {
        TipRepository { pool }
    }
}

#[async_trait]
impl TipLedger for TipRepository {
    async fn record_tip(&self, tip: &NewTip) -> DbResult<RecordedTip> {
        let fees = &tip.fees;
        debug!(
            creator_id = %tip.creator_id,
            amount = fees.subtotal.minor(),
            currency = %fees.currency,
            "Recording tip"
        );

        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, TipRecord>(
            r#"
            INSERT INTO tips (creator_id, supporter_id, amount_minor, currency, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, creator_id, supporter_id, amount_minor, currency, message, created_at
            "#,
        )
        .bind(tip.creator_id)
        .bind(tip.supporter_id)
        .bind(fees.subtotal.minor())
        .bind(fees.currency.code())
        .bind(&tip.message)
        .fetch_one(&mut *tx)
        .await?;

        let fee_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO platform_fees (
                transaction_type, transaction_id, currency,
                subtotal_minor, platform_fee_minor, processing_fee_minor,
                creator_payout_minor, total_minor, absorption
            ) VALUES (
                $1, $2, $3,
                $4, $5, $6,
                $7, $8, $9
            )
            RETURNING id
            "#,
        )
        .bind(TRANSACTION_TYPE_TIP)
        .bind(record.id)
        .bind(fees.currency.code())
        .bind(fees.subtotal.minor())
        .bind(fees.platform_fee.minor())
        .bind(fees.payment_processing_fee.minor())
        .bind(fees.creator_payout.minor())
        .bind(fees.total.minor())
        .bind(absorption_column(fees.absorption))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(tip_id = %record.id, fee_id = %fee_id, "Tip recorded");
        Ok(RecordedTip { tip: record, fee_id })
    }
}

fn absorption_column(absorption: FeeAbsorption) -> &'static str {
    match absorption {
        FeeAbsorption::Creator => "creator",
        FeeAbsorption::Buyer => "buyer",
    }
}
