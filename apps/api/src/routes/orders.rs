//! `POST /api/orders/fee-quote`
//!
//! Commission depends on the seller's track: percentage-tier sellers pay
//! their tier's rate per order, subscription sellers pay processing only.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use blinno_core::fees::calculate_order_fee;
use blinno_core::{Currency, FeeBreakdown, Money, TierInfo};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderFeeQuoteRequest {
    #[ts(type = "number")]
    pub amount_minor: i64,
    pub currency: Currency,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderFeeQuote {
    pub tier: TierInfo,
    pub commission_bps: u32,
    pub fees: FeeBreakdown,
}

pub async fn quote_order_fee(
    State(state): State<Arc<AppState>>,
    AuthUser(seller_id): AuthUser,
    payload: Result<Json<OrderFeeQuoteRequest>, JsonRejection>,
) -> Result<Json<OrderFeeQuote>, ApiError> {
    let Json(body) = payload?;

    let tier = state.entitlements.resolver().resolve_tier(seller_id).await;
    let fees = calculate_order_fee(
        Money::from_minor(body.amount_minor),
        body.currency,
        &tier,
        &state.fees,
    )?;

    Ok(Json(OrderFeeQuote {
        tier,
        commission_bps: state.fees.order_commission(&tier).bps(),
        fees,
    }))
}

#[cfg(test)]
mod tests {
    use crate::build_router;
    use crate::test_support::{post_json, send, Harness};
    use axum::http::StatusCode;
    use blinno_db::SubscriptionRecord;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_percentage_seller_pays_commission() {
        let seller = Uuid::new_v4();
        let harness = Harness::new();
        harness.subscriptions.set(SubscriptionRecord::new(
            seller,
            Some("percentage"),
            None,
            Some("basic"),
        ));
        let app = build_router(harness.state(false));

        let (status, body) = send(
            app,
            post_json(
                "/api/orders/fee-quote",
                Some(seller),
                json!({ "amountMinor": 10_000, "currency": "USD" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["commissionBps"], 1000);
        assert_eq!(body["fees"]["platformFee"], 1000);
        assert_eq!(body["fees"]["paymentProcessingFee"], 320);
        assert_eq!(body["fees"]["creatorPayout"], 8_680);
    }

    #[tokio::test]
    async fn test_subscription_seller_pays_processing_only() {
        let seller = Uuid::new_v4();
        let harness = Harness::new();
        harness.subscriptions.set(SubscriptionRecord::new(
            seller,
            Some("subscription"),
            Some("professional"),
            None,
        ));
        let app = build_router(harness.state(false));

        let (_, body) = send(
            app,
            post_json(
                "/api/orders/fee-quote",
                Some(seller),
                json!({ "amountMinor": 10_000, "currency": "USD" }),
            ),
        )
        .await;

        assert_eq!(body["tier"]["tierName"], "professional");
        assert_eq!(body["commissionBps"], 0);
        assert_eq!(body["fees"]["platformFee"], 0);
        assert_eq!(body["fees"]["creatorPayout"], 9_680);
    }
}
