//! `POST /api/tips/quote` and `POST /api/tips`
//!
//! A quote is the fee split for an amount under the configured schedule.
//! Creating a tip computes the same split and writes it to the ledger next
//! to the tip.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;
use uuid::Uuid;

use blinno_core::fees::calculate_tip_fee;
use blinno_core::validation::validate_tip_message;
use blinno_core::{Currency, FeeBreakdown, Money};
use blinno_db::{NewTip, TipRecord};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TipQuoteRequest {
    #[ts(type = "number")]
    pub amount_minor: i64,
    pub currency: Currency,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateTipRequest {
    #[ts(type = "string")]
    pub creator_id: Uuid,
    #[ts(type = "number")]
    pub amount_minor: i64,
    pub currency: Currency,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTipResponse {
    pub tip: TipRecord,
    pub fee_id: Uuid,
    pub fees: FeeBreakdown,
}

pub async fn quote_tip(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TipQuoteRequest>, JsonRejection>,
) -> Result<Json<FeeBreakdown>, ApiError> {
    let Json(body) = payload?;

    let fees = calculate_tip_fee(Money::from_minor(body.amount_minor), body.currency, &state.fees)?;
    Ok(Json(fees))
}

pub async fn create_tip(
    State(state): State<Arc<AppState>>,
    AuthUser(supporter_id): AuthUser,
    payload: Result<Json<CreateTipRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateTipResponse>), ApiError> {
    let Json(body) = payload?;

    if body.creator_id == supporter_id {
        return Err(ApiError::InvalidRequest("Cannot tip yourself".to_string()));
    }
    validate_tip_message(body.message.as_deref())?;

    let fees = calculate_tip_fee(Money::from_minor(body.amount_minor), body.currency, &state.fees)?;

    let recorded = state
        .tips
        .record_tip(&NewTip {
            creator_id: body.creator_id,
            supporter_id,
            message: body.message,
            fees,
        })
        .await?;

    info!(
        tip_id = %recorded.tip.id,
        creator_id = %body.creator_id,
        amount = %fees.subtotal.display(fees.currency),
        platform_fee = fees.platform_fee.minor(),
        "Tip recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateTipResponse {
            tip: recorded.tip,
            fee_id: recorded.fee_id,
            fees,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_router;
    use crate::test_support::{post_json, send, Harness};
    use serde_json::json;

    #[test]
    fn test_amounts_export_as_number() {
        assert!(TipQuoteRequest::decl().contains("amountMinor: number"));
        assert!(CreateTipRequest::decl().contains("amountMinor: number"));
    }

    #[tokio::test]
    async fn test_quote_hundred_dollars() {
        let app = build_router(Harness::new().state(false));

        let (status, body) = send(
            app,
            post_json(
                "/api/tips/quote",
                None,
                json!({ "amountMinor": 10_000, "currency": "USD" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subtotal"], 10_000);
        assert_eq!(body["platformFee"], 500);
        assert_eq!(body["paymentProcessingFee"], 320);
        assert_eq!(body["totalFees"], 820);
        assert_eq!(body["creatorPayout"], 9_180);
        assert_eq!(body["total"], 10_000);
    }

    #[tokio::test]
    async fn test_quote_rejects_zero() {
        let app = build_router(Harness::new().state(false));
        let (status, _) = send(
            app,
            post_json("/api/tips/quote", None, json!({ "amountMinor": 0, "currency": "USD" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_quote_rejects_unknown_currency() {
        let app = build_router(Harness::new().state(false));
        let (status, _) = send(
            app,
            post_json("/api/tips/quote", None, json!({ "amountMinor": 100, "currency": "XYZ" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_records_tip_with_fees() {
        let harness = Harness::new();
        let app = build_router(harness.state(false));
        let supporter = Uuid::new_v4();
        let creator = Uuid::new_v4();

        let (status, body) = send(
            app,
            post_json(
                "/api/tips",
                Some(supporter),
                json!({
                    "creatorId": creator,
                    "amountMinor": 5_000,
                    "currency": "MWK",
                    "message": "Zikomo!"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["tip"]["supporterId"], supporter.to_string());
        assert_eq!(body["fees"]["currency"], "MWK");

        let recorded = harness.tips.recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        let fees = recorded[0].fees;
        assert_eq!(recorded[0].creator_id, creator);
        assert_eq!(
            fees.platform_fee + fees.payment_processing_fee + fees.creator_payout,
            fees.subtotal
        );
    }

    #[tokio::test]
    async fn test_cannot_tip_self() {
        let harness = Harness::new();
        let app = build_router(harness.state(false));
        let user = Uuid::new_v4();

        let (status, _) = send(
            app,
            post_json(
                "/api/tips",
                Some(user),
                json!({ "creatorId": user, "amountMinor": 500, "currency": "USD" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(harness.tips.recorded.lock().unwrap().is_empty());
    }
}
