//! `GET /api/subscription/limits`
//!
//! What the dashboard shows next to the create buttons: the resolved plan
//! and one entitlement per limited resource.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use ts_rs::TS;

use blinno_core::{EntitlementResult, ResourceKind, TierInfo};

use crate::auth::AuthUser;
use crate::AppState;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LimitsResponse {
    pub tier: TierInfo,
    pub products: EntitlementResult,
    pub portfolios: EntitlementResult,
    /// Per-order commission in basis points; 0 on the subscription track.
    pub order_commission_bps: u32,
}

pub async fn limits(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Json<LimitsResponse> {
    let entitlements = &state.entitlements;
    let tier = entitlements.resolver().resolve_tier(user_id).await;

    let products = entitlements
        .check_against(&tier, user_id, ResourceKind::Product)
        .await;
    let portfolios = entitlements
        .check_against(&tier, user_id, ResourceKind::Portfolio)
        .await;

    Json(LimitsResponse {
        tier,
        products,
        portfolios,
        order_commission_bps: state.fees.order_commission(&tier).bps(),
    })
}

#[cfg(test)]
mod tests {
    use crate::build_router;
    use crate::test_support::{get, send, FakeResources, FakeSubscriptions, Harness};
    use axum::http::StatusCode;
    use blinno_core::ResourceKind;
    use blinno_db::SubscriptionRecord;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_limits_for_creator() {
        let user = Uuid::new_v4();
        let harness = Harness::new();
        harness.subscriptions.set(SubscriptionRecord::new(
            user,
            Some("subscription"),
            Some("creator"),
            None,
        ));
        harness.resources.set_count(ResourceKind::Product, user, 25);
        harness.resources.set_count(ResourceKind::Portfolio, user, 2);
        let app = build_router(harness.state(false));

        let (status, body) = send(app, get("/api/subscription/limits", Some(user))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tier"]["tierName"], "creator");
        assert_eq!(body["tier"]["pricingModel"], "subscription");
        assert_eq!(body["products"]["canCreate"], false);
        assert_eq!(body["products"]["currentCount"], 25);
        assert_eq!(body["portfolios"]["canCreate"], true);
        assert_eq!(body["portfolios"]["limit"], 10);
        assert_eq!(body["orderCommissionBps"], 0);
    }

    #[tokio::test]
    async fn test_limits_for_percentage_pro() {
        let user = Uuid::new_v4();
        let harness = Harness::new();
        harness.subscriptions.set(SubscriptionRecord::new(
            user,
            Some("percentage"),
            None,
            Some("pro"),
        ));
        let app = build_router(harness.state(false));

        let (_, body) = send(app, get("/api/subscription/limits", Some(user))).await;

        assert_eq!(body["products"]["limit"], -1);
        assert_eq!(body["products"]["currentCount"], 0);
        assert_eq!(body["orderCommissionBps"], 500);
    }

    #[tokio::test]
    async fn test_limits_when_stores_are_down() {
        let harness = Harness::with(FakeSubscriptions::failing(), FakeResources::failing());
        let app = build_router(harness.state(false));

        let (status, body) =
            send(app, get("/api/subscription/limits", Some(Uuid::new_v4()))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tier"]["tierName"], "free");
        assert_eq!(body["products"]["canCreate"], true);
        assert_eq!(body["products"]["limit"], 5);
        assert_eq!(body["portfolios"]["currentCount"], 0);
    }
}
