//! HTTP routes.
//!
//! | Method | Path                       | Auth   |
//! |--------|----------------------------|--------|
//! | GET    | `/health`                  | none   |
//! | GET    | `/api/subscription/limits` | bearer |
//! | POST   | `/api/products`            | bearer |
//! | POST   | `/api/portfolios`          | bearer |
//! | POST   | `/api/tips/quote`          | none   |
//! | POST   | `/api/tips`                | bearer |
//! | POST   | `/api/orders/fee-quote`    | bearer |

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tracing::info;
use uuid::Uuid;

use blinno_core::{CoreError, EntitlementResult, Limit, ResourceKind};

use crate::error::ApiError;
use crate::AppState;

pub mod health;
pub mod orders;
pub mod portfolios;
pub mod products;
pub mod subscription;
pub mod tips;

/// Routes without middleware; see [`crate::build_router`].
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/subscription/limits", get(subscription::limits))
        .route("/api/products", post(products::create_product))
        .route("/api/portfolios", post(portfolios::create_portfolio))
        .route("/api/tips/quote", post(tips::quote_tip))
        .route("/api/tips", post(tips::create_tip))
        .route("/api/orders/fee-quote", post(orders::quote_order_fee))
        .with_state(state)
}

/// Runs the limit check for a create request and turns a denial into 403.
pub(crate) async fn ensure_can_create(
    state: &AppState,
    user_id: Uuid,
    kind: ResourceKind,
) -> Result<EntitlementResult, ApiError> {
    let check = state.entitlements.check_limit(user_id, kind).await;

    if !check.can_create {
        info!(
            user_id = %user_id,
            kind = %kind,
            limit = %check.limit,
            count = check.current_count,
            "Create denied by plan limit"
        );
        return Err(limit_reached(kind, check.limit));
    }

    Ok(check)
}

/// `max_owned` for the store insert: the cap in strict mode, else none.
pub(crate) fn insert_guard(state: &AppState, check: &EntitlementResult) -> Option<u32> {
    if state.strict_limits {
        check.limit.cap()
    } else {
        None
    }
}

pub(crate) fn limit_reached(kind: ResourceKind, limit: Limit) -> ApiError {
    CoreError::LimitReached { kind, limit }.into()
}
