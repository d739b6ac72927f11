//! `POST /api/portfolios`

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use ts_rs::TS;

use blinno_core::validation::{validate_description, validate_title};
use blinno_core::ResourceKind;
use blinno_db::{NewPortfolio, PortfolioRecord};

use super::{ensure_can_create, insert_guard, limit_reached};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

pub async fn create_portfolio(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CreatePortfolioRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PortfolioRecord>), ApiError> {
    let Json(body) = payload?;

    validate_title(&body.title)?;
    validate_description(body.description.as_deref())?;

    let check = ensure_can_create(&state, user_id, ResourceKind::Portfolio).await?;

    let portfolio = NewPortfolio {
        title: body.title.trim().to_string(),
        description: body.description,
    };

    let record = state
        .resources
        .insert_portfolio(user_id, &portfolio, insert_guard(&state, &check))
        .await?
        .ok_or_else(|| limit_reached(ResourceKind::Portfolio, check.limit))?;

    info!(portfolio_id = %record.id, creator_id = %user_id, "Portfolio created");
    Ok((StatusCode::CREATED, Json(record)))
}
