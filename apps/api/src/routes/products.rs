//! `POST /api/products`

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use ts_rs::TS;

use blinno_core::validation::{validate_description, validate_price_minor, validate_title};
use blinno_core::{Currency, Money, ResourceKind};
use blinno_db::{NewProduct, ProductRecord};

use super::{ensure_can_create, insert_guard, limit_reached};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price in minor units of `currency`.
    #[serde(default)]
    #[ts(type = "number")]
    pub price_minor: i64,
    /// Defaults to USD.
    #[serde(default)]
    pub currency: Option<Currency>,
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductRecord>), ApiError> {
    let Json(body) = payload?;

    validate_title(&body.title)?;
    validate_description(body.description.as_deref())?;
    validate_price_minor(body.price_minor)?;

    let check = ensure_can_create(&state, user_id, ResourceKind::Product).await?;

    let product = NewProduct {
        title: body.title.trim().to_string(),
        description: body.description,
        price: Money::from_minor(body.price_minor),
        currency: body.currency.unwrap_or(Currency::Usd),
    };

    let record = state
        .resources
        .insert_product(user_id, &product, insert_guard(&state, &check))
        .await?
        .ok_or_else(|| limit_reached(ResourceKind::Product, check.limit))?;

    info!(product_id = %record.id, creator_id = %user_id, "Product created");
    Ok((StatusCode::CREATED, Json(record)))
}
