//! In-memory store fakes for service and route tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use blinno_core::{FeeSchedule, ResourceKind};
use blinno_db::{
    DbError, DbResult, NewPortfolio, NewProduct, NewTip, PortfolioRecord, ProductRecord,
    RecordedTip, ResourceStore, SubscriptionRecord, SubscriptionStore, TipLedger, TipRecord,
};

use crate::auth::JwtManager;
use crate::AppState;

pub const TEST_SECRET: &str = "test-jwt-secret";

#[derive(Default)]
pub struct FakeSubscriptions {
    records: Mutex<HashMap<Uuid, SubscriptionRecord>>,
    fail: bool,
}

impl FakeSubscriptions {
    pub fn failing() -> Self {
        FakeSubscriptions {
            fail: true,
            ..Default::default()
        }
    }

    pub fn set(&self, record: SubscriptionRecord) {
        self.records.lock().unwrap().insert(record.user_id, record);
    }
}

#[async_trait]
impl SubscriptionStore for FakeSubscriptions {
    async fn find_by_user(&self, user_id: Uuid) -> DbResult<Option<SubscriptionRecord>> {
        if self.fail {
            return Err(DbError::ConnectionFailed("connection refused".to_string()));
        }
        Ok(self.records.lock().unwrap().get(&user_id).cloned())
    }
}

#[derive(Default)]
pub struct FakeResources {
    counts: Mutex<HashMap<(ResourceKind, Uuid), i64>>,
    fail: bool,
    pub count_calls: AtomicUsize,
    pub products: Mutex<Vec<ProductRecord>>,
    pub portfolios: Mutex<Vec<PortfolioRecord>>,
    /// `max_owned` of every insert, in order.
    pub guards: Mutex<Vec<Option<u32>>>,
}

impl FakeResources {
    /// Count queries fail; inserts still succeed.
    pub fn failing() -> Self {
        FakeResources {
            fail: true,
            ..Default::default()
        }
    }

    pub fn set_count(&self, kind: ResourceKind, owner: Uuid, count: i64) {
        self.counts.lock().unwrap().insert((kind, owner), count);
    }

    fn current(&self, kind: ResourceKind, owner: Uuid) -> i64 {
        self.counts
            .lock()
            .unwrap()
            .get(&(kind, owner))
            .copied()
            .unwrap_or(0)
    }

    /// Applies the guard and bumps the count; false when the guard refuses.
    fn admit(&self, kind: ResourceKind, owner: Uuid, max_owned: Option<u32>) -> bool {
        self.guards.lock().unwrap().push(max_owned);
        let count = self.current(kind, owner);
        if let Some(cap) = max_owned {
            if count >= i64::from(cap) {
                return false;
            }
        }
        self.set_count(kind, owner, count + 1);
        true
    }
}

#[async_trait]
impl ResourceStore for FakeResources {
    async fn count_owned(&self, kind: ResourceKind, owner: Uuid) -> DbResult<i64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DbError::QueryFailed("statement timeout".to_string()));
        }
        Ok(self.current(kind, owner))
    }

    async fn insert_product(
        &self,
        owner: Uuid,
        product: &NewProduct,
        max_owned: Option<u32>,
    ) -> DbResult<Option<ProductRecord>> {
        if !self.admit(ResourceKind::Product, owner, max_owned) {
            return Ok(None);
        }
        let record = ProductRecord {
            id: Uuid::new_v4(),
            creator_id: owner,
            title: product.title.clone(),
            description: product.description.clone(),
            price_minor: product.price.minor(),
            currency: product.currency.code().to_string(),
            created_at: Utc::now(),
        };
        self.products.lock().unwrap().push(record.clone());
        Ok(Some(record))
    }

    async fn insert_portfolio(
        &self,
        owner: Uuid,
        portfolio: &NewPortfolio,
        max_owned: Option<u32>,
    ) -> DbResult<Option<PortfolioRecord>> {
        if !self.admit(ResourceKind::Portfolio, owner, max_owned) {
            return Ok(None);
        }
        let record = PortfolioRecord {
            id: Uuid::new_v4(),
            creator_id: owner,
            title: portfolio.title.clone(),
            description: portfolio.description.clone(),
            created_at: Utc::now(),
        };
        self.portfolios.lock().unwrap().push(record.clone());
        Ok(Some(record))
    }
}

#[derive(Default)]
pub struct FakeTips {
    pub recorded: Mutex<Vec<NewTip>>,
}

#[async_trait]
impl TipLedger for FakeTips {
    async fn record_tip(&self, tip: &NewTip) -> DbResult<RecordedTip> {
        self.recorded.lock().unwrap().push(tip.clone());
        Ok(RecordedTip {
            tip: TipRecord {
                id: Uuid::new_v4(),
                creator_id: tip.creator_id,
                supporter_id: tip.supporter_id,
                amount_minor: tip.fees.subtotal.minor(),
                currency: tip.fees.currency.code().to_string(),
                message: tip.message.clone(),
                created_at: Utc::now(),
            },
            fee_id: Uuid::new_v4(),
        })
    }
}

/// Fakes wired into an `AppState`, kept around for assertions.
pub struct Harness {
    pub subscriptions: Arc<FakeSubscriptions>,
    pub resources: Arc<FakeResources>,
    pub tips: Arc<FakeTips>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(FakeSubscriptions::default(), FakeResources::default())
    }

    pub fn with(subscriptions: FakeSubscriptions, resources: FakeResources) -> Self {
        Harness {
            subscriptions: Arc::new(subscriptions),
            resources: Arc::new(resources),
            tips: Arc::new(FakeTips::default()),
        }
    }

    pub fn state(&self, strict_limits: bool) -> Arc<AppState> {
        Arc::new(
            AppState::new(
                self.subscriptions.clone(),
                self.resources.clone(),
                self.tips.clone(),
                JwtManager::new(TEST_SECRET),
                FeeSchedule::default(),
            )
            .with_strict_limits(strict_limits),
        )
    }
}

pub fn bearer(user_id: Uuid) -> String {
    let token = JwtManager::new(TEST_SECRET)
        .generate_token(user_id, 3600)
        .unwrap();
    format!("Bearer {}", token)
}

// =============================================================================
// HTTP helpers
// =============================================================================

pub fn post_json(uri: &str, user: Option<Uuid>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user) = user {
        builder = builder.header(header::AUTHORIZATION, bearer(user));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, user: Option<Uuid>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user) = user {
        builder = builder.header(header::AUTHORIZATION, bearer(user));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
