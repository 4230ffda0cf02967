//! Common test utilities for integration tests.
//!
//! Tests run against the PostgreSQL database named by `TEST_DATABASE_URL`
//! and return early when it is unset. Every test seeds its own rows with
//! fresh ids, so tests can share one database and run in parallel.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use domain::models::stripe_account::ConnectAccountSummary;
use domain::services::{MockPaymentsProvider, PaymentsProvider};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use mentor_marketplace_api::{app::create_app_with_payments, config::Config};
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

/// Connects to the test database and applies migrations, or returns
/// `None` when `TEST_DATABASE_URL` is not set.
pub async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping integration test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    persistence::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// Test configuration: rate limiting off, no Stripe key.
pub fn test_config() -> Config {
    test_config_with(&[])
}

pub fn test_config_with(overrides: &[(&str, &str)]) -> Config {
    let database_url = std::env::var("TEST_DATABASE_URL").unwrap_or_default();
    let mut all = vec![("database.url", database_url.as_str())];
    all.extend_from_slice(overrides);
    Config::load_for_test(&all).expect("Failed to build test config")
}

/// Router without a payments provider.
pub fn app(pool: &PgPool) -> Router {
    app_with(test_config(), pool, None)
}

/// Router backed by the given mock provider.
pub fn app_with_mock(pool: &PgPool, mock: &Arc<MockPaymentsProvider>) -> Router {
    app_with(test_config(), pool, Some(Arc::clone(mock)))
}

pub fn app_with(config: Config, pool: &PgPool, mock: Option<Arc<MockPaymentsProvider>>) -> Router {
    let payments = mock.map(|m| m as Arc<dyn PaymentsProvider>);
    create_app_with_payments(config, pool.clone(), payments).expect("Failed to build app")
}

/// Bearer token for `user_id`, signed with the test secret.
pub fn bearer(user_id: Uuid) -> String {
    let email: String = SafeEmail().fake();
    let token = test_config()
        .auth
        .jwt_config()
        .expect("Invalid JWT config")
        .issue_access_token(user_id, Some(&email), 3600)
        .expect("Failed to issue token");
    format!("Bearer {}", token)
}

pub fn json_request(method: Method, uri: &str, body: Value, auth: Option<Uuid>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user_id) = auth {
        builder = builder.header(header::AUTHORIZATION, bearer(user_id));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn request(method: Method, uri: &str, auth: Option<Uuid>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = auth {
        builder = builder.header(header::AUTHORIZATION, bearer(user_id));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn parse_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Inserts a profile with a fake name and email.
pub async fn seed_profile(pool: &PgPool) -> Uuid {
    let name: String = Name().fake();
    seed_named_profile(pool, Some(&name)).await
}

pub async fn seed_named_profile(pool: &PgPool, name: Option<&str>) -> Uuid {
    let id = Uuid::new_v4();
    let email: String = SafeEmail().fake();
    sqlx::query("INSERT INTO profiles (id, name, email, role) VALUES ($1, $2, $3, 'mentor')")
        .bind(id)
        .bind(name)
        .bind(email)
        .execute(pool)
        .await
        .expect("Failed to seed profile");
    id
}

/// Mentor row fields worth varying in tests.
#[derive(Debug, Clone, Default)]
pub struct MentorSeed {
    pub name: Option<String>,
    pub title: Option<String>,
    pub university: Option<String>,
    pub rating: Option<f64>,
}

/// Inserts a profile and its mentor row.
pub async fn seed_mentor(pool: &PgPool, seed: MentorSeed) -> Uuid {
    let id = seed_named_profile(pool, seed.name.as_deref()).await;
    sqlx::query(
        "INSERT INTO mentors (id, title, university, rating, review_count) VALUES ($1, $2, $3, $4, 0)",
    )
    .bind(id)
    .bind(seed.title)
    .bind(seed.university)
    .bind(seed.rating)
    .execute(pool)
    .await
    .expect("Failed to seed mentor");
    id
}

pub async fn seed_service(pool: &PgPool, mentor_id: Uuid, name: &str, price: f64) -> Uuid {
    seed_service_with_product(pool, mentor_id, name, price, None).await
}

pub async fn seed_service_with_product(
    pool: &PgPool,
    mentor_id: Uuid,
    name: &str,
    price: f64,
    product_id: Option<&str>,
) -> Uuid {
    let row: (Uuid,) = sqlx::query_as(
        "INSERT INTO services (mentor_id, name, price, stripe_product_id) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(mentor_id)
    .bind(name)
    .bind(price)
    .bind(product_id)
    .fetch_one(pool)
    .await
    .expect("Failed to seed service");
    row.0
}

/// Stores an account id on the mentor row with all flags false.
pub async fn link_account(pool: &PgPool, mentor_id: Uuid, account_id: &str) {
    sqlx::query("UPDATE mentors SET stripe_connect_account_id = $2 WHERE id = $1")
        .bind(mentor_id)
        .bind(account_id)
        .execute(pool)
        .await
        .expect("Failed to link account");
}

/// Unique account id in the provider's format.
pub fn account_id() -> String {
    format!("acct_test{}", Uuid::new_v4().simple())
}

pub fn account(id: &str, details_submitted: bool, charges_enabled: bool, payouts_enabled: bool) -> ConnectAccountSummary {
    ConnectAccountSummary {
        id: id.to_string(),
        details_submitted,
        charges_enabled,
        payouts_enabled,
    }
}

/// The three cached onboarding flags of a mentor.
pub async fn mentor_flags(pool: &PgPool, mentor_id: Uuid) -> (Option<String>, bool, bool, bool) {
    sqlx::query_as(
        r#"
        SELECT stripe_connect_account_id, stripe_account_details_submitted,
               stripe_account_charges_enabled, stripe_account_payouts_enabled
        FROM mentors WHERE id = $1
        "#,
    )
    .bind(mentor_id)
    .fetch_one(pool)
    .await
    .expect("Failed to read mentor flags")
}
