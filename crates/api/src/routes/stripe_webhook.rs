//! Stripe webhook receiver.
//!
//! Only `account.updated` is acted on: it refreshes the cached onboarding
//! flags of the mentor owning the account.

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use domain::models::stripe_account::ConnectAccountSummary;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_webhook_event;
use crate::routes::stripe_connect::connect_service;
use crate::services::stripe::AccountObject;

pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Maximum age of a signed payload, in seconds.
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Missing Stripe-Signature header")]
    Missing,
    #[error("Malformed Stripe-Signature header")]
    Malformed,
    #[error("Signature timestamp outside tolerance")]
    Expired,
    #[error("No matching signature")]
    Mismatch,
}

/// Verifies a `t=<unix>,v1=<hex>` signature header over `payload`.
///
/// Any of several `v1` entries may match.
pub fn verify_signature(
    secret: &str,
    header: Option<&str>,
    payload: &[u8],
    now: i64,
) -> Result<(), SignatureError> {
    let header = header.ok_or(SignatureError::Missing)?;

    let mut timestamp: Option<i64> = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = Some(value.parse().map_err(|_| SignatureError::Malformed)?)
            }
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::Malformed)?;
    if signatures.is_empty() {
        return Err(SignatureError::Malformed);
    }
    if now.abs_diff(timestamp) > SIGNATURE_TOLERANCE_SECS as u64 {
        return Err(SignatureError::Expired);
    }

    let mut signed = format!("{}.", timestamp).into_bytes();
    signed.extend_from_slice(payload);

    if signatures
        .iter()
        .any(|sig| shared::crypto::verify_hmac_sha256_hex(secret, &signed, sig))
    {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

#[derive(Debug, Deserialize)]
struct Event {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    data: EventData,
}

#[derive(Debug, Deserialize)]
struct EventData {
    object: Value,
}

/// Receive a Stripe event.
///
/// POST /api/v1/stripe/webhook
pub async fn receive_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let secret = &state.config.stripe.webhook_secret;
    if !state.config.stripe.webhook_configured() {
        return Err(ApiError::ServiceUnavailable(
            "Stripe webhook secret is not configured".to_string(),
        ));
    }

    let header = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    verify_signature(secret, header, &body, chrono::Utc::now().timestamp()).map_err(|e| {
        tracing::warn!(error = %e, "Rejected Stripe webhook");
        ApiError::Validation(e.to_string())
    })?;

    let event: Event = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Validation(format!("Invalid event payload: {}", e)))?;

    record_webhook_event(&event.event_type);

    if event.event_type == "account.updated" {
        let account: ConnectAccountSummary = serde_json::from_value::<AccountObject>(event.data.object)
            .map_err(|e| ApiError::Validation(format!("Invalid account object: {}", e)))?
            .into();

        let updated = connect_service(&state).apply_account_update(&account).await?;

        tracing::info!(
            event_id = %event.id,
            account_id = %account.id,
            mentors_updated = updated,
            "Applied account.updated event"
        );
    } else {
        tracing::debug!(event_id = %event.id, event_type = %event.event_type, "Ignoring Stripe event");
    }

    Ok(Json(json!({ "received": true })))
}
