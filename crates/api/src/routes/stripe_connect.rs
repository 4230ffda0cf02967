//! Stripe Connect onboarding endpoint handlers.
//!
//! The authenticated user is the mentor whose account is managed.

use axum::{extract::State, Json};
use persistence::repositories::MentorRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::services::connect::ConnectService;
use domain::models::stripe_account::{
    AccountLinkResponse, CreateAccountLinkRequest, CreateConnectAccountRequest,
    CreateConnectAccountResponse, GetConnectAccountResponse,
};

pub(crate) fn connect_service(state: &AppState) -> ConnectService {
    ConnectService::new(
        MentorRepository::new(state.pool.clone()),
        state.payments.clone(),
        state.config.server.public_base_url.clone(),
        state.config.stripe.default_country.clone(),
    )
}

/// Create the caller's connected account, or return the existing one.
///
/// POST /api/v1/stripe/connect/account
pub async fn create_account(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateConnectAccountRequest>,
) -> Result<Json<CreateConnectAccountResponse>, ApiError> {
    let outcome = connect_service(&state)
        .create_account(user.user_id, &request)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %user.user_id, error = %e, "Error creating Stripe Connect account");
            ApiError::from(e)
        })?;

    Ok(Json(CreateConnectAccountResponse {
        account: outcome.account,
        created: outcome.created,
    }))
}

/// Create an onboarding link for the caller's connected account.
///
/// POST /api/v1/stripe/connect/account-link
pub async fn create_account_link(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateAccountLinkRequest>,
) -> Result<Json<AccountLinkResponse>, ApiError> {
    let url = connect_service(&state)
        .create_account_link(user.user_id, &request)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %user.user_id, error = %e, "Error creating Stripe account link");
            ApiError::from(e)
        })?;

    Ok(Json(AccountLinkResponse { url }))
}

/// Get the caller's connected account and sync its onboarding flags.
///
/// GET /api/v1/stripe/connect/account
pub async fn get_account(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<GetConnectAccountResponse>, ApiError> {
    let account = connect_service(&state)
        .get_account(user.user_id)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %user.user_id, error = %e, "Error getting Stripe Connect account");
            ApiError::from(e)
        })?;

    Ok(Json(GetConnectAccountResponse { account }))
}
