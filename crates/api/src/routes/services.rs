//! Service catalog endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{MentorRepository, ServiceRepository};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::services::catalog::CatalogService;
use domain::models::service::{CreateServiceRequest, DeleteServiceResponse, ServiceResponse};

fn catalog_service(state: &AppState) -> CatalogService {
    CatalogService::new(
        MentorRepository::new(state.pool.clone()),
        ServiceRepository::new(state.pool.clone()),
        state.payments.clone(),
        state.config.stripe.currency.clone(),
    )
}

/// Create a priced service for the caller.
///
/// POST /api/v1/services
pub async fn create_service(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), ApiError> {
    request.validate()?;

    let service = catalog_service(&state)
        .add_service(user.user_id, &request)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %user.user_id, error = %e, "Error adding service");
            ApiError::from(e)
        })?;

    Ok((StatusCode::CREATED, Json(service.into())))
}

/// Delete one of the caller's services.
///
/// DELETE /api/v1/services/:service_id
pub async fn delete_service(
    State(state): State<AppState>,
    user: AuthUser,
    Path(service_id): Path<Uuid>,
) -> Result<Json<DeleteServiceResponse>, ApiError> {
    let response = catalog_service(&state)
        .delete_service(user.user_id, service_id)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %user.user_id, service_id = %service_id, error = %e, "Error deleting service");
            ApiError::from(e)
        })?;

    Ok(Json(response))
}
