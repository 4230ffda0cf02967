//! Review endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use persistence::repositories::{MentorRepository, NewReviewRow, ReviewRepository, ServiceRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::OptionalUserAuth;
use crate::middleware::metrics::record_review_submitted;
use domain::models::review::{
    CreateReviewRequest, ListReviewsQuery, ListReviewsResponse, Review, ReviewResponse,
};
use domain::services::reviews::{has_more, heading};

/// List a mentor's reviews, newest first.
///
/// GET /api/v1/mentors/:mentor_id/reviews?limit=&offset=
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(mentor_id): Path<Uuid>,
    Query(query): Query<ListReviewsQuery>,
) -> Result<Json<ListReviewsResponse>, ApiError> {
    let (limit, offset) = query.window();

    let review_repo = ReviewRepository::new(state.pool.clone());
    let total = review_repo.count_by_mentor(mentor_id).await?;
    let reviews: Vec<ReviewResponse> = review_repo
        .list_by_mentor(mentor_id, limit, offset)
        .await?
        .into_iter()
        .map(|r| Review::from(r).into())
        .collect();

    let service_options = ServiceRepository::new(state.pool.clone())
        .list_names_by_mentor(mentor_id)
        .await?;

    Ok(Json(ListReviewsResponse {
        heading: heading(total),
        has_more: has_more(offset, reviews.len(), total),
        reviews,
        total,
        service_options,
    }))
}

/// Submit a review for a mentor.
///
/// Signed-in callers are recorded as the review's client.
///
/// POST /api/v1/mentors/:mentor_id/reviews
pub async fn create_review(
    State(state): State<AppState>,
    Path(mentor_id): Path<Uuid>,
    caller: OptionalUserAuth,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    request.validate()?;

    let mentor_repo = MentorRepository::new(state.pool.clone());
    if !mentor_repo.exists(mentor_id).await? {
        return Err(ApiError::NotFound("Mentor not found".to_string()));
    }

    let service = request.service.trim();
    let offered = ServiceRepository::new(state.pool.clone())
        .list_names_by_mentor(mentor_id)
        .await?;
    if !offered.iter().any(|name| name == service) {
        return Err(ApiError::Validation(
            "Service must be one of the mentor's services".to_string(),
        ));
    }

    let row = NewReviewRow {
        mentor_id,
        client_id: caller.user_id(),
        name: request.name.trim(),
        rating: request.rating,
        service,
        text: request.text.trim(),
    };
    let review: Review = ReviewRepository::new(state.pool.clone())
        .create(&row)
        .await?
        .into();

    record_review_submitted(review.rating);
    info!(
        review_id = %review.id,
        mentor_id = %mentor_id,
        rating = review.rating,
        signed_in = row.client_id.is_some(),
        "Review submitted"
    );

    Ok((StatusCode::CREATED, Json(review.into())))
}
