//! Testimonial endpoint handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use persistence::repositories::TestimonialRepository;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::testimonial::{ListTestimonialsResponse, Testimonial, TestimonialResponse};

const DEFAULT_TESTIMONIAL_LIMIT: i64 = 6;
const MAX_TESTIMONIAL_LIMIT: i64 = 24;

#[derive(Debug, Default, Deserialize)]
pub struct ListTestimonialsQuery {
    pub limit: Option<i64>,
}

impl ListTestimonialsQuery {
    fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_TESTIMONIAL_LIMIT)
            .clamp(1, MAX_TESTIMONIAL_LIMIT)
    }
}

/// List featured testimonials, newest first.
///
/// GET /api/v1/testimonials
pub async fn list_testimonials(
    State(state): State<AppState>,
    Query(query): Query<ListTestimonialsQuery>,
) -> Result<Json<ListTestimonialsResponse>, ApiError> {
    let repo = TestimonialRepository::new(state.pool.clone());
    let testimonials: Vec<TestimonialResponse> = repo
        .list_featured(query.limit())
        .await?
        .into_iter()
        .map(|t| Testimonial::from(t).into())
        .collect();

    let total = testimonials.len();
    Ok(Json(ListTestimonialsResponse {
        testimonials,
        total,
    }))
}
