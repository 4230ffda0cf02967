//! Review domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::services::reviews;

/// Number of reviews shown before "show more".
pub const DEFAULT_REVIEW_PAGE_SIZE: i64 = 3;

/// Upper bound on a single reviews page.
pub const MAX_REVIEW_PAGE_SIZE: i64 = 50;

/// Represents a client's review of a mentor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub mentor_id: Uuid,
    /// The signed-in client who wrote the review, if any.
    pub client_id: Option<Uuid>,
    /// Reviewer display name as typed into the form.
    pub name: String,
    pub rating: i32,
    /// Name of the service the reviewer used.
    pub service: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

fn default_rating() -> i32 {
    5
}

/// Request payload for submitting a review.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: String,

    #[serde(default = "default_rating")]
    #[validate(custom(function = "shared::validation::validate_rating"))]
    pub rating: i32,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub service: String,

    #[validate(length(max = 5000, message = "Review must be at most 5000 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub text: String,
}

/// Response payload for a single review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub name: String,
    /// Avatar fallback built from the reviewer's name.
    pub initials: String,
    pub rating: i32,
    pub service: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            mentor_id: r.mentor_id,
            initials: reviews::initials(&r.name),
            name: r.name,
            rating: r.rating,
            service: r.service,
            text: r.text,
            created_at: r.created_at,
        }
    }
}

/// Query parameters for listing reviews.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListReviewsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListReviewsQuery {
    /// Returns the effective `(limit, offset)` after defaults and clamping.
    pub fn window(&self) -> (i64, i64) {
        let limit = self
            .limit
            .unwrap_or(DEFAULT_REVIEW_PAGE_SIZE)
            .clamp(1, MAX_REVIEW_PAGE_SIZE);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// Response for listing a mentor's reviews.
#[derive(Debug, Clone, Serialize)]
pub struct ListReviewsResponse {
    /// "1 Review" or "N Reviews".
    pub heading: String,
    pub reviews: Vec<ReviewResponse>,
    pub total: i64,
    pub has_more: bool,
    /// Service names offered by the mentor, for the review form.
    pub service_options: Vec<String>,
}
