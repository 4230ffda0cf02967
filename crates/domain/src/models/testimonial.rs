//! Testimonial model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::reviews;

/// A review promoted to the landing page, joined with its review fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: Uuid,
    pub review_id: Uuid,
    pub mentor_id: Uuid,
    pub name: String,
    pub rating: i32,
    pub service: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestimonialResponse {
    pub id: Uuid,
    pub review_id: Uuid,
    pub mentor_id: Uuid,
    pub name: String,
    pub initials: String,
    pub rating: i32,
    pub service: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Testimonial> for TestimonialResponse {
    fn from(t: Testimonial) -> Self {
        Self {
            id: t.id,
            review_id: t.review_id,
            mentor_id: t.mentor_id,
            initials: reviews::initials(&t.name),
            name: t.name,
            rating: t.rating,
            service: t.service,
            text: t.text,
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListTestimonialsResponse {
    pub testimonials: Vec<TestimonialResponse>,
    pub total: usize,
}
