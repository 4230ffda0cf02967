//! Testimonial entity, joined with its review.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::testimonial::Testimonial;

#[derive(Debug, Clone, FromRow)]
pub struct TestimonialEntity {
    pub id: Uuid,
    pub review_id: Uuid,
    pub mentor_id: Uuid,
    pub name: String,
    pub rating: i32,
    pub service: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<TestimonialEntity> for Testimonial {
    fn from(entity: TestimonialEntity) -> Self {
        Self {
            id: entity.id,
            review_id: entity.review_id,
            mentor_id: entity.mentor_id,
            name: entity.name,
            rating: entity.rating,
            service: entity.service,
            text: entity.text,
            created_at: entity.created_at,
        }
    }
}
