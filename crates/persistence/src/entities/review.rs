//! Review entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::review::Review;

/// Database row mapping for the reviews table.
#[derive(Debug, Clone, FromRow)]
pub struct ReviewEntity {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub client_id: Option<Uuid>,
    pub name: String,
    pub rating: i32,
    pub service: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewEntity> for Review {
    fn from(entity: ReviewEntity) -> Self {
        Self {
            id: entity.id,
            mentor_id: entity.mentor_id,
            client_id: entity.client_id,
            name: entity.name,
            rating: entity.rating,
            service: entity.service,
            text: entity.text,
            created_at: entity.created_at,
        }
    }
}
