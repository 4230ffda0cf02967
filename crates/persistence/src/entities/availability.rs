//! Availability entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::availability::AvailabilityResponse;

#[derive(Debug, Clone, FromRow)]
pub struct AvailabilityEntity {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub day: String,
    pub slots: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AvailabilityEntity> for AvailabilityResponse {
    fn from(entity: AvailabilityEntity) -> Self {
        Self {
            id: entity.id,
            day: entity.day,
            slots: entity.slots,
        }
    }
}
