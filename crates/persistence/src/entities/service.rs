//! Service entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::service::{Service, ServicePreview};

/// Database row mapping for the services table.
#[derive(Debug, Clone, FromRow)]
pub struct ServiceEntity {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration: i32,
    pub stripe_product_id: Option<String>,
    pub stripe_price_id: Option<String>,
    pub calendly_event_type_uri: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<ServiceEntity> for Service {
    fn from(entity: ServiceEntity) -> Self {
        Self {
            id: entity.id,
            mentor_id: entity.mentor_id,
            name: entity.name,
            description: entity.description,
            price: entity.price,
            duration: entity.duration,
            stripe_product_id: entity.stripe_product_id,
            stripe_price_id: entity.stripe_price_id,
            calendly_event_type_uri: entity.calendly_event_type_uri,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Service name and price keyed by mentor, for directory cards.
#[derive(Debug, Clone, FromRow)]
pub struct ServicePreviewEntity {
    pub mentor_id: Uuid,
    pub name: String,
    pub price: f64,
}

impl From<ServicePreviewEntity> for ServicePreview {
    fn from(entity: ServicePreviewEntity) -> Self {
        Self {
            name: entity.name,
            price: entity.price,
        }
    }
}
