//! Service domain model.
//!
//! A service is a priced, bookable offering created by a mentor. When the
//! mentor has a connected payments account the service is mirrored as a
//! product and price in the payments provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Session length used when a mentor does not specify one, in minutes.
pub const DEFAULT_SERVICE_DURATION_MINUTES: i32 = 60;

/// Represents a mentor's service offering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Price in dollars.
    pub price: f64,
    /// Session length in minutes.
    pub duration: i32,
    pub stripe_product_id: Option<String>,
    pub stripe_price_id: Option<String>,
    pub calendly_event_type_uri: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

fn default_duration() -> i32 {
    DEFAULT_SERVICE_DURATION_MINUTES
}

/// Request payload for creating a service.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,

    #[validate(custom(function = "shared::validation::validate_price"))]
    pub price: f64,

    #[serde(default = "default_duration")]
    #[validate(range(min = 15, max = 480, message = "Duration must be between 15 and 480 minutes"))]
    pub duration: i32,

    #[validate(url(message = "Calendly event type must be a valid URL"))]
    pub calendly_event_type_uri: Option<String>,
}

/// Response payload for service operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_price_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendly_event_type_uri: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Service> for ServiceResponse {
    fn from(s: Service) -> Self {
        Self {
            id: s.id,
            mentor_id: s.mentor_id,
            name: s.name,
            description: s.description,
            price: s.price,
            duration: s.duration,
            stripe_product_id: s.stripe_product_id,
            stripe_price_id: s.stripe_price_id,
            calendly_event_type_uri: s.calendly_event_type_uri,
            created_at: s.created_at,
        }
    }
}

/// Response for listing a mentor's services.
#[derive(Debug, Clone, Serialize)]
pub struct ListServicesResponse {
    pub services: Vec<ServiceResponse>,
    pub total: usize,
}

/// Response for deleting a service.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteServiceResponse {
    pub deleted: Vec<ServiceResponse>,
    /// Whether the mirrored payments product was deactivated.
    pub product_deactivated: bool,
}

/// Name and price of a service, as shown on directory cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServicePreview {
    pub name: String,
    pub price: f64,
}
