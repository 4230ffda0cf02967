//! Mentor service catalog: creating and removing priced services.
//!
//! Every new service is mirrored as a Stripe product with one price so it
//! can be checked out later. Removing a service deactivates the product
//! on a best-effort basis.

use std::sync::Arc;

use domain::models::service::{CreateServiceRequest, DeleteServiceResponse, Service, ServiceResponse};
use domain::services::{NewPrice, NewProduct, PaymentsError, PaymentsProvider};
use persistence::repositories::{MentorRepository, NewServiceRow, ServiceRepository};
use shared::money::dollars_to_cents;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::metrics::{record_payments_error, record_service_created, record_service_deleted};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to fetch mentor profile")]
    MentorProfile,

    #[error("Mentor has not connected their Stripe account")]
    StripeNotConnected,

    #[error("Stripe is not initialized")]
    NotConfigured,

    #[error("Service not found")]
    ServiceNotFound,

    #[error("You can only delete your own services")]
    NotOwner,

    #[error("Stripe API error: {0}")]
    Stripe(#[from] PaymentsError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::MentorProfile | CatalogError::ServiceNotFound => {
                ApiError::NotFound(err.to_string())
            }
            CatalogError::StripeNotConnected => ApiError::Validation(err.to_string()),
            CatalogError::NotConfigured => ApiError::ServiceUnavailable(err.to_string()),
            CatalogError::NotOwner => ApiError::Forbidden(err.to_string()),
            CatalogError::Stripe(_) => ApiError::BadGateway(err.to_string()),
            CatalogError::Database(e) => e.into(),
        }
    }
}

pub struct CatalogService {
    mentors: MentorRepository,
    services: ServiceRepository,
    payments: Option<Arc<dyn PaymentsProvider>>,
    currency: String,
}

impl CatalogService {
    pub fn new(
        mentors: MentorRepository,
        services: ServiceRepository,
        payments: Option<Arc<dyn PaymentsProvider>>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            mentors,
            services,
            payments,
            currency: currency.into(),
        }
    }

    /// Creates the Stripe product and price, then stores the service.
    ///
    /// The request must already be validated.
    pub async fn add_service(
        &self,
        mentor_id: Uuid,
        request: &CreateServiceRequest,
    ) -> Result<Service, CatalogError> {
        let mentor = match self.mentors.find_stripe_account(mentor_id).await {
            Ok(Some(mentor)) => mentor,
            Ok(None) => return Err(CatalogError::MentorProfile),
            Err(e) => {
                tracing::error!(mentor_id = %mentor_id, error = %e, "Failed to fetch mentor profile");
                return Err(CatalogError::MentorProfile);
            }
        };

        if mentor.stripe_connect_account_id.is_none() {
            return Err(CatalogError::StripeNotConnected);
        }
        let provider = self.payments.as_deref().ok_or(CatalogError::NotConfigured)?;

        let name = request.name.trim();
        let description = Some(request.description.trim()).filter(|d| !d.is_empty());

        let product_id = provider
            .create_product(&NewProduct {
                name: name.to_string(),
                description: description.map(str::to_string),
            })
            .await
            .map_err(|e| {
                record_payments_error("create_product");
                CatalogError::from(e)
            })?;

        let price_id = provider
            .create_price(&NewPrice {
                product_id: product_id.clone(),
                unit_amount: dollars_to_cents(request.price),
                currency: self.currency.clone(),
            })
            .await
            .map_err(|e| {
                record_payments_error("create_price");
                CatalogError::from(e)
            })?;

        let row = NewServiceRow {
            mentor_id,
            name,
            description,
            price: request.price,
            duration: request.duration,
            stripe_product_id: Some(&product_id),
            stripe_price_id: Some(&price_id),
            calendly_event_type_uri: request.calendly_event_type_uri.as_deref(),
        };
        let service = self.services.create(&row).await?;

        record_service_created();
        tracing::info!(
            mentor_id = %mentor_id,
            service_id = %service.id,
            product_id = %product_id,
            "Created service"
        );

        Ok(service.into())
    }

    /// Deletes one of the caller's services.
    ///
    /// A product deactivation failure is logged and does not stop the delete.
    pub async fn delete_service(
        &self,
        mentor_id: Uuid,
        service_id: Uuid,
    ) -> Result<DeleteServiceResponse, CatalogError> {
        let service = self
            .services
            .find_by_id(service_id)
            .await?
            .ok_or(CatalogError::ServiceNotFound)?;

        if service.mentor_id != mentor_id {
            return Err(CatalogError::NotOwner);
        }

        let mut product_deactivated = false;
        if let Some(product_id) = service.stripe_product_id.as_deref() {
            match self.payments.as_deref() {
                Some(provider) => match provider.deactivate_product(product_id).await {
                    Ok(()) => product_deactivated = true,
                    Err(e) => {
                        record_payments_error("deactivate_product");
                        tracing::warn!(
                            service_id = %service_id,
                            product_id = %product_id,
                            error = %e,
                            "Failed to deactivate Stripe product, deleting service anyway"
                        );
                    }
                },
                None => tracing::warn!(
                    service_id = %service_id,
                    product_id = %product_id,
                    "Stripe is not initialized, skipping product deactivation"
                ),
            }
        }

        let deleted: Vec<ServiceResponse> = self
            .services
            .delete(service_id)
            .await?
            .into_iter()
            .map(|s| ServiceResponse::from(Service::from(s)))
            .collect();

        record_service_deleted(product_deactivated);
        tracing::info!(service_id = %service_id, "Deleted service");

        Ok(DeleteServiceResponse {
            deleted,
            product_deactivated,
        })
    }
}
