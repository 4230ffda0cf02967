//! Service repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ServiceEntity, ServicePreviewEntity};
use crate::metrics::QueryTimer;

/// Input for a new service row.
#[derive(Debug, Clone)]
pub struct NewServiceRow<'a> {
    pub mentor_id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: f64,
    pub duration: i32,
    pub stripe_product_id: Option<&'a str>,
    pub stripe_price_id: Option<&'a str>,
    pub calendly_event_type_uri: Option<&'a str>,
}

/// Repository for service-related database operations.
#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    /// Creates a new ServiceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new service.
    pub async fn create(&self, row: &NewServiceRow<'_>) -> Result<ServiceEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_service");
        let result = sqlx::query_as::<_, ServiceEntity>(
            r#"
            INSERT INTO services (mentor_id, name, description, price, duration,
                                  stripe_product_id, stripe_price_id, calendly_event_type_uri)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(row.mentor_id)
        .bind(row.name)
        .bind(row.description)
        .bind(row.price)
        .bind(row.duration)
        .bind(row.stripe_product_id)
        .bind(row.stripe_price_id)
        .bind(row.calendly_event_type_uri)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a service by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_service_by_id");
        let result = sqlx::query_as::<_, ServiceEntity>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// List a mentor's services, cheapest first.
    pub async fn list_by_mentor(&self, mentor_id: Uuid) -> Result<Vec<ServiceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_services_by_mentor");
        let result = sqlx::query_as::<_, ServiceEntity>(
            r#"
            SELECT * FROM services
            WHERE mentor_id = $1
            ORDER BY price ASC, created_at ASC
            "#,
        )
        .bind(mentor_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Service names and prices for a batch of mentors.
    pub async fn list_previews_for_mentors(
        &self,
        mentor_ids: &[Uuid],
    ) -> Result<Vec<ServicePreviewEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_service_previews");
        let result = sqlx::query_as::<_, ServicePreviewEntity>(
            r#"
            SELECT mentor_id, name, price FROM services
            WHERE mentor_id = ANY($1)
            ORDER BY price ASC, created_at ASC
            "#,
        )
        .bind(mentor_ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Distinct service names offered by a mentor.
    pub async fn list_names_by_mentor(&self, mentor_id: Uuid) -> Result<Vec<String>, sqlx::Error> {
        let timer = QueryTimer::new("list_service_names_by_mentor");
        let result: Result<Vec<(String,)>, sqlx::Error> = sqlx::query_as(
            r#"
            SELECT name FROM services
            WHERE mentor_id = $1
            GROUP BY name
            ORDER BY MIN(price) ASC, name ASC
            "#,
        )
        .bind(mentor_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result.map(|rows| rows.into_iter().map(|(name,)| name).collect())
    }

    /// Delete a service, returning the deleted rows.
    pub async fn delete(&self, id: Uuid) -> Result<Vec<ServiceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("delete_service");
        let result = sqlx::query_as::<_, ServiceEntity>(
            r#"
            DELETE FROM services WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
