//! Testimonial repository for database operations.

use sqlx::PgPool;

use crate::entities::TestimonialEntity;
use crate::metrics::QueryTimer;

/// Repository for featured testimonials.
#[derive(Clone)]
pub struct TestimonialRepository {
    pool: PgPool,
}

impl TestimonialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Featured testimonials with their review text, newest first.
    pub async fn list_featured(&self, limit: i64) -> Result<Vec<TestimonialEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_featured_testimonials");
        let result = sqlx::query_as::<_, TestimonialEntity>(
            r#"
            SELECT t.id, t.review_id, r.mentor_id, r.name, r.rating, r.service, r.text, t.created_at
            FROM testimonials t
            JOIN reviews r ON r.id = t.review_id
            WHERE t.featured = true
            ORDER BY t.created_at DESC, t.id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
