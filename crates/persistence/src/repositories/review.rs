//! Review repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::services::reviews::average_rating;

use crate::entities::ReviewEntity;
use crate::metrics::QueryTimer;

/// Input for a new review row.
#[derive(Debug, Clone)]
pub struct NewReviewRow<'a> {
    pub mentor_id: Uuid,
    pub client_id: Option<Uuid>,
    pub name: &'a str,
    pub rating: i32,
    pub service: &'a str,
    pub text: &'a str,
}

/// Repository for review-related database operations.
#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Creates a new ReviewRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a review and refresh the mentor's rating and review count.
    ///
    /// Both writes happen in one transaction. A `client_id` without a
    /// profile row is stored as NULL.
    pub async fn create(&self, row: &NewReviewRow<'_>) -> Result<ReviewEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_review");
        let mut tx = self.pool.begin().await?;

        // Lock the mentor row before the insert takes its foreign-key share lock,
        // so concurrent reviews queue here instead of deadlocking.
        sqlx::query("SELECT id FROM mentors WHERE id = $1 FOR NO KEY UPDATE")
            .bind(row.mentor_id)
            .execute(&mut *tx)
            .await?;

        let review = sqlx::query_as::<_, ReviewEntity>(
            r#"
            INSERT INTO reviews (mentor_id, client_id, name, rating, service, text)
            VALUES ($1, (SELECT id FROM profiles WHERE id = $2), $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(row.mentor_id)
        .bind(row.client_id)
        .bind(row.name)
        .bind(row.rating)
        .bind(row.service)
        .bind(row.text)
        .fetch_one(&mut *tx)
        .await?;

        let (sum, count): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(rating), 0)::BIGINT, COUNT(*)
            FROM reviews
            WHERE mentor_id = $1
            "#,
        )
        .bind(row.mentor_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE mentors SET
                rating = $2,
                review_count = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(row.mentor_id)
        .bind(average_rating(sum, count))
        .bind(count as i32)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(review)
    }

    /// List a mentor's reviews, newest first.
    pub async fn list_by_mentor(
        &self,
        mentor_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReviewEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_reviews_by_mentor");
        let result = sqlx::query_as::<_, ReviewEntity>(
            r#"
            SELECT * FROM reviews
            WHERE mentor_id = $1
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(mentor_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count a mentor's reviews.
    pub async fn count_by_mentor(&self, mentor_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_reviews_by_mentor");
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews WHERE mentor_id = $1")
            .bind(mentor_id)
            .fetch_one(&self.pool)
            .await?;
        timer.record();
        Ok(count.0)
    }
}
