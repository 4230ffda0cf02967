//! Mentor repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{MentorStripeEntity, MentorWithProfileEntity};
use crate::metrics::QueryTimer;

const MENTOR_WITH_PROFILE_SELECT: &str = r#"
    SELECT m.*,
           p.id AS profile_id,
           p.name AS profile_name,
           p.email AS profile_email,
           p.avatar AS profile_avatar
    FROM mentors m
    LEFT JOIN profiles p ON p.id = m.id
"#;

/// Optional filters for the mentor directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryFilter<'a> {
    /// Case-insensitive substring over name, title and university.
    pub search: Option<&'a str>,
    /// Case-insensitive exact university.
    pub university: Option<&'a str>,
    pub min_rating: Option<f64>,
    /// Keeps mentors with at least one service at or below this price.
    pub max_price: Option<f64>,
    pub specialty: Option<&'a str>,
}

/// Escapes LIKE wildcards and wraps the text for a substring match.
pub(crate) fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Repository for mentor-related database operations.
#[derive(Clone)]
pub struct MentorRepository {
    pool: PgPool,
}

impl MentorRepository {
    /// Creates a new MentorRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List mentors for the directory, best rated first.
    pub async fn list_directory(
        &self,
        filter: &DirectoryFilter<'_>,
    ) -> Result<Vec<MentorWithProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_mentor_directory");
        let sql = format!(
            r#"
            {MENTOR_WITH_PROFILE_SELECT}
            WHERE ($1::TEXT IS NULL
                   OR p.name ILIKE $1
                   OR m.title ILIKE $1
                   OR m.university ILIKE $1)
              AND ($2::TEXT IS NULL OR LOWER(m.university) = LOWER($2))
              AND ($3::DOUBLE PRECISION IS NULL OR COALESCE(m.rating, 0) >= $3)
              AND ($4::DOUBLE PRECISION IS NULL OR EXISTS (
                    SELECT 1 FROM services s WHERE s.mentor_id = m.id AND s.price <= $4))
              AND ($5::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM specialties sp
                    WHERE sp.mentor_id = m.id AND LOWER(sp.name) = LOWER($5)))
            ORDER BY m.rating DESC NULLS LAST, m.id
            "#
        );
        let result = sqlx::query_as::<_, MentorWithProfileEntity>(&sql)
            .bind(filter.search.map(like_pattern))
            .bind(filter.university)
            .bind(filter.min_rating)
            .bind(filter.max_price)
            .bind(filter.specialty)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find a mentor and its profile by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MentorWithProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_mentor_by_id");
        let sql = format!("{MENTOR_WITH_PROFILE_SELECT} WHERE m.id = $1");
        let result = sqlx::query_as::<_, MentorWithProfileEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Check whether a mentor row exists.
    pub async fn exists(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("mentor_exists");
        let result: Result<(bool,), sqlx::Error> =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM mentors WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await;
        timer.record();
        result.map(|row| row.0)
    }

    /// Find the payments account columns of a mentor.
    pub async fn find_stripe_account(&self, id: Uuid) -> Result<Option<MentorStripeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_mentor_stripe_account");
        let result = sqlx::query_as::<_, MentorStripeEntity>(
            r#"
            SELECT id, stripe_connect_account_id, stripe_account_details_submitted,
                   stripe_account_charges_enabled, stripe_account_payouts_enabled
            FROM mentors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a bare mentor row for an existing profile.
    ///
    /// A concurrent insert of the same id returns the existing row.
    pub async fn insert(&self, id: Uuid) -> Result<MentorStripeEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_mentor");
        let result = sqlx::query_as::<_, MentorStripeEntity>(
            r#"
            INSERT INTO mentors (id)
            VALUES ($1)
            ON CONFLICT (id) DO UPDATE SET updated_at = mentors.updated_at
            RETURNING id, stripe_connect_account_id, stripe_account_details_submitted,
                      stripe_account_charges_enabled, stripe_account_payouts_enabled
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Store a newly created payments account and its onboarding flags.
    pub async fn set_stripe_account(
        &self,
        id: Uuid,
        account_id: &str,
        details_submitted: bool,
        charges_enabled: bool,
        payouts_enabled: bool,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("set_mentor_stripe_account");
        let result = sqlx::query(
            r#"
            UPDATE mentors SET
                stripe_connect_account_id = $2,
                stripe_account_details_submitted = $3,
                stripe_account_charges_enabled = $4,
                stripe_account_payouts_enabled = $5,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(account_id)
        .bind(details_submitted)
        .bind(charges_enabled)
        .bind(payouts_enabled)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Update the cached onboarding flags of a mentor.
    pub async fn update_stripe_flags(
        &self,
        id: Uuid,
        details_submitted: bool,
        charges_enabled: bool,
        payouts_enabled: bool,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_mentor_stripe_flags");
        let result = sqlx::query(
            r#"
            UPDATE mentors SET
                stripe_account_details_submitted = $2,
                stripe_account_charges_enabled = $3,
                stripe_account_payouts_enabled = $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(details_submitted)
        .bind(charges_enabled)
        .bind(payouts_enabled)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Update the cached onboarding flags of whichever mentor owns the account.
    /// Returns the number of rows updated (0 or 1).
    pub async fn update_stripe_flags_by_account_id(
        &self,
        account_id: &str,
        details_submitted: bool,
        charges_enabled: bool,
        payouts_enabled: bool,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_mentor_stripe_flags_by_account");
        let result = sqlx::query(
            r#"
            UPDATE mentors SET
                stripe_account_details_submitted = $2,
                stripe_account_charges_enabled = $3,
                stripe_account_payouts_enabled = $4,
                updated_at = NOW()
            WHERE stripe_connect_account_id = $1
            "#,
        )
        .bind(account_id)
        .bind(details_submitted)
        .bind(charges_enabled)
        .bind(payouts_enabled)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
