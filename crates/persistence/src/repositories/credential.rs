//! Repository for the profile sections a mentor fills in: specialties,
//! activities, awards, essays and weekly availability.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ActivityEntity, AvailabilityEntity, AwardEntity, EssayEntity, SpecialtyEntity};
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct CredentialRepository {
    pool: PgPool,
}

impl CredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_specialties(&self, mentor_id: Uuid) -> Result<Vec<SpecialtyEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_specialties_by_mentor");
        let result = sqlx::query_as::<_, SpecialtyEntity>(
            "SELECT * FROM specialties WHERE mentor_id = $1 ORDER BY created_at ASC, id",
        )
        .bind(mentor_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn list_activities(&self, mentor_id: Uuid) -> Result<Vec<ActivityEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_activities_by_mentor");
        let result = sqlx::query_as::<_, ActivityEntity>(
            "SELECT * FROM activities WHERE mentor_id = $1 ORDER BY created_at ASC, id",
        )
        .bind(mentor_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn list_awards(&self, mentor_id: Uuid) -> Result<Vec<AwardEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_awards_by_mentor");
        let result = sqlx::query_as::<_, AwardEntity>(
            "SELECT * FROM awards WHERE mentor_id = $1 ORDER BY created_at ASC, id",
        )
        .bind(mentor_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Awards for a batch of mentors, oldest first within each mentor.
    pub async fn list_awards_for_mentors(&self, mentor_ids: &[Uuid]) -> Result<Vec<AwardEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_awards_for_mentors");
        let result = sqlx::query_as::<_, AwardEntity>(
            "SELECT * FROM awards WHERE mentor_id = ANY($1) ORDER BY created_at ASC, id",
        )
        .bind(mentor_ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn list_essays(&self, mentor_id: Uuid) -> Result<Vec<EssayEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_essays_by_mentor");
        let result = sqlx::query_as::<_, EssayEntity>(
            "SELECT * FROM essays WHERE mentor_id = $1 ORDER BY created_at ASC, id",
        )
        .bind(mentor_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Availability rows in insertion order; callers sort by weekday.
    pub async fn list_availability(&self, mentor_id: Uuid) -> Result<Vec<AvailabilityEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_availability_by_mentor");
        let result = sqlx::query_as::<_, AvailabilityEntity>(
            "SELECT * FROM availability WHERE mentor_id = $1 ORDER BY created_at ASC, id",
        )
        .bind(mentor_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
