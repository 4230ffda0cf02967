//! Specialty, activity, award and essay entities.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::credentials::{
    ActivityResponse, AwardResponse, EssayResponse, SpecialtyResponse,
};

#[derive(Debug, Clone, FromRow)]
pub struct SpecialtyEntity {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<SpecialtyEntity> for SpecialtyResponse {
    fn from(entity: SpecialtyEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ActivityEntity {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub title: String,
    pub organization: String,
    pub years: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ActivityEntity> for ActivityResponse {
    fn from(entity: ActivityEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            organization: entity.organization,
            years: entity.years,
            description: entity.description,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AwardEntity {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub title: String,
    pub issuer: String,
    pub year: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AwardEntity> for AwardResponse {
    fn from(entity: AwardEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            issuer: entity.issuer,
            year: entity.year,
            description: entity.description,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct EssayEntity {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub title: String,
    pub prompt: String,
    pub text: String,
    pub university: String,
    pub created_at: DateTime<Utc>,
}

impl From<EssayEntity> for EssayResponse {
    fn from(entity: EssayEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            prompt: entity.prompt,
            text: entity.text,
            university: entity.university,
        }
    }
}
