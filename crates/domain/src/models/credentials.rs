//! Mentor credential models: specialties, activities, awards and essays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpecialtyResponse {
    pub id: Uuid,
    pub name: String,
}

/// An extracurricular activity the mentor lists on their profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityResponse {
    pub id: Uuid,
    pub title: String,
    pub organization: String,
    pub years: String,
    pub description: Option<String>,
}

/// An award or honour the mentor received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AwardResponse {
    pub id: Uuid,
    pub title: String,
    pub issuer: String,
    pub year: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Award fields shown on directory cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AwardPreview {
    pub title: String,
    pub issuer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl From<AwardResponse> for AwardPreview {
    fn from(a: AwardResponse) -> Self {
        Self {
            title: a.title,
            issuer: a.issuer,
            year: Some(a.year).filter(|y| !y.is_empty()),
        }
    }
}

/// A sample admissions essay the mentor wrote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EssayResponse {
    pub id: Uuid,
    pub title: String,
    pub prompt: String,
    pub text: String,
    pub university: String,
}
