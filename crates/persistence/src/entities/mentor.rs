//! Mentor entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::mentor::Mentor;
use domain::models::profile::ProfileSummary;

/// Database row mapping for the mentors table.
#[derive(Debug, Clone, FromRow)]
pub struct MentorEntity {
    pub id: Uuid,
    pub title: Option<String>,
    pub university: Option<String>,
    pub bio: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub languages: Vec<String>,
    pub profile_image_url: Option<String>,
    pub calendly_username: Option<String>,
    pub stripe_connect_account_id: Option<String>,
    pub stripe_account_details_submitted: bool,
    pub stripe_account_charges_enabled: bool,
    pub stripe_account_payouts_enabled: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<MentorEntity> for Mentor {
    fn from(entity: MentorEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            university: entity.university,
            bio: entity.bio,
            rating: entity.rating,
            review_count: entity.review_count,
            languages: entity.languages,
            profile_image_url: entity.profile_image_url,
            calendly_username: entity.calendly_username,
            stripe_connect_account_id: entity.stripe_connect_account_id,
            stripe_account_details_submitted: entity.stripe_account_details_submitted,
            stripe_account_charges_enabled: entity.stripe_account_charges_enabled,
            stripe_account_payouts_enabled: entity.stripe_account_payouts_enabled,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// A mentor row left-joined with its profile.
#[derive(Debug, Clone, FromRow)]
pub struct MentorWithProfileEntity {
    #[sqlx(flatten)]
    pub mentor: MentorEntity,
    pub profile_id: Option<Uuid>,
    pub profile_name: Option<String>,
    pub profile_email: Option<String>,
    pub profile_avatar: Option<String>,
}

impl MentorWithProfileEntity {
    /// Splits the row into the mentor and its profile, if one was joined.
    pub fn into_parts(self) -> (Mentor, Option<ProfileSummary>) {
        let profile = self.profile_id.map(|_| ProfileSummary {
            name: self.profile_name,
            email: self.profile_email,
            avatar: self.profile_avatar,
        });
        (self.mentor.into(), profile)
    }
}

/// The payments account columns of a mentor row.
#[derive(Debug, Clone, FromRow)]
pub struct MentorStripeEntity {
    pub id: Uuid,
    pub stripe_connect_account_id: Option<String>,
    pub stripe_account_details_submitted: bool,
    pub stripe_account_charges_enabled: bool,
    pub stripe_account_payouts_enabled: bool,
}
