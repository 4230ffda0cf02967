//! Mentor domain model and directory/profile payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::availability::AvailabilityResponse;
use super::credentials::{ActivityResponse, AwardPreview, AwardResponse, EssayResponse, SpecialtyResponse};
use super::profile::ProfileSummary;
use super::service::{ServicePreview, ServiceResponse};
use crate::services::directory;

/// Represents a mentor (college consultant) in the system.
///
/// The id is shared with the mentor's profile row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mentor {
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

/// Query parameters for the mentor directory.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListMentorsQuery {
    /// Free-text search over name, title and university.
    #[validate(length(max = 100, message = "Search text must be at most 100 characters"))]
    pub q: Option<String>,
    pub university: Option<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "min_rating must be between 0 and 5"))]
    pub min_rating: Option<f64>,
    #[validate(range(min = 0.0, message = "max_price must be non-negative"))]
    pub max_price: Option<f64>,
    pub specialty: Option<String>,
}

impl ListMentorsQuery {
    /// Returns the search text trimmed, or `None` when blank.
    pub fn search_text(&self) -> Option<&str> {
        non_blank(self.q.as_deref())
    }

    pub fn university_filter(&self) -> Option<&str> {
        non_blank(self.university.as_deref())
    }

    pub fn specialty_filter(&self) -> Option<&str> {
        non_blank(self.specialty.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// A mentor card in the directory listing.
#[derive(Debug, Clone, Serialize)]
pub struct MentorCard {
    pub id: Uuid,
    pub display_name: String,
    pub display_title: String,
    pub display_university: String,
    pub initial: String,
    pub image_url: String,
    pub bio: Option<String>,
    pub rating: f64,
    pub review_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_award: Option<String>,
    pub services_from: f64,
    pub profile: Option<ProfileSummary>,
    pub services: Vec<ServicePreview>,
    pub awards: Vec<AwardPreview>,
}

/// Response for the mentor directory.
#[derive(Debug, Clone, Serialize)]
pub struct ListMentorsResponse {
    pub mentors: Vec<MentorCard>,
    pub total: usize,
}

/// Everything rendered on a mentor's profile page.
#[derive(Debug, Clone, Serialize)]
pub struct MentorProfileResponse {
    pub id: Uuid,
    pub display_name: String,
    pub display_title: String,
    pub display_university: String,
    pub image_url: String,
    pub title: Option<String>,
    pub university: Option<String>,
    pub bio: Option<String>,
    pub rating: f64,
    pub review_count: i32,
    pub languages: Vec<String>,
    pub calendly_username: Option<String>,
    /// Whether the mentor can currently take card payments.
    pub accepting_payments: bool,
    pub profile: Option<ProfileSummary>,
    pub specialties: Vec<SpecialtyResponse>,
    pub activities: Vec<ActivityResponse>,
    pub awards: Vec<AwardResponse>,
    pub essays: Vec<EssayResponse>,
    pub services: Vec<ServiceResponse>,
    pub availability: Vec<AvailabilityResponse>,
    pub created_at: Option<DateTime<Utc>>,
}

/// The pieces loaded to assemble a profile page.
#[derive(Debug, Clone)]
pub struct MentorDetails {
    pub mentor: Mentor,
    pub profile: Option<ProfileSummary>,
    pub specialties: Vec<SpecialtyResponse>,
    pub activities: Vec<ActivityResponse>,
    pub awards: Vec<AwardResponse>,
    pub essays: Vec<EssayResponse>,
    pub services: Vec<ServiceResponse>,
    pub availability: Vec<AvailabilityResponse>,
}

impl From<MentorDetails> for MentorProfileResponse {
    fn from(d: MentorDetails) -> Self {
        let m = d.mentor;
        let name = d.profile.as_ref().and_then(|p| p.name.as_deref());
        Self {
            id: m.id,
            display_name: directory::display_name(name),
            display_title: directory::display_title(m.title.as_deref()),
            display_university: directory::display_university(m.university.as_deref()),
            image_url: directory::resolve_image_url(
                m.profile_image_url.as_deref(),
                d.profile.as_ref().and_then(|p| p.avatar.as_deref()),
            ),
            title: m.title,
            university: m.university,
            bio: m.bio,
            rating: m.rating.unwrap_or(0.0),
            review_count: m.review_count.unwrap_or(0),
            languages: m.languages,
            calendly_username: m.calendly_username,
            accepting_payments: m.stripe_connect_account_id.is_some()
                && m.stripe_account_charges_enabled,
            profile: d.profile,
            specialties: d.specialties,
            activities: d.activities,
            awards: d.awards,
            essays: d.essays,
            services: d.services,
            availability: d.availability,
            created_at: m.created_at,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_mentor() -> Mentor {
    Mentor {
        id: Uuid::new_v4(),
        title: Some("Former Admissions Officer".into()),
        university: Some("Stanford University".into()),
        bio: Some("Ten years reading applications.".into()),
        rating: Some(4.8),
        review_count: Some(12),
        languages: vec!["English".into(), "Spanish".into()],
        profile_image_url: None,
        calendly_username: None,
        stripe_connect_account_id: None,
        stripe_account_details_submitted: false,
        stripe_account_charges_enabled: false,
        stripe_account_payouts_enabled: false,
        created_at: Some(Utc::now()),
        updated_at: Utc::now(),
    }
}
