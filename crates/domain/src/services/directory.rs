//! Presentation rules for mentor cards and profile headers.
//!
//! The directory and profile pages never show empty fields; each display
//! value falls back to a fixed placeholder when the underlying column is
//! unset or blank.

use crate::models::credentials::AwardPreview;
use crate::models::mentor::{Mentor, MentorCard};
use crate::models::profile::ProfileSummary;
use crate::models::service::ServicePreview;

/// Image shown when neither a profile image nor an avatar is set.
pub const PLACEHOLDER_IMAGE_URL: &str = "/placeholder.svg?height=200&width=200";

pub const UNNAMED_MENTOR: &str = "Unnamed Mentor";
pub const DEFAULT_TITLE: &str = "Consultant";
pub const UNKNOWN_UNIVERSITY: &str = "University not specified";
pub const UNKNOWN_INITIAL: &str = "?";

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Picks the mentor image: profile image, then avatar, then placeholder.
pub fn resolve_image_url(profile_image_url: Option<&str>, avatar: Option<&str>) -> String {
    present(profile_image_url)
        .or_else(|| present(avatar))
        .unwrap_or(PLACEHOLDER_IMAGE_URL)
        .to_string()
}

pub fn display_name(name: Option<&str>) -> String {
    present(name).unwrap_or(UNNAMED_MENTOR).to_string()
}

pub fn display_title(title: Option<&str>) -> String {
    present(title).unwrap_or(DEFAULT_TITLE).to_string()
}

pub fn display_university(university: Option<&str>) -> String {
    present(university).unwrap_or(UNKNOWN_UNIVERSITY).to_string()
}

/// First character of the name, or `?`.
pub fn initial_of(name: Option<&str>) -> String {
    present(name)
        .and_then(|n| n.trim().chars().next())
        .map(String::from)
        .unwrap_or_else(|| UNKNOWN_INITIAL.to_string())
}

/// Lowest service price, or 0 when the mentor offers nothing.
pub fn services_from(services: &[ServicePreview]) -> f64 {
    services
        .iter()
        .map(|s| s.price)
        .filter(|p| p.is_finite())
        .fold(None, |min: Option<f64>, p| Some(min.map_or(p, |m| m.min(p))))
        .unwrap_or(0.0)
}

/// Assembles a directory card from a mentor and its related rows.
pub fn build_card(
    mentor: Mentor,
    profile: Option<ProfileSummary>,
    services: Vec<ServicePreview>,
    awards: Vec<AwardPreview>,
) -> MentorCard {
    let name = profile.as_ref().and_then(|p| p.name.as_deref());
    let avatar = profile.as_ref().and_then(|p| p.avatar.as_deref());

    MentorCard {
        id: mentor.id,
        display_name: display_name(name),
        display_title: display_title(mentor.title.as_deref()),
        display_university: display_university(mentor.university.as_deref()),
        initial: initial_of(name),
        image_url: resolve_image_url(mentor.profile_image_url.as_deref(), avatar),
        bio: mentor.bio,
        rating: mentor.rating.unwrap_or(0.0),
        review_count: mentor.review_count.unwrap_or(0),
        featured_award: awards.first().map(|a| a.title.clone()),
        services_from: services_from(&services),
        profile,
        services,
        awards,
    }
}
