//! Mentor directory and profile endpoint handlers.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use persistence::repositories::{CredentialRepository, DirectoryFilter, MentorRepository, ServiceRepository};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::availability::{sort_by_weekday, AvailabilityResponse};
use domain::models::credentials::AwardPreview;
use domain::models::mentor::{ListMentorsQuery, ListMentorsResponse, MentorDetails, MentorProfileResponse};
use domain::models::service::{ListServicesResponse, Service, ServicePreview, ServiceResponse};
use domain::services::directory::build_card;

/// List mentors for the directory.
///
/// GET /api/v1/mentors
pub async fn list_mentors(
    State(state): State<AppState>,
    Query(query): Query<ListMentorsQuery>,
) -> Result<Json<ListMentorsResponse>, ApiError> {
    query.validate()?;

    let filter = DirectoryFilter {
        search: query.search_text(),
        university: query.university_filter(),
        min_rating: query.min_rating,
        max_price: query.max_price,
        specialty: query.specialty_filter(),
    };

    let mentor_repo = MentorRepository::new(state.pool.clone());
    let rows = mentor_repo.list_directory(&filter).await?;
    if rows.is_empty() {
        return Ok(Json(ListMentorsResponse {
            mentors: vec![],
            total: 0,
        }));
    }

    let ids: Vec<Uuid> = rows.iter().map(|r| r.mentor.id).collect();

    let service_repo = ServiceRepository::new(state.pool.clone());
    let mut services: HashMap<Uuid, Vec<ServicePreview>> = HashMap::new();
    for preview in service_repo.list_previews_for_mentors(&ids).await? {
        services
            .entry(preview.mentor_id)
            .or_default()
            .push(preview.into());
    }

    let credential_repo = CredentialRepository::new(state.pool.clone());
    let mut awards: HashMap<Uuid, Vec<AwardPreview>> = HashMap::new();
    for award in credential_repo.list_awards_for_mentors(&ids).await? {
        let mentor_id = award.mentor_id;
        let award: domain::models::credentials::AwardResponse = award.into();
        awards.entry(mentor_id).or_default().push(award.into());
    }

    let mentors: Vec<_> = rows
        .into_iter()
        .map(|row| {
            let (mentor, profile) = row.into_parts();
            let mentor_services = services.remove(&mentor.id).unwrap_or_default();
            let mentor_awards = awards.remove(&mentor.id).unwrap_or_default();
            build_card(mentor, profile, mentor_services, mentor_awards)
        })
        .collect();

    let total = mentors.len();
    Ok(Json(ListMentorsResponse { mentors, total }))
}

/// Get a mentor's full profile.
///
/// GET /api/v1/mentors/:mentor_id
pub async fn get_mentor(
    State(state): State<AppState>,
    Path(mentor_id): Path<Uuid>,
) -> Result<Json<MentorProfileResponse>, ApiError> {
    let mentor_repo = MentorRepository::new(state.pool.clone());
    let (mentor, profile) = mentor_repo
        .find_by_id(mentor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Mentor not found".to_string()))?
        .into_parts();

    let credential_repo = CredentialRepository::new(state.pool.clone());
    let service_repo = ServiceRepository::new(state.pool.clone());

    let specialties = credential_repo.list_specialties(mentor_id).await?;
    let activities = credential_repo.list_activities(mentor_id).await?;
    let awards = credential_repo.list_awards(mentor_id).await?;
    let essays = credential_repo.list_essays(mentor_id).await?;
    let services = service_repo.list_by_mentor(mentor_id).await?;

    let mut availability: Vec<AvailabilityResponse> = credential_repo
        .list_availability(mentor_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    sort_by_weekday(&mut availability);

    let details = MentorDetails {
        mentor,
        profile,
        specialties: specialties.into_iter().map(Into::into).collect(),
        activities: activities.into_iter().map(Into::into).collect(),
        awards: awards.into_iter().map(Into::into).collect(),
        essays: essays.into_iter().map(Into::into).collect(),
        services: services
            .into_iter()
            .map(|s| Service::from(s).into())
            .collect(),
        availability,
    };

    Ok(Json(details.into()))
}

/// List a mentor's services, cheapest first.
///
/// GET /api/v1/mentors/:mentor_id/services
pub async fn list_mentor_services(
    State(state): State<AppState>,
    Path(mentor_id): Path<Uuid>,
) -> Result<Json<ListServicesResponse>, ApiError> {
    let service_repo = ServiceRepository::new(state.pool.clone());
    let services: Vec<ServiceResponse> = service_repo
        .list_by_mentor(mentor_id)
        .await?
        .into_iter()
        .map(|s| Service::from(s).into())
        .collect();

    let total = services.len();
    Ok(Json(ListServicesResponse { services, total }))
}
