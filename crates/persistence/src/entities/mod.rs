//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod availability;
pub mod credentials;
pub mod mentor;
pub mod review;
pub mod service;
pub mod testimonial;

pub use availability::AvailabilityEntity;
pub use credentials::{ActivityEntity, AwardEntity, EssayEntity, SpecialtyEntity};
pub use mentor::{MentorEntity, MentorStripeEntity, MentorWithProfileEntity};
pub use review::ReviewEntity;
pub use service::{ServiceEntity, ServicePreviewEntity};
pub use testimonial::TestimonialEntity;
