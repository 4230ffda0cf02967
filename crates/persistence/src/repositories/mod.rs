//! Repository implementations for database operations.

pub mod credential;
pub mod mentor;
pub mod review;
pub mod service;
pub mod testimonial;

pub use credential::CredentialRepository;
pub use mentor::{DirectoryFilter, MentorRepository};
pub use review::{NewReviewRow, ReviewRepository};
pub use service::{NewServiceRow, ServiceRepository};
pub use testimonial::TestimonialRepository;
