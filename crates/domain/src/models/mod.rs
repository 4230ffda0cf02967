//! Domain models for the mentor marketplace.

pub mod availability;
pub mod credentials;
pub mod mentor;
pub mod profile;
pub mod review;
pub mod service;
pub mod stripe_account;
pub mod testimonial;

pub use availability::AvailabilityResponse;
pub use mentor::{Mentor, MentorCard, MentorDetails};
pub use profile::ProfileSummary;
pub use review::Review;
pub use service::Service;
pub use stripe_account::ConnectAccountSummary;
pub use testimonial::Testimonial;
