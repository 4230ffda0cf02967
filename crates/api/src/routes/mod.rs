//! HTTP route handlers.

pub mod health;
pub mod mentors;
pub mod reviews;
pub mod services;
pub mod stripe_connect;
pub mod stripe_webhook;
pub mod testimonials;
