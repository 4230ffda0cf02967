//! Domain layer for the mentor marketplace backend.
//!
//! This crate contains:
//! - Domain models (Mentor, Service, Review, ...) and their request/response payloads
//! - Presentation rules shared by the directory and review views
//! - The payments provider abstraction

pub mod models;
pub mod services;
