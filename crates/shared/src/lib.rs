//! Shared utilities and common types for the mentor marketplace backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Session token validation (JWT)
//! - Webhook signature helpers
//! - Common validation logic
//! - Money conversions

pub mod crypto;
pub mod jwt;
pub mod money;
pub mod validation;
