//! Payments provider client and the orchestration services built on it.

pub mod catalog;
pub mod connect;
pub mod stripe;

pub use catalog::{CatalogError, CatalogService};
pub use connect::{ConnectError, ConnectService};
pub use stripe::StripeClient;
