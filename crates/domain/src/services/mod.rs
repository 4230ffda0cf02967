//! Domain services for the mentor marketplace.
//!
//! Services contain business logic that operates on domain models.

pub mod directory;
pub mod payments;
pub mod reviews;

pub use payments::{
    AccountLinkParams, MockPaymentsProvider, NewConnectAccount, NewPrice, NewProduct,
    PaymentsError, PaymentsProvider,
};
