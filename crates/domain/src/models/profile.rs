//! Profile domain model.

use serde::{Deserialize, Serialize};

/// The subset of a user profile shown next to a mentor.
///
/// Every mentor and client has a profile row whose id matches the auth
/// provider's user id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileSummary {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}
