//! Payments (Stripe Connect) account payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Business name used when the mentor does not supply one.
pub const DEFAULT_BUSINESS_NAME: &str = "College Consultant";

/// Onboarding state of a connected payments account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectAccountSummary {
    pub id: String,
    pub details_submitted: bool,
    pub charges_enabled: bool,
    pub payouts_enabled: bool,
}

impl ConnectAccountSummary {
    /// Whether the onboarding flags differ from the cached copy.
    pub fn flags_differ(&self, details_submitted: bool, charges_enabled: bool, payouts_enabled: bool) -> bool {
        self.details_submitted != details_submitted
            || self.charges_enabled != charges_enabled
            || self.payouts_enabled != payouts_enabled
    }
}

/// Request payload for creating (or reusing) a connected account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConnectAccountRequest {
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
}

impl CreateConnectAccountRequest {
    /// Business profile name, falling back to [`DEFAULT_BUSINESS_NAME`].
    pub fn business_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_BUSINESS_NAME)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateConnectAccountResponse {
    pub account: ConnectAccountSummary,
    /// True when a new account was created by this call.
    pub created: bool,
}

/// Request payload for an onboarding link.
///
/// Presence is checked by the handler so each missing field gets its own
/// message; format checks run through `validate`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateAccountLinkRequest {
    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_stripe_account_id"))]
    pub account_id: String,

    #[serde(default)]
    #[validate(url(message = "Refresh URL must be a valid URL"))]
    pub refresh_url: String,

    #[serde(default)]
    #[validate(url(message = "Return URL must be a valid URL"))]
    pub return_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountLinkResponse {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetConnectAccountResponse {
    pub account: Option<ConnectAccountSummary>,
}
