//! Payments provider abstraction.
//!
//! The API talks to the payments provider (Stripe) through
//! [`PaymentsProvider`] so that handlers can be exercised against
//! [`MockPaymentsProvider`] without network access.

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::stripe_account::ConnectAccountSummary;

/// Provider error code returned for an account that no longer exists or is
/// not connected to the platform.
pub const ACCOUNT_INVALID_CODE: &str = "account_invalid";

/// Errors returned by a payments provider.
#[derive(Debug, Error)]
pub enum PaymentsError {
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl PaymentsError {
    /// Whether the provider rejected the account id as unknown or revoked.
    pub fn is_account_invalid(&self) -> bool {
        matches!(self, PaymentsError::Api { code: Some(code), .. } if code == ACCOUNT_INVALID_CODE)
    }
}

/// Parameters for a new Express connected account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConnectAccount {
    pub email: String,
    pub country: String,
    pub business_name: String,
    /// Omitted from the request when `None`.
    pub business_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountLinkParams {
    pub account_id: String,
    pub refresh_url: String,
    pub return_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPrice {
    pub product_id: String,
    /// Amount in the smallest currency unit.
    pub unit_amount: i64,
    pub currency: String,
}

/// Operations the marketplace needs from the payments provider.
#[async_trait::async_trait]
pub trait PaymentsProvider: Send + Sync {
    async fn retrieve_account(&self, account_id: &str) -> Result<ConnectAccountSummary, PaymentsError>;

    /// Creates an Express account with card payments and transfers requested.
    async fn create_account(&self, params: &NewConnectAccount) -> Result<ConnectAccountSummary, PaymentsError>;

    /// Creates an onboarding link and returns its URL.
    async fn create_account_link(&self, params: &AccountLinkParams) -> Result<String, PaymentsError>;

    /// Returns the new product id.
    async fn create_product(&self, params: &NewProduct) -> Result<String, PaymentsError>;

    /// Returns the new price id.
    async fn create_price(&self, params: &NewPrice) -> Result<String, PaymentsError>;

    /// Marks a product inactive so it can no longer be purchased.
    async fn deactivate_product(&self, product_id: &str) -> Result<(), PaymentsError>;
}

#[derive(Debug, Default)]
struct MockState {
    accounts: HashMap<String, ConnectAccountSummary>,
    created_accounts: Vec<NewConnectAccount>,
    products: HashMap<String, bool>,
    prices: Vec<NewPrice>,
}

/// Ids are random so several mocks can share one database.
fn mock_id(prefix: &str) -> String {
    format!("{}_mock{}", prefix, uuid::Uuid::new_v4().simple())
}

/// In-memory payments provider for development and testing.
///
/// Unknown account ids produce an `account_invalid` error like the real
/// provider does.
#[derive(Debug, Default)]
pub struct MockPaymentsProvider {
    /// Whether every call fails with a provider error.
    pub simulate_failure: bool,
    state: Mutex<MockState>,
}

impl MockPaymentsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider whose calls all fail.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Registers an existing account.
    pub async fn insert_account(&self, account: ConnectAccountSummary) {
        let mut state = self.state.lock().await;
        state.accounts.insert(account.id.clone(), account);
    }

    /// Removes an account so later lookups report `account_invalid`.
    pub async fn revoke_account(&self, account_id: &str) {
        self.state.lock().await.accounts.remove(account_id);
    }

    /// Parameters of every account created so far.
    pub async fn created_accounts(&self) -> Vec<NewConnectAccount> {
        self.state.lock().await.created_accounts.clone()
    }

    /// Prices created so far.
    pub async fn created_prices(&self) -> Vec<NewPrice> {
        self.state.lock().await.prices.clone()
    }

    /// Active flag of a product, or `None` if it was never created.
    pub async fn product_active(&self, product_id: &str) -> Option<bool> {
        self.state.lock().await.products.get(product_id).copied()
    }

    fn check_failure(&self, operation: &str) -> Result<(), PaymentsError> {
        if self.simulate_failure {
            tracing::warn!(operation, "Mock payments provider simulating failure");
            return Err(PaymentsError::Api {
                status: 500,
                code: Some("api_error".to_string()),
                message: "Simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

fn account_invalid(account_id: &str) -> PaymentsError {
    PaymentsError::Api {
        status: 403,
        code: Some(ACCOUNT_INVALID_CODE.to_string()),
        message: format!("The provided key does not have access to account '{}'", account_id),
    }
}

#[async_trait::async_trait]
impl PaymentsProvider for MockPaymentsProvider {
    async fn retrieve_account(&self, account_id: &str) -> Result<ConnectAccountSummary, PaymentsError> {
        self.check_failure("retrieve_account")?;
        self.state
            .lock()
            .await
            .accounts
            .get(account_id)
            .cloned()
            .ok_or_else(|| account_invalid(account_id))
    }

    async fn create_account(&self, params: &NewConnectAccount) -> Result<ConnectAccountSummary, PaymentsError> {
        self.check_failure("create_account")?;
        let mut state = self.state.lock().await;
        let account = ConnectAccountSummary {
            id: mock_id("acct"),
            details_submitted: false,
            charges_enabled: false,
            payouts_enabled: false,
        };
        state.accounts.insert(account.id.clone(), account.clone());
        state.created_accounts.push(params.clone());
        tracing::info!(account_id = %account.id, "Mock: created connected account");
        Ok(account)
    }

    async fn create_account_link(&self, params: &AccountLinkParams) -> Result<String, PaymentsError> {
        self.check_failure("create_account_link")?;
        let state = self.state.lock().await;
        if !state.accounts.contains_key(&params.account_id) {
            return Err(account_invalid(&params.account_id));
        }
        Ok(format!(
            "https://connect.stripe.com/setup/e/{}/mock",
            params.account_id
        ))
    }

    async fn create_product(&self, params: &NewProduct) -> Result<String, PaymentsError> {
        self.check_failure("create_product")?;
        let mut state = self.state.lock().await;
        let id = mock_id("prod");
        state.products.insert(id.clone(), true);
        tracing::info!(product_id = %id, name = %params.name, "Mock: created product");
        Ok(id)
    }

    async fn create_price(&self, params: &NewPrice) -> Result<String, PaymentsError> {
        self.check_failure("create_price")?;
        let mut state = self.state.lock().await;
        if !state.products.contains_key(&params.product_id) {
            return Err(PaymentsError::Api {
                status: 400,
                code: Some("resource_missing".to_string()),
                message: format!("No such product: '{}'", params.product_id),
            });
        }
        let id = mock_id("price");
        state.prices.push(params.clone());
        Ok(id)
    }

    async fn deactivate_product(&self, product_id: &str) -> Result<(), PaymentsError> {
        self.check_failure("deactivate_product")?;
        let mut state = self.state.lock().await;
        match state.products.get_mut(product_id) {
            Some(active) => {
                *active = false;
                Ok(())
            }
            None => Err(PaymentsError::Api {
                status: 404,
                code: Some("resource_missing".to_string()),
                message: format!("No such product: '{}'", product_id),
            }),
        }
    }
}
