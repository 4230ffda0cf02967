//! Stripe HTTP client.
//!
//! Implements [`PaymentsProvider`] against the Stripe REST API. Requests are
//! form-encoded with bracketed keys for nested parameters, authenticated
//! with the secret key as a bearer token.

use std::time::Duration;

use domain::models::stripe_account::ConnectAccountSummary;
use domain::services::{
    AccountLinkParams, NewConnectAccount, NewPrice, NewProduct, PaymentsError, PaymentsProvider,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::StripeConfig;

/// Stripe account object, reduced to the onboarding flags.
#[derive(Debug, Deserialize)]
pub(crate) struct AccountObject {
    id: String,
    #[serde(default)]
    details_submitted: bool,
    #[serde(default)]
    charges_enabled: bool,
    #[serde(default)]
    payouts_enabled: bool,
}

impl From<AccountObject> for ConnectAccountSummary {
    fn from(a: AccountObject) -> Self {
        Self {
            id: a.id,
            details_submitted: a.details_submitted,
            charges_enabled: a.charges_enabled,
            payouts_enabled: a.payouts_enabled,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IdObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct AccountLinkObject {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorObject,
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Stripe API client.
pub struct StripeClient {
    client: Client,
    secret_key: String,
    base_url: String,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("base_url", &self.base_url)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

impl StripeClient {
    /// Create a client from configuration. Returns `Ok(None)` when no secret
    /// key is configured.
    pub fn from_config(config: &StripeConfig) -> Result<Option<Self>, PaymentsError> {
        if !config.is_configured() {
            return Ok(None);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| PaymentsError::Transport(e.to_string()))?;

        Ok(Some(Self {
            client,
            secret_key: config.secret_key.trim().to_string(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, PaymentsError> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| PaymentsError::Transport(e.to_string()))?;
        Self::parse(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<T, PaymentsError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.secret_key)
            .form(form)
            .send()
            .await
            .map_err(|e| PaymentsError::Transport(e.to_string()))?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, PaymentsError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentsError::Transport(e.to_string()))?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| PaymentsError::InvalidResponse(e.to_string()))
        } else {
            Err(parse_error(status.as_u16(), &body))
        }
    }
}

/// Maps a non-2xx Stripe body to [`PaymentsError::Api`].
fn parse_error(status: u16, body: &str) -> PaymentsError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let message = envelope
                .error
                .message
                .or(envelope.error.kind)
                .unwrap_or_else(|| format!("HTTP {}", status));
            PaymentsError::Api {
                status,
                code: envelope.error.code,
                message,
            }
        }
        Err(_) => PaymentsError::Api {
            status,
            code: None,
            message: format!("HTTP {}", status),
        },
    }
}

fn pair(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_string(), value.into())
}

fn account_form(params: &NewConnectAccount) -> Vec<(String, String)> {
    let mut form = vec![
        pair("type", "express"),
        pair("country", params.country.as_str()),
        pair("email", params.email.as_str()),
        pair("business_type", "individual"),
        pair("capabilities[card_payments][requested]", "true"),
        pair("capabilities[transfers][requested]", "true"),
        pair("business_profile[name]", params.business_name.as_str()),
    ];
    if let Some(url) = params.business_url.as_deref() {
        form.push(pair("business_profile[url]", url));
    }
    form
}

fn account_link_form(params: &AccountLinkParams) -> Vec<(String, String)> {
    vec![
        pair("account", params.account_id.as_str()),
        pair("refresh_url", params.refresh_url.as_str()),
        pair("return_url", params.return_url.as_str()),
        pair("type", "account_onboarding"),
    ]
}

fn product_form(params: &NewProduct) -> Vec<(String, String)> {
    let mut form = vec![pair("name", params.name.as_str())];
    if let Some(description) = params.description.as_deref() {
        form.push(pair("description", description));
    }
    form
}

fn price_form(params: &NewPrice) -> Vec<(String, String)> {
    vec![
        pair("product", params.product_id.as_str()),
        pair("unit_amount", params.unit_amount.to_string()),
        pair("currency", params.currency.as_str()),
    ]
}

#[async_trait::async_trait]
impl PaymentsProvider for StripeClient {
    async fn retrieve_account(&self, account_id: &str) -> Result<ConnectAccountSummary, PaymentsError> {
        let account: AccountObject = self.get(&format!("accounts/{}", account_id)).await?;
        Ok(account.into())
    }

    async fn create_account(&self, params: &NewConnectAccount) -> Result<ConnectAccountSummary, PaymentsError> {
        let account: AccountObject = self.post("accounts", &account_form(params)).await?;
        Ok(account.into())
    }

    async fn create_account_link(&self, params: &AccountLinkParams) -> Result<String, PaymentsError> {
        let link: AccountLinkObject = self.post("account_links", &account_link_form(params)).await?;
        Ok(link.url)
    }

    async fn create_product(&self, params: &NewProduct) -> Result<String, PaymentsError> {
        let product: IdObject = self.post("products", &product_form(params)).await?;
        Ok(product.id)
    }

    async fn create_price(&self, params: &NewPrice) -> Result<String, PaymentsError> {
        let price: IdObject = self.post("prices", &price_form(params)).await?;
        Ok(price.id)
    }

    async fn deactivate_product(&self, product_id: &str) -> Result<(), PaymentsError> {
        let _: IdObject = self
            .post(&format!("products/{}", product_id), &[pair("active", "false")])
            .await?;
        Ok(())
    }
}
