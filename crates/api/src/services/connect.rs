//! Stripe Connect onboarding for mentors.
//!
//! A mentor's payments account is in one of three states: absent, stored on
//! the mentor row only, or live at the provider. This service moves a mentor
//! to the last state and keeps the cached onboarding flags in sync.

use std::sync::Arc;

use domain::models::stripe_account::{
    ConnectAccountSummary, CreateAccountLinkRequest, CreateConnectAccountRequest,
};
use domain::services::{AccountLinkParams, NewConnectAccount, PaymentsError, PaymentsProvider};
use persistence::entities::MentorStripeEntity;
use persistence::repositories::MentorRepository;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::metrics::{record_connect_account_created, record_payments_error};

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Email is required")]
    EmailRequired,

    #[error("Account ID is required")]
    AccountIdRequired,

    #[error("Refresh URL is required")]
    RefreshUrlRequired,

    #[error("Return URL is required")]
    ReturnUrlRequired,

    #[error("{0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    #[error("Stripe is not initialized - missing STRIPE_SECRET_KEY")]
    NotConfigured,

    #[error("Mentor not found")]
    MentorNotFound,

    #[error("Account does not belong to the current user")]
    AccountNotOwned,

    #[error("Failed to create mentor record: {0}")]
    MentorInsert(sqlx::Error),

    #[error("Failed to save Stripe account: {0}")]
    AccountPersist(sqlx::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stripe API error: {0}")]
    Stripe(#[from] PaymentsError),
}

impl From<ConnectError> for ApiError {
    fn from(err: ConnectError) -> Self {
        match err {
            ConnectError::EmailRequired
            | ConnectError::AccountIdRequired
            | ConnectError::RefreshUrlRequired
            | ConnectError::ReturnUrlRequired => ApiError::Validation(err.to_string()),
            ConnectError::InvalidRequest(errors) => errors.into(),
            ConnectError::NotConfigured => ApiError::ServiceUnavailable(err.to_string()),
            ConnectError::MentorNotFound => ApiError::NotFound(err.to_string()),
            ConnectError::AccountNotOwned => ApiError::Forbidden(err.to_string()),
            ConnectError::MentorInsert(_)
            | ConnectError::AccountPersist(_)
            | ConnectError::Database(_) => ApiError::InternalWithMessage(err.to_string()),
            ConnectError::Stripe(_) => ApiError::BadGateway(err.to_string()),
        }
    }
}

/// Result of [`ConnectService::create_account`].
#[derive(Debug, Clone)]
pub struct ConnectAccountOutcome {
    pub account: ConnectAccountSummary,
    /// True when a new account was created.
    pub created: bool,
}

pub struct ConnectService {
    mentors: MentorRepository,
    payments: Option<Arc<dyn PaymentsProvider>>,
    public_base_url: String,
    country: String,
}

impl ConnectService {
    pub fn new(
        mentors: MentorRepository,
        payments: Option<Arc<dyn PaymentsProvider>>,
        public_base_url: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            mentors,
            payments,
            public_base_url: public_base_url.into(),
            country: country.into(),
        }
    }

    fn provider(&self) -> Result<&dyn PaymentsProvider, ConnectError> {
        self.payments.as_deref().ok_or(ConnectError::NotConfigured)
    }

    /// Returns the mentor's live account, creating one when the mentor has
    /// none or the stored id is no longer valid at the provider.
    pub async fn create_account(
        &self,
        mentor_id: Uuid,
        request: &CreateConnectAccountRequest,
    ) -> Result<ConnectAccountOutcome, ConnectError> {
        let email = request.email.trim();
        if email.is_empty() {
            return Err(ConnectError::EmailRequired);
        }
        let provider = self.provider()?;

        let mentor = match self.mentors.find_stripe_account(mentor_id).await? {
            Some(mentor) => mentor,
            None => {
                tracing::info!(mentor_id = %mentor_id, "Creating mentor record for Stripe onboarding");
                self.mentors
                    .insert(mentor_id)
                    .await
                    .map_err(ConnectError::MentorInsert)?
            }
        };

        if let Some(account_id) = mentor.stripe_connect_account_id.as_deref() {
            match provider.retrieve_account(account_id).await {
                Ok(account) => {
                    return Ok(ConnectAccountOutcome {
                        account,
                        created: false,
                    })
                }
                Err(e) if e.is_account_invalid() => {
                    tracing::warn!(
                        mentor_id = %mentor_id,
                        account_id = %account_id,
                        "Stored Stripe account is invalid, creating a new one"
                    );
                }
                Err(e) => {
                    record_payments_error("retrieve_account");
                    return Err(e.into());
                }
            }
        }

        let base_url = self.public_base_url.trim();
        let params = NewConnectAccount {
            email: email.to_string(),
            country: self.country.clone(),
            business_name: request.business_name().to_string(),
            business_url: (!base_url.is_empty()).then(|| base_url.to_string()),
        };
        let account = provider.create_account(&params).await.map_err(|e| {
            record_payments_error("create_account");
            ConnectError::from(e)
        })?;

        self.mentors
            .set_stripe_account(
                mentor_id,
                &account.id,
                account.details_submitted,
                account.charges_enabled,
                account.payouts_enabled,
            )
            .await
            .map_err(ConnectError::AccountPersist)?;

        record_connect_account_created();
        tracing::info!(mentor_id = %mentor_id, account_id = %account.id, "Created Stripe Connect account");

        Ok(ConnectAccountOutcome {
            account,
            created: true,
        })
    }

    /// Creates an onboarding link for the caller's own account.
    pub async fn create_account_link(
        &self,
        mentor_id: Uuid,
        request: &CreateAccountLinkRequest,
    ) -> Result<String, ConnectError> {
        if request.account_id.trim().is_empty() {
            return Err(ConnectError::AccountIdRequired);
        }
        if request.refresh_url.trim().is_empty() {
            return Err(ConnectError::RefreshUrlRequired);
        }
        if request.return_url.trim().is_empty() {
            return Err(ConnectError::ReturnUrlRequired);
        }
        request.validate()?;
        let provider = self.provider()?;

        let owned = self
            .mentors
            .find_stripe_account(mentor_id)
            .await?
            .and_then(|m| m.stripe_connect_account_id)
            .is_some_and(|id| id == request.account_id);
        if !owned {
            return Err(ConnectError::AccountNotOwned);
        }

        let params = AccountLinkParams {
            account_id: request.account_id.clone(),
            refresh_url: request.refresh_url.clone(),
            return_url: request.return_url.clone(),
        };
        provider.create_account_link(&params).await.map_err(|e| {
            record_payments_error("create_account_link");
            ConnectError::from(e)
        })
    }

    /// Fetches the mentor's live account and refreshes the cached flags.
    /// Returns `None` when the mentor has no account yet.
    pub async fn get_account(&self, mentor_id: Uuid) -> Result<Option<ConnectAccountSummary>, ConnectError> {
        let mentor: MentorStripeEntity = self
            .mentors
            .find_stripe_account(mentor_id)
            .await?
            .ok_or(ConnectError::MentorNotFound)?;

        let account_id = match mentor.stripe_connect_account_id.as_deref() {
            Some(id) => id,
            None => return Ok(None),
        };

        let account = self.provider()?.retrieve_account(account_id).await.map_err(|e| {
            record_payments_error("retrieve_account");
            ConnectError::from(e)
        })?;

        if account.flags_differ(
            mentor.stripe_account_details_submitted,
            mentor.stripe_account_charges_enabled,
            mentor.stripe_account_payouts_enabled,
        ) {
            if let Err(e) = self
                .mentors
                .update_stripe_flags(
                    mentor_id,
                    account.details_submitted,
                    account.charges_enabled,
                    account.payouts_enabled,
                )
                .await
            {
                tracing::warn!(mentor_id = %mentor_id, error = %e, "Failed to sync Stripe account flags");
            }
        }

        Ok(Some(account))
    }

    /// Applies flags pushed by an `account.updated` webhook event.
    /// Returns the number of mentor rows updated.
    pub async fn apply_account_update(&self, account: &ConnectAccountSummary) -> Result<u64, ConnectError> {
        let updated = self
            .mentors
            .update_stripe_flags_by_account_id(
                &account.id,
                account.details_submitted,
                account.charges_enabled,
                account.payouts_enabled,
            )
            .await?;
        Ok(updated)
    }
}
