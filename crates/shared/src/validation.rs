//! Common validation utilities.

use validator::ValidationError;

/// Highest price a mentor may charge for one service, in dollars.
pub const MAX_SERVICE_PRICE: f64 = 100_000.0;

lazy_static::lazy_static! {
    static ref STRIPE_ACCOUNT_ID_REGEX: regex::Regex =
        regex::Regex::new(r"^acct_[A-Za-z0-9]{6,}$").unwrap();
}

/// Validates that a string contains something other than whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that a review rating is a whole star count from 1 to 5.
pub fn validate_rating(rating: i32) -> Result<(), ValidationError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        let mut err = ValidationError::new("rating_range");
        err.message = Some("Rating must be between 1 and 5".into());
        Err(err)
    }
}

/// Validates that a service price is positive, finite and within the cap.
pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() && price > 0.0 && price <= MAX_SERVICE_PRICE {
        Ok(())
    } else {
        let mut err = ValidationError::new("price_range");
        err.message = Some("Price must be greater than 0 and at most 100000".into());
        Err(err)
    }
}

/// Validates the shape of a Stripe connected account id (`acct_...`).
pub fn validate_stripe_account_id(id: &str) -> Result<(), ValidationError> {
    if STRIPE_ACCOUNT_ID_REGEX.is_match(id) {
        Ok(())
    } else {
        let mut err = ValidationError::new("stripe_account_id");
        err.message = Some("Invalid Stripe account ID".into());
        Err(err)
    }
}
