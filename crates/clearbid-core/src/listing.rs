use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A resale listing as captured from its source platform.
///
/// Price fields are optional so that a listing scraped without a price still
/// reaches the economic gate, which reports it as missing data rather than
/// the loader rejecting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingInput {
    pub title: String,
    /// Full listing text, scanned by the identity, source, and shipping gates.
    pub description: String,
    pub ask_price: Option<f64>,
    /// ISO 4217 currency code (e.g., `"USD"`).
    pub currency: String,
    pub estimated_resale: Option<f64>,
    /// Buyer-side logistics estimate used by the economic gate.
    pub estimated_logistics: f64,
    /// Source platform name, e.g. `"Telegram"` or `"eBay"`.
    pub platform: String,
    pub seller_id: String,
    /// Seller's stated location; doubles as the shipping origin.
    pub location: String,
    pub category: String,
    pub image_url: Option<String>,
}

impl Default for ListingInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            ask_price: None,
            currency: "USD".to_string(),
            estimated_resale: None,
            estimated_logistics: 0.0,
            platform: "telegram".to_string(),
            seller_id: String::new(),
            location: String::new(),
            category: String::new(),
            image_url: None,
        }
    }
}

/// Load a listing from a YAML (or JSON) file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, or if it fails
/// validation.
pub fn load_listing(path: &Path) -> Result<ListingInput, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ListingFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_listing(&content)
}

/// Parse a listing from YAML or JSON text.
///
/// # Errors
///
/// Returns `ConfigError::ListingFileParse` for malformed documents and
/// `ConfigError::Validation` for structurally unusable listings.
pub fn parse_listing(content: &str) -> Result<ListingInput, ConfigError> {
    let listing: ListingInput = serde_yaml::from_str(content)?;
    validate_listing(&listing)?;
    Ok(listing)
}

// Only type-level problems are rejected here. Empty descriptions, missing
// prices and blank seller IDs are verdicts the gates report themselves.
fn validate_listing(listing: &ListingInput) -> Result<(), ConfigError> {
    if !listing.estimated_logistics.is_finite() {
        return Err(ConfigError::Validation(
            "estimated_logistics must be a finite number".to_string(),
        ));
    }
    if listing.currency.trim().len() != 3 {
        return Err(ConfigError::Validation(format!(
            "currency '{}' must be a three-letter ISO 4217 code",
            listing.currency
        )));
    }
    Ok(())
}
