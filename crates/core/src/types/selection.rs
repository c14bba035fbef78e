//! Operator-curated selection entries.

use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;
use super::id::CountryId;

/// One entry of the curated country/currency list.
///
/// The list is owned by merchant configuration (edited through the admin
/// panel) and is read-only to the conversion workflow. Serialized with
/// camelCase field names to match the admin panel's persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCurrency {
    /// Catalog identifier of the country.
    pub id: CountryId,
    /// Country name as matched against the resolved visitor country.
    pub country_name: String,
    /// Currency prices should be displayed in for visitors from this country.
    pub currency: CurrencyCode,
}

impl SelectedCurrency {
    /// Create a new selection entry.
    #[must_use]
    pub const fn new(id: CountryId, country_name: String, currency: CurrencyCode) -> Self {
        Self {
            id,
            country_name,
            currency,
        }
    }
}
