//! Resolved visitor country.

use serde::{Deserialize, Serialize};

use super::id::CountryId;

/// A visitor's country as resolved by the IP-geolocation service.
///
/// Produced by parsing the service's delimited text response. Immutable once
/// created; a record lives for a single resolution call (plus the write-only
/// `current-country` storage slot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Numeric identifier from the geolocation response.
    pub id: CountryId,
    /// Short country code (second response field).
    pub code: String,
    /// Abbreviated name (third response field).
    pub nickname: String,
    /// Full country name, matched against the curated selection list.
    pub name: String,
}

impl Country {
    /// Create a new country record.
    #[must_use]
    pub const fn new(id: CountryId, code: String, nickname: String, name: String) -> Self {
        Self {
            id,
            code,
            nickname,
            name,
        }
    }
}
