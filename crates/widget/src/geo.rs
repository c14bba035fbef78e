//! IP-geolocation client.
//!
//! Resolves the visitor's country from the configured geolocation endpoint.
//! The service speaks a delimited plain-text protocol: a successful lookup is
//! `1;<code>;<nickname>;<name>`, anything not starting with the digit `1`
//! signals a failed lookup.

use localprice_core::{Country, CountryId};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::WidgetConfig;

/// Number of `;`-delimited fields in a successful lookup response.
const RESPONSE_FIELDS: usize = 4;

/// Errors that can occur while resolving the visitor's country.
#[derive(Debug, Error)]
pub enum GeoError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service reported a failed lookup (response not `1`-prefixed).
    #[error("lookup failed: {body:?}")]
    LookupFailed {
        /// Leading fragment of the response body, for diagnostics.
        body: String,
    },

    /// The response does not have the expected four fields.
    #[error("malformed response: expected {RESPONSE_FIELDS} fields, got {got}")]
    MalformedResponse {
        /// Number of fields actually present.
        got: usize,
    },

    /// The leading id field is not numeric.
    #[error("invalid country id: {0}")]
    InvalidId(String),
}

/// Client for the IP-geolocation endpoint.
#[derive(Debug, Clone)]
pub struct GeoClient {
    client: reqwest::Client,
    endpoint: url::Url,
}

impl GeoClient {
    /// Create a new geolocation client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &WidgetConfig) -> Result<Self, GeoError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.geo_url.clone(),
        })
    }

    /// Resolve the visitor's country.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is unreachable, reports a failed
    /// lookup, or answers with an unexpected shape.
    #[instrument(skip(self))]
    pub async fn resolve(&self) -> Result<Country, GeoError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let country = parse_response(&body)?;
        debug!(country = %country.name, code = %country.code, "country resolved");
        Ok(country)
    }
}

/// Parse the delimited geolocation response.
fn parse_response(body: &str) -> Result<Country, GeoError> {
    let body = body.trim();
    if !body.starts_with('1') {
        return Err(GeoError::LookupFailed {
            body: body.chars().take(32).collect(),
        });
    }

    let fields: Vec<&str> = body.split(';').collect();
    match fields.as_slice() {
        [id, code, nickname, name] => {
            let id = id
                .parse::<i32>()
                .map_err(|_| GeoError::InvalidId((*id).to_owned()))?;
            Ok(Country::new(
                CountryId::new(id),
                (*code).to_owned(),
                (*nickname).to_owned(),
                (*name).to_owned(),
            ))
        }
        other => Err(GeoError::MalformedResponse { got: other.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_response() {
        let country = parse_response("1;33;FR;France").expect("valid response");
        assert_eq!(country.id.as_i32(), 1);
        assert_eq!(country.code, "33");
        assert_eq!(country.nickname, "FR");
        assert_eq!(country.name, "France");
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let country = parse_response("1;212;MA;Morocco\n").expect("valid response");
        assert_eq!(country.name, "Morocco");
    }

    #[test]
    fn test_parse_rejects_failed_lookup() {
        assert!(matches!(
            parse_response("0;;;"),
            Err(GeoError::LookupFailed { .. })
        ));
        assert!(matches!(
            parse_response("2;33;FR;France"),
            Err(GeoError::LookupFailed { .. })
        ));
        assert!(matches!(
            parse_response(""),
            Err(GeoError::LookupFailed { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        assert!(matches!(
            parse_response("1;33;FR"),
            Err(GeoError::MalformedResponse { got: 3 })
        ));
        assert!(matches!(
            parse_response("1;33;FR;France;extra"),
            Err(GeoError::MalformedResponse { got: 5 })
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric_id() {
        // First character is `1` but the id field as a whole is not a number.
        assert!(matches!(
            parse_response("1x;33;FR;France"),
            Err(GeoError::InvalidId(_))
        ));
    }
}
