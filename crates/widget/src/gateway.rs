//! Exchange-rate gateway client.
//!
//! Calls the backend gateway for the multiplicative rate converting one unit
//! of the page's base currency into the target currency. The gateway expects
//! a JSON body `{from, to, amount}` and the auth token in an `x-auth-token`
//! request header; the token comes from durable storage and a missing token
//! is a hard error, never a silent fallback.

use std::sync::Arc;

use localprice_core::{Money, RatePair};
use reqwest::header::{HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::WidgetConfig;
use crate::storage::{AUTH_TOKEN_KEY, KeyValueStore};

/// Header carrying the gateway auth token.
const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Errors that can occur when fetching an exchange rate.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No auth token in durable storage.
    #[error("authentication token is missing")]
    MissingToken,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        message: String,
    },

    /// Gateway answered but declined the conversion.
    #[error("conversion declined: {message}")]
    Declined {
        /// Gateway-supplied failure message.
        message: String,
    },

    /// Failed to parse the gateway response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Request body for the exchange endpoint.
#[derive(Debug, Serialize)]
struct ExchangeRequest<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

/// Response body of the exchange endpoint.
#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    success: bool,
    #[serde(default)]
    result: Option<Decimal>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the exchange-rate gateway.
#[derive(Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    endpoint: url::Url,
    store: Arc<dyn KeyValueStore>,
}

impl GatewayClient {
    /// Create a new gateway client reading its auth token from `store`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &WidgetConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "accept",
            HeaderValue::from_static("application/json, text/plain, */*"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.gateway_url.clone(),
            store,
        })
    }

    /// Fetch the rate converting one unit of `pair.from` into `pair.to`.
    ///
    /// `amount` (denominated in `pair.from`) is forwarded to the gateway as
    /// context but the returned value is always the per-unit rate.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingToken`] if no auth token is stored,
    /// and a network/API/parse error for any failed call. Callers decide the
    /// fallback policy; this client never substitutes a neutral rate itself.
    #[instrument(skip(self, amount), fields(pair = %pair, amount = %amount))]
    pub async fn fetch_rate(
        &self,
        pair: &RatePair,
        amount: &Money,
    ) -> Result<Decimal, GatewayError> {
        let token = self
            .store
            .get(AUTH_TOKEN_KEY)
            .map(SecretString::from)
            .ok_or(GatewayError::MissingToken)?;

        let body = ExchangeRequest {
            from: pair.from.as_str(),
            to: pair.to.as_str(),
            amount: amount.amount,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTH_TOKEN_HEADER, token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data: ExchangeResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))?;

        if !data.success {
            return Err(GatewayError::Declined {
                message: data
                    .message
                    .unwrap_or_else(|| "no failure message supplied".to_owned()),
            });
        }

        let rate = data
            .result
            .ok_or_else(|| GatewayError::Parse("successful response without result".to_owned()))?;
        debug!(rate = %rate, "exchange rate fetched");
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_request_body_wire_shape() {
        let body = ExchangeRequest {
            from: "USD",
            to: "EUR",
            amount: dec!(10),
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["from"], "USD");
        assert_eq!(json["to"], "EUR");
        assert!((json["amount"].as_f64().expect("number") - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_response_parses_success_shape() {
        let data: ExchangeResponse =
            serde_json::from_str(r#"{"success":true,"result":0.91}"#).expect("deserialize");
        assert!(data.success);
        assert_eq!(data.result, Some(dec!(0.91)));
        assert_eq!(data.message, None);
    }

    #[test]
    fn test_response_parses_failure_shape() {
        let data: ExchangeResponse =
            serde_json::from_str(r#"{"success":false,"message":"unsupported pair"}"#)
                .expect("deserialize");
        assert!(!data.success);
        assert_eq!(data.result, None);
        assert_eq!(data.message.as_deref(), Some("unsupported pair"));
    }
}
