//! Integration tests for Localprice.
//!
//! # Test Categories
//!
//! - `convert_flow` - End-to-end conversion runs against mock endpoints
//! - `watcher_flow` - Navigation-triggered reruns
//! - `selection_flow` - Admin curation feeding the widget engine
//!
//! This library holds the shared test support: a [`TestContext`] wiring the
//! engine to wiremock geolocation/gateway servers and a seeded in-memory
//! store.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use localprice_core::{CountryId, CurrencyCode, SelectedCurrency};
use localprice_widget::{
    AUTH_TOKEN_KEY, Engine, KeyValueStore, MemoryStore, StaticPage, WidgetConfig,
};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Auth token seeded into the test store.
pub const TEST_TOKEN: &str = "test-token-4f9a";

/// Mock geolocation and gateway endpoints plus a seeded store.
pub struct TestContext {
    pub geo: MockServer,
    pub gateway: MockServer,
    pub store: Arc<MemoryStore>,
}

impl TestContext {
    /// Start both mock servers and seed the store with an auth token.
    pub async fn new() -> Self {
        let ctx = Self::without_token().await;
        ctx.store.set(AUTH_TOKEN_KEY, TEST_TOKEN);
        ctx
    }

    /// Start both mock servers with an empty store (no auth token).
    pub async fn without_token() -> Self {
        Self {
            geo: MockServer::start().await,
            gateway: MockServer::start().await,
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Engine configuration pointing at the mock endpoints.
    ///
    /// Uses a short settle delay so watcher tests stay fast.
    pub fn config(&self) -> WidgetConfig {
        let gateway_url = Url::parse(&format!("{}/paypal/converts/exchange", self.gateway.uri()))
            .expect("valid gateway URL");
        let geo_url = Url::parse(&format!("{}/s", self.geo.uri())).expect("valid geo URL");

        WidgetConfig::new(gateway_url)
            .with_geo_url(geo_url)
            .with_settle_delay(Duration::from_millis(50))
    }

    /// Build an engine over the context's store and the given curated list.
    pub fn engine(&self, selected: Vec<SelectedCurrency>) -> Engine {
        Engine::new(self.config(), self.store.clone(), selected).expect("engine builds")
    }

    /// Mount a geolocation response (plain text, as the service answers).
    pub async fn mock_geo(&self, body: &str, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path("/s"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(expected_calls)
            .mount(&self.geo)
            .await;
    }

    /// Mount a successful gateway response for the given per-unit rate,
    /// requiring the seeded auth token header.
    pub async fn mock_rate(&self, rate: f64, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/paypal/converts/exchange"))
            .and(header("x-auth-token", TEST_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "result": rate,
            })))
            .expect(expected_calls)
            .mount(&self.gateway)
            .await;
    }

    /// Mount a gateway failure with the given HTTP status.
    pub async fn mock_rate_failure(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/paypal/converts/exchange"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.gateway)
            .await;
    }
}

/// A curated list containing only France -> EUR.
pub fn curated_france() -> Vec<SelectedCurrency> {
    vec![SelectedCurrency::new(
        CountryId::new(59),
        "France".to_owned(),
        CurrencyCode::parse("EUR").expect("valid code"),
    )]
}

/// A USD page with one `100` price and one currency label.
pub fn sample_page() -> StaticPage {
    StaticPage::new(
        vec!["100".to_owned()],
        vec!["USD".to_owned()],
        Some(CurrencyCode::parse("USD").expect("valid code")),
    )
}

/// Current time as epoch milliseconds.
pub fn now_ms() -> i64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch");
    i64::try_from(elapsed.as_millis()).expect("fits in i64")
}
