//! Localprice Widget - storefront currency-conversion engine.
//!
//! Detects a visitor's country through an IP-geolocation service, maps it to
//! the merchant's curated currency list, fetches an exchange rate from the
//! backend gateway (with a durable one-hour cache), and rewrites the prices
//! displayed on the host page.
//!
//! # Architecture
//!
//! The host page is never touched directly. Three seams keep the engine
//! host-agnostic and testable:
//!
//! - [`Page`] - price elements, currency labels, and the page's base
//!   display currency (host adapters read the `CURRENT_CURRENCY` cookie)
//! - [`KeyValueStore`] - durable client-side storage (the `x-auth-token`,
//!   `rate-exchange:*`, and `current-country` slots)
//! - [`RouteWatcher`] - an explicit route-change observer the host feeds
//!   navigation events into, replacing any global history patching
//!
//! [`Engine`] is the workflow context object: one `run` performs a single
//! best-effort resolution and rewrite; `watch` serializes reruns triggered by
//! navigation events. Every failure degrades to a safe default - a run never
//! panics the host, and prices are left unconverted rather than wrong.
//!
//! # Example
//!
//! ```rust,ignore
//! use localprice_widget::{Engine, MemoryStore, StaticPage, WidgetConfig};
//!
//! let config = WidgetConfig::from_env()?;
//! let store = std::sync::Arc::new(MemoryStore::new());
//! let engine = Engine::new(config, store, selected_currencies)?;
//!
//! let outcome = engine.run(&mut page).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod cache;
mod config;
mod engine;
mod error;
mod gateway;
mod geo;
mod lookup;
mod page;
mod rewrite;
mod storage;
mod watcher;

pub use cache::RateCache;
pub use config::{ConfigError, WidgetConfig};
pub use engine::{Engine, RunOutcome};
pub use error::{Result, WidgetError};
pub use gateway::{GatewayClient, GatewayError};
pub use geo::{GeoClient, GeoError};
pub use lookup::find_currency;
pub use page::{ElementId, Page, StaticPage};
pub use rewrite::{
    PriceSnapshot, RewriteStats, Snapshots, convert_amount, first_amount, parse_amount,
    rewrite_prices,
};
pub use storage::{
    AUTH_TOKEN_KEY, CURRENT_COUNTRY_KEY, JsonFileStore, KeyValueStore, MemoryStore,
    RATE_CACHE_KEY, StoreError,
};
pub use watcher::{RouteEvent, RouteWatcher};
