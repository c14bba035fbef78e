//! The conversion workflow context object.
//!
//! One [`Engine`] holds everything a run needs - geolocation and gateway
//! clients, the pair-keyed rate cache, the curated selection list, and the
//! retained price snapshots - so there is no module-level mutable state.
//! The engine is cheaply cloneable and shares its internals behind an `Arc`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use localprice_core::{CurrencyCode, Money, RatePair, SelectedCurrency};
use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::cache::RateCache;
use crate::config::WidgetConfig;
use crate::error::{Result, WidgetError};
use crate::gateway::{GatewayClient, GatewayError};
use crate::geo::GeoClient;
use crate::lookup::find_currency;
use crate::page::Page;
use crate::rewrite::{RewriteStats, Snapshots, first_amount, rewrite_prices};
use crate::storage::{CURRENT_COUNTRY_KEY, KeyValueStore};

/// Result of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Prices were rewritten into the target currency.
    Converted {
        /// The target currency applied to the page.
        currency: CurrencyCode,
        /// The rate that was applied.
        rate: Decimal,
        /// Whether the rate is the neutral fallback after a gateway failure.
        fallback: bool,
        /// Rewrite counters.
        stats: RewriteStats,
    },
    /// The visitor's country is not in the curated list; page untouched.
    NoMatch {
        /// The resolved country name.
        country: String,
    },
    /// The page already displays the target currency; page untouched.
    SameCurrency {
        /// The shared base/target currency.
        currency: CurrencyCode,
    },
}

/// The currency-conversion engine.
///
/// Cheaply cloneable; clones share clients, cache, and price snapshots.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    config: WidgetConfig,
    store: Arc<dyn KeyValueStore>,
    geo: GeoClient,
    gateway: GatewayClient,
    cache: RateCache,
    selected: Vec<SelectedCurrency>,
    snapshots: Mutex<Snapshots>,
}

impl Engine {
    /// Create a new engine.
    ///
    /// `selected` is the operator-curated country/currency list; the engine
    /// never mutates it.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client fails to build.
    pub fn new(
        config: WidgetConfig,
        store: Arc<dyn KeyValueStore>,
        selected: Vec<SelectedCurrency>,
    ) -> Result<Self> {
        let geo = GeoClient::new(&config)?;
        let gateway = GatewayClient::new(&config, Arc::clone(&store))?;
        let cache = RateCache::new(Arc::clone(&store), config.rate_ttl);

        Ok(Self {
            inner: Arc::new(EngineInner {
                config,
                store,
                geo,
                gateway,
                cache,
                selected,
                snapshots: Mutex::new(HashMap::new()),
            }),
        })
    }

    /// Get a reference to the engine configuration.
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.inner.config
    }

    /// Get the curated selection list the engine matches against.
    #[must_use]
    pub fn selected(&self) -> &[SelectedCurrency] {
        &self.inner.selected
    }

    /// Perform one best-effort resolution and price rewrite.
    ///
    /// Resolves the visitor's country, looks up the target currency in the
    /// curated list, obtains a rate (cache first, gateway on a miss), and
    /// rewrites the page. Recoverable gateway failures degrade to the
    /// neutral rate `1` so the page is never left with wrong numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if country resolution fails or the gateway auth
    /// token is missing. Either way the page is left untouched.
    #[instrument(skip(self, page))]
    pub async fn run<P: Page>(&self, page: &mut P) -> Result<RunOutcome> {
        let country = self.inner.geo.resolve().await?;
        info!(country = %country.name, "resolved visitor country");

        if let Ok(json) = serde_json::to_string(&country) {
            self.inner.store.set(CURRENT_COUNTRY_KEY, &json);
        }

        let Some(entry) = find_currency(&country.name, &self.inner.selected) else {
            info!(country = %country.name, "country not in the curated list, leaving prices unchanged");
            return Ok(RunOutcome::NoMatch {
                country: country.name,
            });
        };
        let target = entry.currency.clone();

        let base = page
            .base_currency()
            .unwrap_or_else(|| self.inner.config.default_base_currency.clone());
        if base == target {
            debug!(currency = %target, "page already displays the target currency");
            return Ok(RunOutcome::SameCurrency { currency: target });
        }

        let pair = RatePair::new(base, target.clone());
        let (rate, fallback) = self.resolve_rate(&pair, page).await?;

        let stats = {
            let mut snapshots = self
                .inner
                .snapshots
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            rewrite_prices(page, &mut snapshots, rate, &target)
        };
        info!(
            currency = %target,
            rate = %rate,
            rewritten = stats.rewritten,
            skipped = stats.skipped,
            "prices rewritten"
        );

        Ok(RunOutcome::Converted {
            currency: target,
            rate,
            fallback,
            stats,
        })
    }

    /// Obtain the rate for `pair`: cache hit, else gateway fetch.
    ///
    /// A fetched rate is persisted into the cache. Gateway failures other
    /// than a missing auth token degrade to the neutral rate `1` - the
    /// rewrite step always receives a usable number.
    async fn resolve_rate<P: Page>(&self, pair: &RatePair, page: &P) -> Result<(Decimal, bool)> {
        if let Some(rate) = self.inner.cache.get(pair).await {
            debug!(pair = %pair, rate = %rate, "using cached exchange rate");
            return Ok((rate, false));
        }

        let amount = {
            let snapshots = self
                .inner
                .snapshots
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            first_amount(page, &snapshots).unwrap_or(Decimal::ONE)
        };
        let amount = Money::new(amount, pair.from.clone());

        match self.inner.gateway.fetch_rate(pair, &amount).await {
            Ok(rate) => {
                self.inner.cache.store(pair, rate).await;
                Ok((rate, false))
            }
            Err(GatewayError::MissingToken) => {
                Err(WidgetError::Gateway(GatewayError::MissingToken))
            }
            Err(err) => {
                warn!(pair = %pair, error = %err, "exchange rate unavailable, falling back to neutral rate");
                Ok((Decimal::ONE, true))
            }
        }
    }

    /// Consume rerun signals from a [`crate::RouteWatcher`], rerunning the
    /// workflow for each. Runs are serialized here, so two reruns can never
    /// race to write the same page.
    ///
    /// Returns the page once the signal channel closes.
    pub async fn watch<P: Page + Send>(self, mut page: P, mut rerun_rx: mpsc::Receiver<()>) -> P {
        while rerun_rx.recv().await.is_some() {
            match self.run(&mut page).await {
                Ok(outcome) => debug!(?outcome, "rerun complete"),
                Err(err) => warn!(error = %err, "conversion run failed, page left unchanged"),
            }
        }
        page
    }
}
