//! Host-page seam.
//!
//! The engine never touches a DOM directly. A host adapter implements
//! [`Page`] over whatever document it renders; [`StaticPage`] is the
//! in-memory implementation used by tests and the CLI's page snapshots.

use localprice_core::CurrencyCode;
use serde::{Deserialize, Serialize};

/// Handle identifying one price-bearing element within a page.
///
/// Handles are stable for the lifetime of a view; the engine keys its price
/// snapshots on them so repeated rewrites stay idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Create a handle from the host's element index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The host's element index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The host page as seen by the conversion engine.
///
/// Price elements expose numeric text content; currency labels expose a
/// currency code. Both tags are the integration surface with the host page
/// template and are treated as given.
pub trait Page {
    /// Handles of all price-bearing elements currently in the page.
    fn price_elements(&self) -> Vec<ElementId>;

    /// Current text content of a price element.
    fn price_text(&self, id: ElementId) -> Option<String>;

    /// Overwrite the text content of a price element.
    fn set_price_text(&mut self, id: ElementId, text: &str);

    /// Overwrite every currency-label element with the given code.
    fn set_currency_labels(&mut self, currency: &CurrencyCode);

    /// The currency the page's prices are currently denominated in.
    ///
    /// Browser adapters read this from the `CURRENT_CURRENCY` cookie;
    /// `None` means the engine falls back to its configured default.
    fn base_currency(&self) -> Option<CurrencyCode>;
}

/// An in-memory page: a flat list of price texts and currency labels.
///
/// Doubles as the CLI's page-snapshot file format (camelCase JSON).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticPage {
    #[serde(default)]
    prices: Vec<String>,
    #[serde(default)]
    currency_labels: Vec<String>,
    #[serde(default)]
    base_currency: Option<CurrencyCode>,
}

impl StaticPage {
    /// Create a page from its parts.
    #[must_use]
    pub const fn new(
        prices: Vec<String>,
        currency_labels: Vec<String>,
        base_currency: Option<CurrencyCode>,
    ) -> Self {
        Self {
            prices,
            currency_labels,
            base_currency,
        }
    }

    /// The current price texts, in element order.
    #[must_use]
    pub fn prices(&self) -> &[String] {
        &self.prices
    }

    /// The current currency-label texts, in element order.
    #[must_use]
    pub fn currency_labels(&self) -> &[String] {
        &self.currency_labels
    }
}

impl Page for StaticPage {
    fn price_elements(&self) -> Vec<ElementId> {
        (0..self.prices.len()).map(ElementId::new).collect()
    }

    fn price_text(&self, id: ElementId) -> Option<String> {
        self.prices.get(id.index()).cloned()
    }

    fn set_price_text(&mut self, id: ElementId, text: &str) {
        if let Some(slot) = self.prices.get_mut(id.index()) {
            text.clone_into(slot);
        }
    }

    fn set_currency_labels(&mut self, currency: &CurrencyCode) {
        for label in &mut self.currency_labels {
            currency.as_str().clone_into(label);
        }
    }

    fn base_currency(&self) -> Option<CurrencyCode> {
        self.base_currency.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_page_accessors() {
        let mut page = StaticPage::new(
            vec!["100".to_owned(), "24.99".to_owned()],
            vec!["USD".to_owned()],
            None,
        );

        assert_eq!(page.price_elements().len(), 2);
        assert_eq!(page.price_text(ElementId::new(1)), Some("24.99".to_owned()));
        assert_eq!(page.price_text(ElementId::new(9)), None);

        page.set_price_text(ElementId::new(0), "91.00");
        assert_eq!(page.prices(), ["91.00", "24.99"]);

        let eur = CurrencyCode::parse("EUR").expect("valid code");
        page.set_currency_labels(&eur);
        assert_eq!(page.currency_labels(), ["EUR"]);
    }

    #[test]
    fn test_static_page_snapshot_json_shape() {
        let json = r#"{"prices":["100"],"currencyLabels":["USD"],"baseCurrency":"USD"}"#;
        let page: StaticPage = serde_json::from_str(json).expect("deserialize");
        assert_eq!(page.prices(), ["100"]);
        assert_eq!(
            page.base_currency().map(|c| c.as_str().to_owned()),
            Some("USD".to_owned())
        );
    }
}
