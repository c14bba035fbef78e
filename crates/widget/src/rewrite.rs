//! Price rewriting.
//!
//! Applies a conversion rate to every price-bearing element and overwrites
//! the page's currency labels with the target code. The original numeric
//! value of each element is retained in a snapshot keyed by element handle,
//! so repeated runs (route changes in a single-page app) convert from the
//! true original instead of re-parsing already-rewritten text - rewriting is
//! idempotent by construction.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use localprice_core::CurrencyCode;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::page::{ElementId, Page};

/// Leading numeric token of a price text, e.g. `24.99` out of `24.99MAD`.
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("Invalid regex"));

/// Retained original value of one price element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSnapshot {
    /// The element's original numeric value, before any rewrite.
    pub original: Decimal,
    /// Exactly what the last rewrite wrote into the element.
    pub last_written: String,
}

/// Snapshot map keyed by element handle.
pub type Snapshots = HashMap<ElementId, PriceSnapshot>;

/// Counters for one rewrite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Elements whose text was rewritten.
    pub rewritten: usize,
    /// Elements skipped because their text is not numeric.
    pub skipped: usize,
}

/// Extract the numeric amount from a price element's text.
///
/// Returns `None` when no numeric token is present.
#[must_use]
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let token = AMOUNT_RE.find(text)?;
    Decimal::from_str(token.as_str()).ok()
}

/// Convert an original amount, rounding half-up at the cent boundary.
#[must_use]
pub fn convert_amount(original: Decimal, rate: Decimal) -> Decimal {
    (original * rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The original amount of the first parsable price element, if any.
///
/// Forwarded to the gateway as the conversion context amount.
#[must_use]
pub fn first_amount(page: &dyn Page, snapshots: &Snapshots) -> Option<Decimal> {
    page.price_elements().into_iter().find_map(|id| {
        let current = page.price_text(id)?;
        match snapshots.get(&id) {
            Some(snapshot) if snapshot.last_written == current => Some(snapshot.original),
            _ => parse_amount(&current),
        }
    })
}

/// Rewrite every price element with `rate` and stamp the currency labels.
///
/// An element whose current text matches what a prior run wrote is converted
/// from its snapshotted original; an element with new text (first visit, or
/// content replaced by the host) is parsed and re-snapshotted. Unparsable
/// elements are logged and skipped without aborting the pass.
pub fn rewrite_prices(
    page: &mut dyn Page,
    snapshots: &mut Snapshots,
    rate: Decimal,
    currency: &CurrencyCode,
) -> RewriteStats {
    let mut stats = RewriteStats::default();

    for id in page.price_elements() {
        let Some(current) = page.price_text(id) else {
            stats.skipped += 1;
            continue;
        };

        let original = match snapshots.get(&id) {
            Some(snapshot) if snapshot.last_written == current => snapshot.original,
            _ => match parse_amount(&current) {
                Some(value) => value,
                None => {
                    warn!(element = id.index(), text = %current, "price text is not numeric, skipping");
                    stats.skipped += 1;
                    continue;
                }
            },
        };

        let converted = convert_amount(original, rate);
        let text = format!("{converted:.2}");
        page.set_price_text(id, &text);
        snapshots.insert(
            id,
            PriceSnapshot {
                original,
                last_written: text,
            },
        );
        stats.rewritten += 1;
    }

    page.set_currency_labels(currency);
    stats
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::page::StaticPage;

    fn eur() -> CurrencyCode {
        CurrencyCode::parse("EUR").expect("valid code")
    }

    #[test]
    fn test_parse_amount_variants() {
        assert_eq!(parse_amount("100"), Some(dec!(100)));
        assert_eq!(parse_amount("24.99MAD"), Some(dec!(24.99)));
        assert_eq!(parse_amount("$ 19.99"), Some(dec!(19.99)));
        assert_eq!(parse_amount("Free"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_convert_amount_rounds_half_up_at_cents() {
        assert_eq!(convert_amount(dec!(19.999), dec!(1.0)), dec!(20.00));
        assert_eq!(convert_amount(dec!(10), dec!(0.85)), dec!(8.50));
        assert_eq!(convert_amount(dec!(2.005), dec!(1)), dec!(2.01));
    }

    #[test]
    fn test_rewrite_formats_two_decimals_and_stamps_labels() {
        let mut page = StaticPage::new(
            vec!["100".to_owned(), "10".to_owned()],
            vec!["USD".to_owned(), "USD".to_owned()],
            None,
        );
        let mut snapshots = Snapshots::new();

        let stats = rewrite_prices(&mut page, &mut snapshots, dec!(0.91), &eur());

        assert_eq!(stats, RewriteStats { rewritten: 2, skipped: 0 });
        assert_eq!(page.prices(), ["91.00", "9.10"]);
        assert_eq!(page.currency_labels(), ["EUR", "EUR"]);
    }

    #[test]
    fn test_rewrite_is_idempotent_across_runs() {
        let mut page = StaticPage::new(vec!["100".to_owned()], vec![], None);
        let mut snapshots = Snapshots::new();

        rewrite_prices(&mut page, &mut snapshots, dec!(0.91), &eur());
        assert_eq!(page.prices(), ["91.00"]);

        // A second run converts from the retained original, not from "91.00".
        rewrite_prices(&mut page, &mut snapshots, dec!(0.91), &eur());
        assert_eq!(page.prices(), ["91.00"]);
    }

    #[test]
    fn test_rewrite_reparses_text_replaced_by_the_host() {
        let mut page = StaticPage::new(vec!["100".to_owned()], vec![], None);
        let mut snapshots = Snapshots::new();

        rewrite_prices(&mut page, &mut snapshots, dec!(0.91), &eur());

        // The host swapped in a different product price after navigation.
        page.set_price_text(ElementId::new(0), "50");
        rewrite_prices(&mut page, &mut snapshots, dec!(0.91), &eur());
        assert_eq!(page.prices(), ["45.50"]);
    }

    #[test]
    fn test_rewrite_skips_unparsable_elements() {
        let mut page = StaticPage::new(
            vec!["Sold out".to_owned(), "10".to_owned()],
            vec![],
            None,
        );
        let mut snapshots = Snapshots::new();

        let stats = rewrite_prices(&mut page, &mut snapshots, dec!(0.85), &eur());

        assert_eq!(stats, RewriteStats { rewritten: 1, skipped: 1 });
        assert_eq!(page.prices(), ["Sold out", "8.50"]);
    }

    #[test]
    fn test_first_amount_prefers_snapshotted_original() {
        let mut page = StaticPage::new(vec!["100".to_owned()], vec![], None);
        let mut snapshots = Snapshots::new();
        assert_eq!(first_amount(&page, &snapshots), Some(dec!(100)));

        rewrite_prices(&mut page, &mut snapshots, dec!(0.91), &eur());
        assert_eq!(first_amount(&page, &snapshots), Some(dec!(100)));
    }
}
