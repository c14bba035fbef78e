//! Currency lookup against the curated selection list.

use localprice_core::SelectedCurrency;

/// Find the curated entry applying to a resolved country name.
///
/// Linear scan over the operator-curated list. Comparison is
/// whitespace-trimmed and ASCII case-insensitive, so locale variance
/// between the geolocation service and the admin catalog cannot cause
/// silent mismatches.
///
/// A miss is not an error; the caller leaves the page unconverted.
#[must_use]
pub fn find_currency<'a>(
    country_name: &str,
    selected: &'a [SelectedCurrency],
) -> Option<&'a SelectedCurrency> {
    let needle = country_name.trim();
    selected
        .iter()
        .find(|entry| entry.country_name.trim().eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use localprice_core::{CountryId, CurrencyCode};

    use super::*;

    fn curated() -> Vec<SelectedCurrency> {
        [
            (115, "Morocco", "MAD"),
            (185, "United States", "USD"),
            (59, "France", "EUR"),
        ]
        .into_iter()
        .map(|(id, name, currency)| {
            SelectedCurrency::new(
                CountryId::new(id),
                name.to_owned(),
                CurrencyCode::parse(currency).expect("valid code"),
            )
        })
        .collect()
    }

    #[test]
    fn test_present_name_returns_matching_entry() {
        let selected = curated();
        let entry = find_currency("France", &selected).expect("present");
        assert_eq!(entry.currency.as_str(), "EUR");
    }

    #[test]
    fn test_absent_name_returns_none() {
        let selected = curated();
        assert!(find_currency("Japan", &selected).is_none());
    }

    #[test]
    fn test_match_ignores_case_and_whitespace() {
        let selected = curated();
        let entry = find_currency("  united states ", &selected).expect("present");
        assert_eq!(entry.currency.as_str(), "USD");
    }

    #[test]
    fn test_empty_list_always_misses() {
        assert!(find_currency("France", &[]).is_none());
    }
}
