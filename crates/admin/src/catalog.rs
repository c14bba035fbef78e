//! Country/currency catalog.
//!
//! The dataset the operator searches when curating the selection list. Ships
//! with a built-in dataset; merchants with their own country table can load
//! one from JSON instead (same camelCase shape the selection list uses).

use localprice_core::{CountryId, CurrencyCode, SelectedCurrency};

use crate::error::AdminError;

/// Built-in country/currency dataset: (id, country name, currency code).
const BUILTIN: &[(i32, &str, &str)] = &[
    (8, "Argentina", "ARS"),
    (11, "Australia", "AUD"),
    (12, "Austria", "EUR"),
    (19, "Belgium", "EUR"),
    (27, "Brazil", "BRL"),
    (36, "Canada", "CAD"),
    (41, "Chile", "CLP"),
    (42, "China", "CNY"),
    (45, "Colombia", "COP"),
    (53, "Czechia", "CZK"),
    (54, "Denmark", "DKK"),
    (57, "Egypt", "EGP"),
    (58, "Finland", "EUR"),
    (59, "France", "EUR"),
    (64, "Germany", "EUR"),
    (66, "Greece", "EUR"),
    (71, "Hungary", "HUF"),
    (73, "India", "INR"),
    (74, "Indonesia", "IDR"),
    (77, "Ireland", "EUR"),
    (78, "Israel", "ILS"),
    (79, "Italy", "EUR"),
    (81, "Japan", "JPY"),
    (83, "Kenya", "KES"),
    (100, "Malaysia", "MYR"),
    (106, "Mexico", "MXN"),
    (115, "Morocco", "MAD"),
    (118, "Netherlands", "EUR"),
    (119, "New Zealand", "NZD"),
    (122, "Nigeria", "NGN"),
    (125, "Norway", "NOK"),
    (133, "Philippines", "PHP"),
    (134, "Poland", "PLN"),
    (135, "Portugal", "EUR"),
    (138, "Romania", "RON"),
    (145, "Saudi Arabia", "SAR"),
    (149, "Singapore", "SGD"),
    (155, "South Africa", "ZAR"),
    (156, "South Korea", "KRW"),
    (157, "Spain", "EUR"),
    (162, "Sweden", "SEK"),
    (163, "Switzerland", "CHF"),
    (168, "Thailand", "THB"),
    (174, "Turkey", "TRY"),
    (183, "United Arab Emirates", "AED"),
    (184, "United Kingdom", "GBP"),
    (185, "United States", "USD"),
    (190, "Vietnam", "VND"),
];

/// The searchable country/currency dataset.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<SelectedCurrency>,
}

impl Catalog {
    /// The built-in dataset.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .filter_map(|&(id, name, currency)| {
                CurrencyCode::parse(currency)
                    .ok()
                    .map(|code| SelectedCurrency::new(CountryId::new(id), name.to_owned(), code))
            })
            .collect();
        Self { entries }
    }

    /// Load a merchant-supplied dataset from JSON.
    ///
    /// Expects an array of `{id, countryName, currency}` objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match that shape.
    pub fn from_json(json: &str) -> Result<Self, AdminError> {
        let entries: Vec<SelectedCurrency> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// All catalog entries.
    #[must_use]
    pub fn entries(&self) -> &[SelectedCurrency] {
        &self.entries
    }

    /// Case-insensitive prefix search on country name.
    ///
    /// An empty (or all-whitespace) query returns the full catalog.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&SelectedCurrency> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.country_name.to_lowercase().starts_with(&needle))
            .collect()
    }

    /// Exact (case-insensitive) lookup by country name.
    #[must_use]
    pub fn find(&self, country_name: &str) -> Option<&SelectedCurrency> {
        let needle = country_name.trim();
        self.entries
            .iter()
            .find(|entry| entry.country_name.eq_ignore_ascii_case(needle))
    }

    /// Number of catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_ordered_and_nonempty() {
        let catalog = Catalog::builtin();
        assert!(!catalog.is_empty());

        let ids: Vec<i32> = catalog.entries().iter().map(|e| e.id.as_i32()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_search_is_prefix_and_case_insensitive() {
        let catalog = Catalog::builtin();

        let hits = catalog.search("mo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().map(|e| e.country_name.as_str()), Some("Morocco"));

        let united = catalog.search("UNITED");
        assert_eq!(united.len(), 3);
    }

    #[test]
    fn test_search_empty_query_returns_everything() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.search("").len(), catalog.len());
        assert_eq!(catalog.search("   ").len(), catalog.len());
    }

    #[test]
    fn test_find_matches_exact_name_only() {
        let catalog = Catalog::builtin();
        assert!(catalog.find("france").is_some());
        assert!(catalog.find("Fra").is_none());
    }

    #[test]
    fn test_from_json_roundtrip() {
        let catalog =
            Catalog::from_json(r#"[{"id":59,"countryName":"France","currency":"EUR"}]"#)
                .expect("valid json");
        assert_eq!(catalog.len(), 1);
        assert!(Catalog::from_json("not json").is_err());
    }
}
