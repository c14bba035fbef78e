//! The operator-curated selection list.
//!
//! Holds the countries/currencies a merchant has chosen to offer, in the
//! order the operator arranged them. Every mutation persists through the
//! [`SelectionRepository`] seam so the storefront widget always reads the
//! current list.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use localprice_core::SelectedCurrency;
use tracing::{info, instrument};

use crate::catalog::Catalog;
use crate::error::AdminError;

/// Persistence seam for the curated list.
pub trait SelectionRepository: Send + Sync {
    /// Load the persisted list; an absent store yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted data exists but cannot be read.
    fn load(&self) -> Result<Vec<SelectedCurrency>, AdminError>;

    /// Persist the list, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be written.
    fn save(&self, entries: &[SelectedCurrency]) -> Result<(), AdminError>;
}

/// File-backed repository storing the list as a JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Create a repository backed by `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SelectionRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<SelectedCurrency>, AdminError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, entries: &[SelectedCurrency]) -> Result<(), AdminError> {
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory repository for tests and ephemeral hosts.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    entries: Mutex<Vec<SelectedCurrency>>,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<SelectedCurrency>, AdminError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, entries: &[SelectedCurrency]) -> Result<(), AdminError> {
        *self.entries.lock().unwrap_or_else(PoisonError::into_inner) = entries.to_vec();
        Ok(())
    }
}

/// The curated list with its editing operations.
pub struct SelectionService {
    repository: Box<dyn SelectionRepository>,
    entries: Vec<SelectedCurrency>,
}

impl SelectionService {
    /// Open the service, loading the persisted list.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted list cannot be read.
    pub fn open(repository: Box<dyn SelectionRepository>) -> Result<Self, AdminError> {
        let entries = repository.load()?;
        Ok(Self {
            repository,
            entries,
        })
    }

    /// The curated list, in operator order.
    #[must_use]
    pub fn entries(&self) -> &[SelectedCurrency] {
        &self.entries
    }

    /// Add a country to the list.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Duplicate`] if the country is already selected,
    /// or a persistence error.
    #[instrument(skip(self, entry), fields(country = %entry.country_name))]
    pub fn add(&mut self, entry: SelectedCurrency) -> Result<(), AdminError> {
        if self.position_of(&entry.country_name).is_some() {
            return Err(AdminError::Duplicate {
                country: entry.country_name,
            });
        }
        self.entries.push(entry);
        self.repository.save(&self.entries)?;
        info!(total = self.entries.len(), "country added to selection");
        Ok(())
    }

    /// Remove a country from the list.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] if the country is not selected,
    /// or a persistence error.
    #[instrument(skip(self))]
    pub fn remove(&mut self, country_name: &str) -> Result<(), AdminError> {
        let Some(index) = self.position_of(country_name) else {
            return Err(AdminError::NotFound {
                country: country_name.to_owned(),
            });
        };
        self.entries.remove(index);
        self.repository.save(&self.entries)?;
        info!(total = self.entries.len(), "country removed from selection");
        Ok(())
    }

    /// Replace the list with the entire catalog.
    ///
    /// # Errors
    ///
    /// Returns a persistence error.
    #[instrument(skip(self, catalog))]
    pub fn select_all(&mut self, catalog: &Catalog) -> Result<(), AdminError> {
        self.entries = catalog.entries().to_vec();
        self.repository.save(&self.entries)?;
        info!(total = self.entries.len(), "entire catalog selected");
        Ok(())
    }

    /// Empty the list.
    ///
    /// # Errors
    ///
    /// Returns a persistence error.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), AdminError> {
        self.entries.clear();
        self.repository.save(&self.entries)?;
        info!("selection cleared");
        Ok(())
    }

    /// Move the entry at `from` to position `to`, shifting the others.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidPosition`] if either position is out of
    /// bounds, or a persistence error.
    #[instrument(skip(self))]
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), AdminError> {
        let len = self.entries.len();
        if from >= len {
            return Err(AdminError::InvalidPosition { index: from, len });
        }
        if to >= len {
            return Err(AdminError::InvalidPosition { index: to, len });
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        self.repository.save(&self.entries)?;
        Ok(())
    }

    fn position_of(&self, country_name: &str) -> Option<usize> {
        let needle = country_name.trim();
        self.entries
            .iter()
            .position(|entry| entry.country_name.eq_ignore_ascii_case(needle))
    }
}

#[cfg(test)]
mod tests {
    use localprice_core::{CountryId, CurrencyCode};

    use super::*;

    fn entry(id: i32, name: &str, currency: &str) -> SelectedCurrency {
        SelectedCurrency::new(
            CountryId::new(id),
            name.to_owned(),
            CurrencyCode::parse(currency).expect("valid code"),
        )
    }

    fn service() -> SelectionService {
        SelectionService::open(Box::new(MemoryRepository::new())).expect("open")
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut service = service();
        service.add(entry(59, "France", "EUR")).expect("add");

        let result = service.add(entry(59, "france", "EUR"));
        assert!(matches!(result, Err(AdminError::Duplicate { .. })));
        assert_eq!(service.entries().len(), 1);
    }

    #[test]
    fn test_remove_unknown_country_fails() {
        let mut service = service();
        let result = service.remove("Japan");
        assert!(matches!(result, Err(AdminError::NotFound { .. })));
    }

    #[test]
    fn test_select_all_then_clear() {
        let catalog = Catalog::builtin();
        let mut service = service();

        service.select_all(&catalog).expect("select all");
        assert_eq!(service.entries().len(), catalog.len());

        service.clear().expect("clear");
        assert!(service.entries().is_empty());
    }

    #[test]
    fn test_move_entry_reorders() {
        let mut service = service();
        service.add(entry(115, "Morocco", "MAD")).expect("add");
        service.add(entry(185, "United States", "USD")).expect("add");
        service.add(entry(59, "France", "EUR")).expect("add");

        service.move_entry(2, 0).expect("move");

        let names: Vec<&str> = service
            .entries()
            .iter()
            .map(|e| e.country_name.as_str())
            .collect();
        assert_eq!(names, ["France", "Morocco", "United States"]);
    }

    #[test]
    fn test_move_entry_rejects_out_of_bounds() {
        let mut service = service();
        service.add(entry(59, "France", "EUR")).expect("add");

        assert!(matches!(
            service.move_entry(0, 5),
            Err(AdminError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn test_mutations_persist_through_repository() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("selection.json");

        {
            let repository = JsonFileRepository::new(&path);
            let mut service = SelectionService::open(Box::new(repository)).expect("open");
            service.add(entry(59, "France", "EUR")).expect("add");
            service.add(entry(115, "Morocco", "MAD")).expect("add");
            service.remove("France").expect("remove");
        }

        let reopened =
            SelectionService::open(Box::new(JsonFileRepository::new(&path))).expect("reopen");
        let names: Vec<&str> = reopened
            .entries()
            .iter()
            .map(|e| e.country_name.as_str())
            .collect();
        assert_eq!(names, ["Morocco"]);
    }
}
