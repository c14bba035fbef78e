//! Selection curation commands.

use std::error::Error;
use std::path::Path;

use localprice_admin::{Catalog, JsonFileRepository, SelectionService};

fn open_service(data_dir: &Path) -> Result<SelectionService, Box<dyn Error>> {
    let repository = JsonFileRepository::new(super::selection_path(data_dir));
    Ok(SelectionService::open(Box::new(repository))?)
}

/// Print the curated list in operator order.
pub fn list(data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let service = open_service(data_dir)?;
    if service.entries().is_empty() {
        println!("selection is empty");
        return Ok(());
    }
    for (position, entry) in service.entries().iter().enumerate() {
        println!("{position:3}  {}  {}", entry.currency, entry.country_name);
    }
    Ok(())
}

/// Search the catalog by country-name prefix.
pub fn search(query: &str) {
    let catalog = Catalog::builtin();
    for entry in catalog.search(query) {
        println!("{}  {}", entry.currency, entry.country_name);
    }
}

/// Add a catalog country to the curated list.
pub fn add(data_dir: &Path, country: &str) -> Result<(), Box<dyn Error>> {
    let catalog = Catalog::builtin();
    let Some(entry) = catalog.find(country) else {
        return Err(format!("{country} is not in the catalog").into());
    };

    let mut service = open_service(data_dir)?;
    service.add(entry.clone())?;
    println!("added {}", entry.country_name);
    Ok(())
}

/// Remove a country from the curated list.
pub fn remove(data_dir: &Path, country: &str) -> Result<(), Box<dyn Error>> {
    let mut service = open_service(data_dir)?;
    service.remove(country)?;
    println!("removed {country}");
    Ok(())
}

/// Select every catalog country.
pub fn select_all(data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let catalog = Catalog::builtin();
    let mut service = open_service(data_dir)?;
    service.select_all(&catalog)?;
    println!("selected all {} catalog countries", catalog.len());
    Ok(())
}

/// Empty the curated list.
pub fn clear(data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut service = open_service(data_dir)?;
    service.clear()?;
    println!("selection cleared");
    Ok(())
}

/// Move an entry to a new position.
pub fn move_entry(data_dir: &Path, from: usize, to: usize) -> Result<(), Box<dyn Error>> {
    let mut service = open_service(data_dir)?;
    service.move_entry(from, to)?;
    println!("moved entry {from} to {to}");
    Ok(())
}
