//! Gateway auth token commands.

use std::error::Error;
use std::path::Path;

use localprice_widget::{AUTH_TOKEN_KEY, JsonFileStore, KeyValueStore};

/// Store the gateway auth token.
pub fn set(data_dir: &Path, token: &str) -> Result<(), Box<dyn Error>> {
    let store = JsonFileStore::open(super::store_path(data_dir))?;
    store.set(AUTH_TOKEN_KEY, token);
    println!("token stored");
    Ok(())
}

/// Delete the stored token.
pub fn clear(data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let store = JsonFileStore::open(super::store_path(data_dir))?;
    store.remove(AUTH_TOKEN_KEY);
    println!("token cleared");
    Ok(())
}
