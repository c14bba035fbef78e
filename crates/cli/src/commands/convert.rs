//! One-shot conversion runs against a page snapshot.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use localprice_admin::{JsonFileRepository, SelectionService};
use localprice_widget::{Engine, JsonFileStore, RunOutcome, StaticPage, WidgetConfig};

/// Run the conversion workflow once and print the resulting page.
pub async fn run(data_dir: &Path, page_path: &Path) -> Result<(), Box<dyn Error>> {
    let config = WidgetConfig::from_env()?;
    let store = Arc::new(JsonFileStore::open(super::store_path(data_dir))?);
    let selection = {
        let repository = JsonFileRepository::new(super::selection_path(data_dir));
        SelectionService::open(Box::new(repository))?
    };

    let raw = std::fs::read_to_string(page_path)?;
    let mut page: StaticPage = serde_json::from_str(&raw)?;

    let engine = Engine::new(config, store, selection.entries().to_vec())?;
    let outcome = engine.run(&mut page).await?;

    match outcome {
        RunOutcome::Converted {
            currency,
            rate,
            fallback,
            stats,
        } => {
            if fallback {
                println!(
                    "rate unavailable, applied neutral rate 1 ({} rewritten, {} skipped)",
                    stats.rewritten, stats.skipped
                );
            } else {
                println!(
                    "converted to {currency} at rate {rate} ({} rewritten, {} skipped)",
                    stats.rewritten, stats.skipped
                );
            }
        }
        RunOutcome::NoMatch { country } => {
            println!("{country} is not in the selection, page left unchanged");
        }
        RunOutcome::SameCurrency { currency } => {
            println!("page already displays {currency}, nothing to do");
        }
    }

    println!("prices: {}", page.prices().join(", "));
    println!("labels: {}", page.currency_labels().join(", "));

    Ok(())
}
