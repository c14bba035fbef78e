//! Admin curation feeding the widget engine.
//!
//! An operator curates the list through the selection service; the widget
//! engine then matches visitors against exactly that list.

use localprice_admin::{Catalog, JsonFileRepository, SelectionService};
use localprice_integration_tests::TestContext;
use localprice_widget::{RunOutcome, StaticPage};

fn open_service(dir: &std::path::Path) -> SelectionService {
    let repository = JsonFileRepository::new(dir.join("selection.json"));
    SelectionService::open(Box::new(repository)).expect("service opens")
}

#[tokio::test]
async fn test_curated_list_drives_the_engine() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = Catalog::builtin();

    // The operator searches for "fr" and selects the hit.
    {
        let mut service = open_service(dir.path());
        let hits = catalog.search("fr");
        assert_eq!(hits.len(), 1);
        let france = hits.first().copied().expect("France is in the catalog");
        service.add(france.clone()).expect("add France");
    }

    // The storefront widget reads the persisted list.
    let service = open_service(dir.path());
    let selected = service.entries().to_vec();
    assert_eq!(selected.len(), 1);

    let ctx = TestContext::new().await;
    ctx.mock_geo("1;33;FR;France", 1).await;
    ctx.mock_rate(0.91, 1).await;

    let engine = ctx.engine(selected);
    let mut page = StaticPage::new(
        vec!["10".to_owned()],
        vec!["USD".to_owned()],
        None, // no CURRENT_CURRENCY cookie: the configured default applies
    );

    let outcome = engine.run(&mut page).await.expect("run succeeds");
    assert!(matches!(outcome, RunOutcome::Converted { .. }));
    assert_eq!(page.prices(), ["9.10"]);
    assert_eq!(page.currency_labels(), ["EUR"]);
}

#[tokio::test]
async fn test_removed_country_no_longer_matches() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = Catalog::builtin();

    {
        let mut service = open_service(dir.path());
        let france = catalog.find("France").expect("in catalog").clone();
        service.add(france).expect("add France");
        service.remove("France").expect("remove France");
    }

    let service = open_service(dir.path());

    let ctx = TestContext::new().await;
    ctx.mock_geo("1;33;FR;France", 1).await;

    let engine = ctx.engine(service.entries().to_vec());
    let mut page = StaticPage::new(vec!["10".to_owned()], vec![], None);

    let outcome = engine.run(&mut page).await.expect("run succeeds");
    assert!(matches!(outcome, RunOutcome::NoMatch { .. }));
    assert_eq!(page.prices(), ["10"]);
}
