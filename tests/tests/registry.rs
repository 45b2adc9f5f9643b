use pretty_assertions::assert_eq;
use std::sync::Arc;
use tableql::{introspect::Introspector, LoaderConfig, LoaderRegistry};
use tableql_core::schema::db::ColumnRef;
use tests::{fixture, Fixture, MemoryDriver};

async fn registry(fixture: Fixture) -> LoaderRegistry {
    let driver = Arc::new(MemoryDriver::new(fixture));
    let catalog = Introspector::new().introspect(&*driver).await.unwrap();
    LoaderRegistry::new(&catalog, driver, &LoaderConfig::default())
}

fn sorted_keys(registry: &LoaderRegistry) -> Vec<String> {
    let mut keys: Vec<_> = registry.keys().map(ToString::to_string).collect();
    keys.sort();
    keys
}

#[tokio::test]
async fn one_loader_per_foreign_key_end() {
    let registry = registry(fixture::author_book()).await;

    assert_eq!(sorted_keys(&registry), ["author-id", "book-author_id"]);

    let loader = registry.get(&ColumnRef::new("book", "author_id")).unwrap();
    assert_eq!(loader.column(), &ColumnRef::new("book", "author_id"));
}

#[tokio::test]
async fn self_reference_shares_the_table() {
    let registry = registry(fixture::employee()).await;

    assert_eq!(sorted_keys(&registry), ["employee-id", "employee-manager_id"]);
}

#[tokio::test]
async fn mutual_references_register_every_end() {
    let registry = registry(fixture::team_player()).await;

    assert_eq!(
        sorted_keys(&registry),
        ["player-id", "player-team_id", "team-captain_id", "team-id"]
    );
}

#[tokio::test]
async fn schema_without_foreign_keys_has_no_loaders() {
    let fixture = Fixture::new().table("log", &[("message", "text")], None);
    let registry = registry(fixture).await;

    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[tokio::test]
async fn unknown_key_is_an_error() {
    let registry = registry(fixture::author_book()).await;
    let key = ColumnRef::new("book", "title");

    assert!(!registry.contains(&key));

    let err = registry.get(&key).unwrap_err();
    assert!(err.is_missing_loader());
    assert_eq!(err.to_string(), "no loader registered for `book-title`");
}
