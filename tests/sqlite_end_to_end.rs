mod common;

use bizgen::generate::model::DatasetKind;
use bizgen::{
    AnyStore, BusinessDataGenerator, GeneratorService, RunStatus, SqliteStore, StoreKind,
};
use common::{clock, small_config};

#[tokio::test]
async fn writes_tables_and_manifest_row() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = small_config(dir.path());
    let store = SqliteStore::new(cfg.database_url.clone());
    let mut service =
        GeneratorService::new(BusinessDataGenerator::new(cfg).with_clock(clock()), store);
    let data = service.generate_all().await.unwrap();

    let store = service.store();
    for (kind, expected) in [
        (DatasetKind::Customers, 40u64),
        (DatasetKind::Sales, 150),
        (DatasetKind::Employees, 30),
        (DatasetKind::Financial, 6),
        (DatasetKind::Operations, 80),
    ] {
        assert_eq!(store.count_rows(kind).await.unwrap(), expected, "{}", kind.name());
    }
    let manifest = store.read_manifest().await.unwrap().unwrap();
    assert_eq!(manifest.status, RunStatus::Complete);
    assert_eq!(manifest.generation_date, data.manifest.generation_date);
    assert_eq!(manifest.dataset("employees").unwrap().departments, data.manifest.dataset("employees").unwrap().departments);
}

#[tokio::test]
async fn rerun_replaces_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = small_config(dir.path());
    cfg.store = StoreKind::Sqlite;

    let mut first = GeneratorService::new(
        BusinessDataGenerator::new(cfg.clone()).with_clock(clock()),
        AnyStore::from_config(&cfg),
    );
    first.generate_all().await.unwrap();

    cfg.counts.operations = 10;
    let mut second = GeneratorService::new(
        BusinessDataGenerator::new(cfg.clone()).with_clock(clock()),
        AnyStore::from_config(&cfg),
    );
    second.generate_all().await.unwrap();

    let store = SqliteStore::new(cfg.database_url.clone());
    assert_eq!(store.count_rows(DatasetKind::Operations).await.unwrap(), 10);
    assert_eq!(store.count_rows(DatasetKind::Customers).await.unwrap(), 40);
    let manifest = store.read_manifest().await.unwrap().unwrap();
    assert_eq!(manifest.dataset("operations").unwrap().records, 10);
}
