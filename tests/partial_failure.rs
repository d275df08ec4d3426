mod common;

use bizgen::generate::model::DatasetKind;
use bizgen::{
    BusinessDataGenerator, CsvStore, GenerateError, GeneratorService, Manifest, RunStatus,
    SqliteStore,
};
use common::{clock, read_csv, small_config, FailOn};

fn read_manifest(store: &CsvStore) -> Manifest {
    let body = std::fs::read_to_string(store.manifest_path()).unwrap();
    serde_json::from_str(&body).unwrap()
}

fn assert_partial_after_financial(store: &CsvStore, err: GenerateError) {
    match err {
        GenerateError::StorageWrite { table, .. } => assert_eq!(table, "financial"),
        other => panic!("unexpected error: {other}"),
    }
    for kind in [DatasetKind::Customers, DatasetKind::Sales, DatasetKind::Employees] {
        let (_, rows) = read_csv(&store.table_path(kind));
        assert!(!rows.is_empty(), "{} should remain", kind.name());
    }
    assert!(!store.table_path(DatasetKind::Operations).exists());

    let manifest = read_manifest(store);
    assert_eq!(manifest.status, RunStatus::Partial);
    assert_eq!(manifest.failed_table.as_deref(), Some("financial"));
    let names: Vec<&str> = manifest.datasets.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["customers", "sales", "employees"]);
}

#[tokio::test]
async fn financial_write_failure_keeps_earlier_tables() {
    let dir = tempfile::tempdir().unwrap();
    let store = FailOn {
        inner: CsvStore::new(dir.path()),
        kind: DatasetKind::Financial,
    };
    let mut service = GeneratorService::new(
        BusinessDataGenerator::new(small_config(dir.path())).with_clock(clock()),
        store,
    );
    let err = service.generate_all().await.unwrap_err();
    assert_partial_after_financial(&service.store().inner, err);
    assert!(!service.store().inner.table_path(DatasetKind::Financial).exists());
}

#[tokio::test]
async fn blocked_target_path_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvStore::new(dir.path());
    // 目标路径被目录占用，rename 失败
    std::fs::create_dir(store.table_path(DatasetKind::Financial)).unwrap();

    let mut service = GeneratorService::new(
        BusinessDataGenerator::new(small_config(dir.path())).with_clock(clock()),
        store.clone(),
    );
    let err = service.generate_all().await.unwrap_err();
    assert_partial_after_financial(&store, err);
    assert!(store.table_path(DatasetKind::Financial).is_dir());
    assert!(!dir.path().join("financial_statements.csv.tmp").exists());
}

async fn complete_run_in(dir: &std::path::Path) {
    let mut service = GeneratorService::new(
        BusinessDataGenerator::new(small_config(dir)).with_clock(clock()),
        CsvStore::new(dir),
    );
    service.generate_all().await.unwrap();
}

#[tokio::test]
async fn failed_rerun_removes_tables_from_previous_run() {
    let dir = tempfile::tempdir().unwrap();
    complete_run_in(dir.path()).await;
    let store = CsvStore::new(dir.path());
    assert!(store.table_path(DatasetKind::Financial).exists());
    assert!(store.table_path(DatasetKind::Operations).exists());

    let mut cfg = small_config(dir.path());
    cfg.seed = 7;
    let mut service = GeneratorService::new(
        BusinessDataGenerator::new(cfg).with_clock(clock()),
        FailOn {
            inner: store.clone(),
            kind: DatasetKind::Financial,
        },
    );
    let err = service.generate_all().await.unwrap_err();
    assert_partial_after_financial(&store, err);
    assert!(!store.table_path(DatasetKind::Financial).exists());
    assert_eq!(read_manifest(&store).seed, 7);
}

#[tokio::test]
async fn generation_error_after_written_tables_marks_manifest_partial() {
    let dir = tempfile::tempdir().unwrap();
    complete_run_in(dir.path()).await;
    let store = CsvStore::new(dir.path());

    // 月份序列会越过日历上限
    let mut cfg = small_config(dir.path());
    cfg.counts.financial_periods = 4_000_000;
    let mut service = GeneratorService::new(
        BusinessDataGenerator::new(cfg).with_clock(clock()),
        store.clone(),
    );
    let err = service.generate_all().await.unwrap_err();
    assert!(matches!(err, GenerateError::InvalidArgument(_)));

    let manifest = read_manifest(&store);
    assert_eq!(manifest.status, RunStatus::Partial);
    assert_eq!(manifest.failed_table.as_deref(), Some("financial"));
    assert_eq!(manifest.datasets.len(), 3);
    assert!(!store.table_path(DatasetKind::Financial).exists());
    assert!(!store.table_path(DatasetKind::Operations).exists());
}

#[tokio::test]
async fn sqlite_financial_failure_keeps_earlier_tables() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = small_config(dir.path());
    let sqlite = SqliteStore::new(cfg.database_url.clone());

    // 先有一次完整运行，失败的重跑必须清掉后两张表
    let mut full = GeneratorService::new(
        BusinessDataGenerator::new(cfg.clone()).with_clock(clock()),
        sqlite.clone(),
    );
    full.generate_all().await.unwrap();
    assert_eq!(sqlite.count_rows(DatasetKind::Operations).await.unwrap(), 80);

    let mut service = GeneratorService::new(
        BusinessDataGenerator::new(cfg).with_clock(clock()),
        FailOn {
            inner: sqlite.clone(),
            kind: DatasetKind::Financial,
        },
    );
    let err = service.generate_all().await.unwrap_err();
    assert_eq!(err.failed_table(), Some("financial"));

    for (kind, expected) in [
        (DatasetKind::Customers, 40u64),
        (DatasetKind::Sales, 150),
        (DatasetKind::Employees, 30),
        (DatasetKind::Financial, 0),
        (DatasetKind::Operations, 0),
    ] {
        assert_eq!(sqlite.count_rows(kind).await.unwrap(), expected, "{}", kind.name());
    }
    let manifest = sqlite.read_manifest().await.unwrap().unwrap();
    assert_eq!(manifest.status, RunStatus::Partial);
    assert_eq!(manifest.failed_table.as_deref(), Some("financial"));
    assert_eq!(manifest.datasets.len(), 3);
}
