#![allow(dead_code)]

use bizgen::generate::model::{Dataset, DatasetKind};
use bizgen::{GeneratorConfig, Manifest, StorageError, StoreKind, TableStore};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;

pub fn clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 9, 30, 0).unwrap()
}

pub fn small_config(dir: &Path) -> GeneratorConfig {
    let mut cfg = GeneratorConfig::default();
    cfg.seed = 42;
    cfg.counts.customers = 40;
    cfg.customer_id_space = 40;
    cfg.counts.sales = 150;
    cfg.counts.employees = 30;
    cfg.counts.financial_periods = 6;
    cfg.counts.operations = 80;
    cfg.store = StoreKind::Csv;
    cfg.output_dir = dir.to_path_buf();
    cfg.database_url = format!("sqlite://{}?mode=rwc", dir.join("business.db").display());
    cfg
}

/// 指定表写入时报错，其余交给内层存储
pub struct FailOn<S> {
    pub inner: S,
    pub kind: DatasetKind,
}

#[async_trait]
impl<S: TableStore> TableStore for FailOn<S> {
    fn describe(&self) -> String {
        format!("fail-on-{}:{}", self.kind.name(), self.inner.describe())
    }

    async fn write_table(&self, dataset: &Dataset<'_>) -> Result<(), StorageError> {
        if dataset.kind() == self.kind {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }
        self.inner.write_table(dataset).await
    }

    async fn clear_table(&self, kind: DatasetKind) -> Result<(), StorageError> {
        self.inner.clear_table(kind).await
    }

    async fn write_manifest(&self, manifest: &Manifest) -> Result<(), StorageError> {
        self.inner.write_manifest(manifest).await
    }
}

pub fn read_csv(path: &Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let headers = rdr.headers().unwrap().iter().map(String::from).collect();
    let rows = rdr.records().map(|r| r.unwrap()).collect();
    (headers, rows)
}
