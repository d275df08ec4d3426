pub mod connection;
pub mod csv_store;
pub mod entity;
pub mod repository;
pub mod sqlite_store;

pub use connection::establish_connection;
pub use csv_store::CsvStore;
pub use sqlite_store::SqliteStore;

use crate::config::{GeneratorConfig, StoreKind};
use crate::generate::model::{Dataset, DatasetKind};
use crate::manifest::Manifest;
use async_trait::async_trait;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 生成结果的落盘目标；每次写入都整表替换
#[async_trait]
pub trait TableStore: Send + Sync {
    fn describe(&self) -> String;
    async fn write_table(&self, dataset: &Dataset<'_>) -> Result<(), StorageError>;
    /// 删除某张表已有的数据；表本不存在时视为成功
    async fn clear_table(&self, kind: DatasetKind) -> Result<(), StorageError>;
    async fn write_manifest(&self, manifest: &Manifest) -> Result<(), StorageError>;
}

#[derive(Clone, Debug)]
enum InnerStore {
    Csv(CsvStore),
    Sqlite(SqliteStore),
}

/// 按配置选择的存储后端
#[derive(Clone, Debug)]
pub struct AnyStore {
    inner: InnerStore,
}

impl AnyStore {
    pub fn from_config(cfg: &GeneratorConfig) -> Self {
        let inner = match cfg.store {
            StoreKind::Csv => InnerStore::Csv(CsvStore::new(&cfg.output_dir)),
            StoreKind::Sqlite => InnerStore::Sqlite(SqliteStore::new(&cfg.database_url)),
        };
        Self { inner }
    }
}

#[async_trait]
impl TableStore for AnyStore {
    fn describe(&self) -> String {
        match &self.inner {
            InnerStore::Csv(s) => s.describe(),
            InnerStore::Sqlite(s) => s.describe(),
        }
    }

    async fn write_table(&self, dataset: &Dataset<'_>) -> Result<(), StorageError> {
        match &self.inner {
            InnerStore::Csv(s) => s.write_table(dataset).await,
            InnerStore::Sqlite(s) => s.write_table(dataset).await,
        }
    }

    async fn clear_table(&self, kind: DatasetKind) -> Result<(), StorageError> {
        match &self.inner {
            InnerStore::Csv(s) => s.clear_table(kind).await,
            InnerStore::Sqlite(s) => s.clear_table(kind).await,
        }
    }

    async fn write_manifest(&self, manifest: &Manifest) -> Result<(), StorageError> {
        match &self.inner {
            InnerStore::Csv(s) => s.write_manifest(manifest).await,
            InnerStore::Sqlite(s) => s.write_manifest(manifest).await,
        }
    }
}
