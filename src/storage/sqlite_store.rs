use crate::generate::model::{Dataset, DatasetKind};
use crate::manifest::Manifest;
use crate::storage::connection::establish_connection;
use crate::storage::repository::{ManifestRepository, TableRepository};
use crate::storage::{StorageError, TableStore};
use async_trait::async_trait;
use log::{info, warn};
use sea_orm::DatabaseConnection;

/// 嵌入式 SQLite；每次写表单独开连接、写完即关
#[derive(Clone, Debug)]
pub struct SqliteStore {
    db_url: String,
}

impl SqliteStore {
    pub fn new(db_url: impl Into<String>) -> Self {
        Self {
            db_url: db_url.into(),
        }
    }

    pub async fn count_rows(&self, kind: DatasetKind) -> Result<u64, StorageError> {
        let db = establish_connection(&self.db_url).await?;
        let res = TableRepository::count(&db, kind).await;
        close(db).await;
        Ok(res?)
    }

    pub async fn read_manifest(&self) -> Result<Option<Manifest>, StorageError> {
        let db = establish_connection(&self.db_url).await?;
        let res = ManifestRepository::latest(&db).await;
        close(db).await;
        res
    }
}

async fn close(db: DatabaseConnection) {
    if let Err(e) = db.close().await {
        warn!("关闭数据库连接失败: {}", e);
    }
}

#[async_trait]
impl TableStore for SqliteStore {
    fn describe(&self) -> String {
        format!("sqlite:{}", self.db_url)
    }

    async fn write_table(&self, dataset: &Dataset<'_>) -> Result<(), StorageError> {
        let db = establish_connection(&self.db_url).await?;
        let res = TableRepository::replace(&db, dataset).await;
        close(db).await;
        let inserted = res?;
        info!("已写入表 {} ({} 行)", dataset.kind().table_name(), inserted);
        Ok(())
    }

    async fn clear_table(&self, kind: DatasetKind) -> Result<(), StorageError> {
        let db = establish_connection(&self.db_url).await?;
        let res = TableRepository::clear(&db, kind).await;
        close(db).await;
        let removed = res?;
        info!("已清空表 {} ({} 行)", kind.table_name(), removed);
        Ok(())
    }

    async fn write_manifest(&self, manifest: &Manifest) -> Result<(), StorageError> {
        let db = establish_connection(&self.db_url).await?;
        let res = ManifestRepository::replace(&db, manifest).await;
        close(db).await;
        res
    }
}
