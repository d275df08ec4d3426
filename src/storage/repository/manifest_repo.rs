use crate::manifest::{Manifest, RunStatus};
use crate::storage::entity::generation_manifest::{
    ActiveModel as ManifestActiveModel, Column as ManifestColumn,
};
use crate::storage::entity::GenerationManifest;
use crate::storage::StorageError;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set, TransactionTrait,
};

pub struct ManifestRepository;

impl ManifestRepository {
    /// 只保留最近一次运行的清单
    pub async fn replace(db: &DatabaseConnection, manifest: &Manifest) -> Result<(), StorageError> {
        let body = serde_json::to_string(manifest)?;
        let status = match manifest.status {
            RunStatus::Complete => "complete",
            RunStatus::Partial => "partial",
        };
        let txn = db.begin().await?;
        GenerationManifest::delete_many().exec(&txn).await?;
        let am = ManifestActiveModel {
            id: NotSet,
            generated_at: Set(manifest.generation_date.to_rfc3339()),
            status: Set(status.to_string()),
            failed_table: Set(manifest.failed_table.clone()),
            manifest_json: Set(body),
        };
        am.insert(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn latest(db: &DatabaseConnection) -> Result<Option<Manifest>, StorageError> {
        let row = GenerationManifest::find()
            .order_by_desc(ManifestColumn::Id)
            .one(db)
            .await?;
        match row {
            Some(m) => Ok(Some(serde_json::from_str(&m.manifest_json)?)),
            None => Ok(None),
        }
    }
}
