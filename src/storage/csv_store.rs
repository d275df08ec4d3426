use crate::generate::model::{Dataset, DatasetKind, Record};
use crate::manifest::Manifest;
use crate::storage::{StorageError, TableStore};
use async_trait::async_trait;
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "data_summary.json";

/// 每张表一个 CSV，外加 data_summary.json；输出目录必须已存在
#[derive(Clone, Debug)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn table_path(&self, kind: DatasetKind) -> PathBuf {
        self.dir.join(format!("{}.csv", kind.table_name()))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    fn write_rows<T: Record>(&self, kind: DatasetKind, rows: &[T]) -> Result<(), StorageError> {
        let path = self.table_path(kind);
        replace_file(&path, |tmp| Self::write_csv(tmp, rows))?;
        info!("已写入 {} ({} 行)", path.display(), rows.len());
        Ok(())
    }

    fn write_csv<T: Record>(path: &Path, rows: &[T]) -> Result<(), StorageError> {
        let mut wtr = csv::Writer::from_path(path)?;
        if rows.is_empty() {
            // 空表也保留表头
            wtr.write_record(T::COLUMNS)?;
        }
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// 先写同目录下的 `<name>.tmp`，成功后 rename 覆盖目标；失败时删掉临时文件，目标保持原样
fn replace_file<F>(path: &Path, write: F) -> Result<(), StorageError>
where
    F: FnOnce(&Path) -> Result<(), StorageError>,
{
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    let res = write(&tmp).and_then(|()| fs::rename(&tmp, path).map_err(StorageError::from));
    if res.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    res
}

#[async_trait]
impl TableStore for CsvStore {
    fn describe(&self) -> String {
        format!("csv:{}", self.dir.display())
    }

    async fn write_table(&self, dataset: &Dataset<'_>) -> Result<(), StorageError> {
        let kind = dataset.kind();
        match *dataset {
            Dataset::Customers(rows) => self.write_rows(kind, rows),
            Dataset::Sales(rows) => self.write_rows(kind, rows),
            Dataset::Employees(rows) => self.write_rows(kind, rows),
            Dataset::Financial(rows) => self.write_rows(kind, rows),
            Dataset::Operations(rows) => self.write_rows(kind, rows),
        }
    }

    async fn clear_table(&self, kind: DatasetKind) -> Result<(), StorageError> {
        let path = self.table_path(kind);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("已删除旧表 {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_manifest(&self, manifest: &Manifest) -> Result<(), StorageError> {
        let path = self.manifest_path();
        let body = serde_json::to_string_pretty(manifest)?;
        replace_file(&path, |tmp| fs::write(tmp, &body).map_err(StorageError::from))?;
        info!("已写入清单 {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::model::FinancialPeriod;
    use chrono::{TimeZone, Utc};

    fn manifest() -> Manifest {
        Manifest::new(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(), 42)
    }

    #[tokio::test]
    async fn empty_table_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        let rows: Vec<FinancialPeriod> = Vec::new();
        store.write_table(&Dataset::Financial(&rows)).await.unwrap();

        let mut rdr = csv::Reader::from_path(store.table_path(DatasetKind::Financial)).unwrap();
        let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, FinancialPeriod::COLUMNS);
        assert_eq!(rdr.records().count(), 0);
    }

    #[tokio::test]
    async fn missing_directory_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("does-not-exist"));
        let err = store.write_table(&Dataset::Operations(&[])).await.unwrap_err();
        assert!(matches!(err, StorageError::Csv(_) | StorageError::Io(_)));
    }

    #[tokio::test]
    async fn manifest_is_replaced_without_leftover_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        fs::write(store.manifest_path(), "stale").unwrap();
        store.write_manifest(&manifest()).await.unwrap();

        let body = fs::read_to_string(store.manifest_path()).unwrap();
        let back: Manifest = serde_json::from_str(&body).unwrap();
        assert_eq!(back, manifest());
        assert!(!dir.path().join("data_summary.json.tmp").exists());
    }

    #[tokio::test]
    async fn failed_manifest_write_cleans_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        fs::create_dir(store.manifest_path()).unwrap();
        assert!(store.write_manifest(&manifest()).await.is_err());
        assert!(store.manifest_path().is_dir());
        assert!(!dir.path().join("data_summary.json.tmp").exists());
    }

    #[tokio::test]
    async fn clear_table_removes_file_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        store.write_table(&Dataset::Operations(&[])).await.unwrap();
        assert!(store.table_path(DatasetKind::Operations).exists());

        store.clear_table(DatasetKind::Operations).await.unwrap();
        assert!(!store.table_path(DatasetKind::Operations).exists());
        store.clear_table(DatasetKind::Operations).await.unwrap();
    }
}
