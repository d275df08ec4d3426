use crate::storage::StorageError;

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("distribution rejected parameters: {0}")]
    Distribution(String),
    #[error("failed to write table {table}: {source}")]
    StorageWrite {
        table: String,
        #[source]
        source: StorageError,
    },
}

impl GenerateError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        GenerateError::InvalidArgument(msg.into())
    }

    pub fn storage(table: impl Into<String>, source: StorageError) -> Self {
        GenerateError::StorageWrite {
            table: table.into(),
            source,
        }
    }

    /// 写入失败的表名（仅 StorageWrite）
    pub fn failed_table(&self) -> Option<&str> {
        match self {
            GenerateError::StorageWrite { table, .. } => Some(table),
            _ => None,
        }
    }
}

/// 负数行数直接拒绝，不做任何部分生成
pub fn checked_count(table: &str, count: i64) -> Result<usize, GenerateError> {
    usize::try_from(count)
        .map_err(|_| GenerateError::invalid(format!("{table} count must be >= 0, got {count}")))
}
