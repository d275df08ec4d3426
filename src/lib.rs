pub mod cli;
pub mod config;
pub mod generate;
pub mod manifest;
pub mod storage;

pub use config::{GeneratorConfig, StoreKind, TableCounts};
pub use generate::{BusinessDataGenerator, GenerateError, GeneratedData, GeneratorService};
pub use manifest::{Manifest, RunStatus};
pub use storage::{AnyStore, CsvStore, SqliteStore, StorageError, TableStore};
