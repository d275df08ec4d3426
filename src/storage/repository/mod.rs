pub mod manifest_repo;
pub mod table_repo;

pub use manifest_repo::ManifestRepository;
pub use table_repo::TableRepository;
