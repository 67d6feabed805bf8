mod json_file_repository;
mod memory_repository;


pub use json_file_repository::JsonFileRepository;
pub use memory_repository::MemoryRepository;

use crate::domain::RepositoryPtr;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// Creates a file-backed repository rooted at `dir`.
pub async fn create_file_repository(dir: impl AsRef<Path>) -> Result<RepositoryPtr> {
    // ---
    Ok(Arc::new(JsonFileRepository::open(dir).await?))
}

/// Creates an empty in-memory repository.
pub fn create_memory_repository() -> RepositoryPtr {
    // ---
    Arc::new(MemoryRepository::new())
}
