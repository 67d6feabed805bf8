use crate::domain::{Repository, StorageKey};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Stores each key as `<dir>/<key>.json`.
pub struct JsonFileRepository {
    // ---
    dir: PathBuf,
}

impl JsonFileRepository {
    // ---
    /// Creates the storage directory if needed.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        // ---
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create storage dir {}", dir.display()))?;

        tracing::debug!("Opened client storage at {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        // ---
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

#[async_trait::async_trait]
impl Repository for JsonFileRepository {
    // ---
    async fn read_raw(&self, key: StorageKey) -> Result<Option<String>> {
        // ---
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("Failed to read {key}")),
        }
    }

    async fn write_raw(&self, key: StorageKey, value: String) -> Result<()> {
        // ---
        // Replaced via rename; readers never see a partial value.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, value)
            .await
            .with_context(|| format!("Failed to write {key}"))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("Failed to replace {key}"))?;

        Ok(())
    }
}
