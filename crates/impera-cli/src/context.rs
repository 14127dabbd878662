use impera_core::{AppConfig, ImperaResult};
use impera_store::{DataSnapshot, MemoryStore};
use std::path::PathBuf;
use std::sync::Arc;

/// Data file + seeded store for one CLI invocation. The whole snapshot is
/// loaded into a `MemoryStore`, the command runs against it, and the
/// snapshot is written back atomically.
pub struct CliContext {
    pub store: Arc<MemoryStore>,
    pub config: AppConfig,
    path: PathBuf,
}

impl CliContext {
    pub async fn load(file_path: &str, config: AppConfig) -> ImperaResult<Self> {
        let path = PathBuf::from(file_path);
        let store = if path.exists() {
            let bytes = tokio::fs::read(&path).await?;
            Arc::new(MemoryStore::from_snapshot(DataSnapshot::from_json_bytes(
                &bytes,
            )?))
        } else {
            Arc::new(MemoryStore::new())
        };
        Ok(Self {
            store,
            config,
            path,
        })
    }

    pub async fn save(&self) -> ImperaResult<()> {
        let bytes = self.store.snapshot().to_json_bytes()?;

        // Write to a sibling temp file and rename over the target, so a
        // crash mid-write never leaves a truncated data file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::info!("Saved {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}
