//! Bot data persistence: trait plus a JSON file backend.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use botframework_core::{BotDataMap, FrameworkError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

/// Durable storage of bot data across restarts.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Returns the stored bot data, or an empty map when nothing was stored yet.
    async fn load_bot_data(&self) -> Result<BotDataMap>;
    /// Replaces the stored bot data.
    async fn store_bot_data(&self, data: &BotDataMap) -> Result<()>;
}

#[derive(Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    bot_data: BotDataMap,
}

/// Stores bot data as JSON in a single file. Writes go to `<file>.tmp` and are renamed into place.
pub struct FilePersistence {
    filepath: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePersistence {
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.filepath.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl Persistence for FilePersistence {
    async fn load_bot_data(&self) -> Result<BotDataMap> {
        let contents = match tokio::fs::read(&self.filepath).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.filepath.display(), "No persistence file yet");
                return Ok(BotDataMap::new());
            }
            Err(e) => return Err(e.into()),
        };
        let state: PersistedState = serde_json::from_slice(&contents).map_err(|e| {
            FrameworkError::Persistence(format!(
                "Invalid persistence file {}: {}",
                self.filepath.display(),
                e
            ))
        })?;
        Ok(state.bot_data)
    }

    async fn store_bot_data(&self, data: &BotDataMap) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let json = serde_json::to_vec_pretty(&PersistedState {
            bot_data: data.clone(),
        })?;
        if let Some(parent) = self.filepath.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.filepath).await?;
        debug!(path = %self.filepath.display(), keys = data.len(), "Bot data persisted");
        Ok(())
    }
}
