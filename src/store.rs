// Raw report spool: fire-and-forget persistence of each run's original JSON.
// Layout matches what the archive reader consumes (timestamped *.json files,
// lexical order = chronological order).

use std::future::Future;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Upload seam for raw reports. The live loop never depends on success;
/// failures are logged at the call site and dropped.
pub trait ArchiveStore: Send + Sync {
    fn put(&self, key: &str, raw: &[u8]) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Filename key for one run's raw report. Timestamp-prefixed so a directory
/// listing sorts chronologically.
pub fn report_key(start: DateTime<Utc>) -> String {
    format!("{}.json", start.format("%Y-%m-%d %H:%M:%S%.6f"))
}

/// Writes raw reports into a spool directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsArchiveStore {
    dir: PathBuf,
}

impl FsArchiveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArchiveStore for FsArchiveStore {
    async fn put(&self, key: &str, raw: &[u8]) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(key), raw).await?;
        Ok(())
    }
}
