use crate::models::Snapshot;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{error, warn};

/// Name the snapshot is stored under.
pub const STORAGE_KEY: &str = "fitnessData";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode snapshot: {0}")]
    Encode(serde_json::Error),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn default_data_path() -> PathBuf {
    PathBuf::from("data").join(format!("{STORAGE_KEY}.json"))
}

/// Reads the stored snapshot. `Ok(None)` means nothing has been stored yet.
pub async fn load_snapshot(path: &Path) -> Result<Option<Snapshot>, StorageError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| StorageError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Loads the snapshot, falling back to defaults when it is missing or
/// unreadable. An unparseable file is moved aside so the next write does
/// not destroy it.
pub async fn load_or_default(path: &Path) -> Snapshot {
    match load_snapshot(path).await {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => Snapshot::default(),
        Err(err @ StorageError::Parse { .. }) => {
            error!("{err}; starting from defaults");
            let aside = corrupt_path(path);
            if let Err(rename_err) = fs::rename(path, &aside).await {
                warn!("could not move {} aside: {rename_err}", path.display());
            } else {
                warn!("unreadable snapshot kept at {}", aside.display());
            }
            Snapshot::default()
        }
        Err(err) => {
            error!("{err}; starting from defaults");
            Snapshot::default()
        }
    }
}

/// Replaces the stored snapshot with `snapshot` in full. NaN and infinite
/// numbers are written as `null` and come back as 0.
pub async fn persist_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), StorageError> {
    let payload = serde_json::to_vec_pretty(snapshot).map_err(StorageError::Encode)?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, payload)
        .await
        .map_err(|source| StorageError::Write {
            path: temp_path.clone(),
            source,
        })?;
    fs::rename(&temp_path, path)
        .await
        .map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(())
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}
