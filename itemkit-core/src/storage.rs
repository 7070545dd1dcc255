//! Flat-file record store keyed by `(namespace, context, data id)`.
//!
//! Every record lives at `<root>/<namespace>/<context><data_id>`. The context
//! and the decimal id are joined with no separator, so `("1", 23)` and
//! `("12", 3)` address the same file. Callers pick contexts that cannot
//! collide that way.

use crate::config::StoreConfig;
use fastrand::Rng;
use log::{debug, info};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type DataId = u32;

/// Generated ids fall in `0..DATA_ID_LIMIT`. Nothing checks them against
/// records already on disk.
pub const DATA_ID_LIMIT: DataId = 1_000_000;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StorageError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[derive(Debug)]
pub struct DataStore {
    root: PathBuf,
    rng: Rng,
}

/// A clone draws ids from a fresh generator so it never replays the
/// original's sequence.
impl Clone for DataStore {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            rng: Rng::new(),
        }
    }
}

/// Leading separators would make `Path::join` replace the root.
fn relative_segment(segment: &str) -> &str {
    segment.trim_start_matches(['/', '\\'])
}

impl DataStore {
    pub fn new(config: StoreConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        Self {
            root: config.root,
            rng,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn generate_id(&mut self) -> DataId {
        self.rng.u32(0..DATA_ID_LIMIT)
    }

    pub fn namespace_dir(&self, namespace: &str) -> PathBuf {
        self.root.join(relative_segment(namespace))
    }

    pub fn record_path(&self, namespace: &str, data_id: DataId, context: Option<&str>) -> PathBuf {
        let file_name = format!("{}{}", context.unwrap_or(""), data_id);
        self.namespace_dir(namespace)
            .join(relative_segment(&file_name))
    }

    pub fn store<T: Serialize + ?Sized>(
        &self,
        namespace: &str,
        data_id: DataId,
        payload: &T,
        context: Option<&str>,
    ) -> Result<(), StorageError> {
        let dir = self.namespace_dir(namespace);
        fs::create_dir_all(&dir).map_err(|err| StorageError::io(&dir, err))?;

        let encoded = serde_json::to_vec(payload)?;
        let path = self.record_path(namespace, data_id, context);
        fs::write(&path, encoded).map_err(|err| StorageError::io(&path, err))?;

        info!("stored record {}", path.display());
        Ok(())
    }

    /// Missing, unreadable and undecodable records all come back as `None`.
    pub fn load<T: DeserializeOwned>(
        &self,
        namespace: &str,
        data_id: DataId,
        context: Option<&str>,
    ) -> Option<T> {
        let path = self.record_path(namespace, data_id, context);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("no record at {}: {}", path.display(), err);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("undecodable record at {}: {}", path.display(), err);
                None
            }
        }
    }

    pub fn remove(
        &self,
        namespace: &str,
        data_id: DataId,
        context: Option<&str>,
    ) -> Result<(), StorageError> {
        let path = self.record_path(namespace, data_id, context);
        fs::remove_file(&path).map_err(|err| StorageError::io(&path, err))?;
        info!("removed record {}", path.display());
        Ok(())
    }

    pub fn exists(&self, namespace: &str, data_id: DataId, context: Option<&str>) -> bool {
        self.record_path(namespace, data_id, context).is_file()
    }
}
