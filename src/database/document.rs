use std::ffi::OsString;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::database::error::StoreError;
use crate::types::Operation;

/// A whole-file JSON document.
///
/// Every read decodes the full file and every write re-encodes the full
/// document. Writes go to a sibling temp file that is renamed over the target,
/// so a concurrent reader sees either the previous or the next document.
/// Mutations are serialised through `write_lock`; readers never take it.
pub struct JsonDocument<D> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> D>,
}

impl<D> JsonDocument<D>
where
    D: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `empty` if the file does not exist yet. Returns true when a file was created.
    pub async fn ensure_exists(&self, empty: &D) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;

        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        if exists {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }

        self.persist(empty).await?;
        info!("Initialized empty document at {}", self.path.display());
        Ok(true)
    }

    /// Load and decode the full document
    pub async fn load(&self) -> Result<D, StoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Run one load -> mutate -> persist cycle under the write lock.
    ///
    /// If `mutate` fails nothing is written.
    pub async fn mutate<T, F>(&self, operation: Operation, mutate: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut D) -> Result<T, StoreError>,
    {
        debug_assert!(operation.is_mutation());
        let _guard = self.write_lock.lock().await;

        let mut document = self.load().await?;
        let output = mutate(&mut document)?;
        self.persist(&document).await?;

        debug!(%operation, path = %self.path.display(), "Document persisted");
        Ok(output)
    }

    async fn persist(&self, document: &D) -> Result<(), StoreError> {
        let encoded = serde_json::to_vec_pretty(document).map_err(StoreError::Encode)?;

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, &encoded)
            .await
            .map_err(|source| self.io_error(source))?;
        if let Err(source) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(self.io_error(source));
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
