use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::{error, info, warn};
use obsnet_core::{file_fingerprint, FileFingerprint};
use tokio::sync::Mutex;

use super::index::StationIndex;
use super::loader::{self, LoadError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to load stations: {0}")]
    Load(#[from] LoadError),
    #[error("Failed to read workbook {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Station loader task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// One immutable load of the workbook
#[derive(Debug)]
pub struct Snapshot {
    pub index: StationIndex,
    pub fingerprint: FileFingerprint,
}

impl Snapshot {
    pub fn new(index: StationIndex, fingerprint: FileFingerprint) -> Self {
        Self { index, fingerprint }
    }
}

#[async_trait]
pub trait StationData: Send + Sync {
    /// Current snapshot, rebuilt first if the workbook changed on disk
    async fn snapshot(&self) -> Result<Arc<Snapshot>, Error>;
    /// Rebuild from the workbook unconditionally
    async fn reload(&self) -> Result<Arc<Snapshot>, Error>;
    /// The workbook exactly as it sits on disk
    async fn workbook_bytes(&self) -> Result<Vec<u8>, Error>;
}

/// Workbook-backed station data shared by every session
///
/// Readers clone the `Arc<Snapshot>` and never see a half-built table; a
/// rebuild swaps the pointer once it is complete.
pub struct StationStore {
    path: PathBuf,
    current: RwLock<Arc<Snapshot>>,
    reloading: Mutex<()>,
}

impl StationStore {
    /// Load the workbook; failing here is fatal for startup
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let snapshot = build_snapshot(path.clone()).await?;
        Ok(Self {
            path,
            current: RwLock::new(Arc::new(snapshot)),
            reloading: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn current(&self) -> Arc<Snapshot> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace(&self, snapshot: Arc<Snapshot>) {
        match self.current.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }

    async fn rebuild(&self) -> Result<Arc<Snapshot>, Error> {
        let snapshot = Arc::new(build_snapshot(self.path.clone()).await?);
        info!(
            "station data reloaded: {} stations, {} bytes",
            snapshot.index.len(),
            snapshot.fingerprint.len
        );
        self.replace(snapshot.clone());
        Ok(snapshot)
    }
}

async fn build_snapshot(path: PathBuf) -> Result<Snapshot, Error> {
    tokio::task::spawn_blocking(move || -> Result<Snapshot, Error> {
        // Fingerprint first so a write during the load triggers another one
        let fingerprint = file_fingerprint(&path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => Error::Load(LoadError::NotFound(path.clone())),
            _ => Error::Io {
                path: path.clone(),
                source,
            },
        })?;
        let table = loader::load(&path)?;
        Ok(Snapshot::new(StationIndex::new(table), fingerprint))
    })
    .await?
}

#[async_trait]
impl StationData for StationStore {
    async fn snapshot(&self) -> Result<Arc<Snapshot>, Error> {
        let cached = self.current();
        let on_disk = match file_fingerprint(&self.path) {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                warn!(
                    "cannot stat workbook {}, serving cached stations: {}",
                    self.path.display(),
                    e
                );
                return Ok(cached);
            }
        };
        if on_disk == cached.fingerprint {
            return Ok(cached);
        }

        let _guard = self.reloading.lock().await;
        // Another request may have finished the rebuild while we waited
        let cached = self.current();
        if on_disk == cached.fingerprint {
            return Ok(cached);
        }

        match self.rebuild().await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                error!("workbook changed but reload failed, keeping previous data: {}", e);
                Ok(cached)
            }
        }
    }

    async fn reload(&self) -> Result<Arc<Snapshot>, Error> {
        let _guard = self.reloading.lock().await;
        self.rebuild().await
    }

    async fn workbook_bytes(&self) -> Result<Vec<u8>, Error> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| Error::Io {
                path: self.path.clone(),
                source,
            })
    }
}
