//! Object storage for job artifacts.
//!
//! Jobs publish their driver output as plain objects. This module hides the
//! concrete backend behind the [`ArtifactStore`] trait and builds the backend
//! with the `object_store` crate.

use async_trait::async_trait;
use object_store::{ObjectStore, PutPayload, memory::InMemory, path::Path as ObjectPath};
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::error::{CommonError, Result};

/// Async store for named job artifacts.
///
/// Keys are `/`-separated object paths such as
/// `rddsort/jobs/rddsort-job-1700000000/driveroutput.000000000`.
#[async_trait]
pub trait ArtifactStore: Send + Sync + Debug {
    /// Write `contents` to `key`, replacing any previous object.
    async fn put(&self, key: &str, contents: Vec<u8>) -> Result<()>;

    /// Read the object at `key`, or `None` if it does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Check whether an object exists at `key`.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// A URI-like description of where objects end up, for logging.
    fn location(&self) -> String;

    /// Operation counters for this store.
    fn stats(&self) -> StorageStats;
}

/// Storage statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageStats {
    pub read_count: u64,
    pub write_count: u64,
    pub error_count: u64,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Default)]
pub enum StorageBackend {
    /// In-memory storage for testing and development.
    #[default]
    Memory,
    /// Local filesystem storage rooted at `root_path`. The directory is created if missing.
    LocalFileSystem { root_path: PathBuf },
    /// Google Cloud Storage, credentials taken from the environment unless a
    /// service account file is given.
    #[cfg(feature = "gcp")]
    Gcs {
        bucket: String,
        service_account_path: Option<String>,
    },
}

/// Builder for creating artifact stores.
#[derive(Debug, Default)]
pub struct StorageBuilder {
    backend: StorageBackend,
    key_prefix: Option<String>,
}

impl StorageBuilder {
    /// Create a new storage builder with the in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage backend.
    pub fn backend(mut self, backend: StorageBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Set a key prefix for all operations.
    pub fn key_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Build a store with the configured backend.
    pub fn build(self) -> Result<Arc<dyn ArtifactStore>> {
        let store = ObjectStoreArtifacts::new(self.backend, self.key_prefix)?;
        Ok(Arc::new(store))
    }
}

#[derive(Debug, Default)]
struct InternalStorageStats {
    reads: AtomicU64,
    writes: AtomicU64,
    errors: AtomicU64,
}

impl InternalStorageStats {
    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> StorageStats {
        StorageStats {
            read_count: self.reads.load(Ordering::Acquire),
            write_count: self.writes.load(Ordering::Acquire),
            error_count: self.errors.load(Ordering::Acquire),
        }
    }
}

/// `object_store`-backed implementation of [`ArtifactStore`].
struct ObjectStoreArtifacts {
    store: Arc<dyn ObjectStore>,
    location: String,
    key_prefix: Option<String>,
    stats: InternalStorageStats,
}

impl Debug for ObjectStoreArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreArtifacts")
            .field("location", &self.location)
            .field("key_prefix", &self.key_prefix)
            .field("stats", &self.stats)
            .finish()
    }
}

impl ObjectStoreArtifacts {
    fn new(backend: StorageBackend, key_prefix: Option<String>) -> Result<Self> {
        let (store, location): (Arc<dyn ObjectStore>, String) = match backend {
            StorageBackend::Memory => (Arc::new(InMemory::new()), "memory://".to_string()),
            StorageBackend::LocalFileSystem { root_path } => {
                std::fs::create_dir_all(&root_path).map_err(|e| {
                    CommonError::io_error_with_source(
                        format!("Failed to create output directory {}", root_path.display()),
                        e,
                    )
                })?;
                let fs = object_store::local::LocalFileSystem::new_with_prefix(&root_path)
                    .map_err(|e| {
                        CommonError::storage_error_with_source(
                            "Failed to create local filesystem storage",
                            e,
                        )
                    })?;
                (Arc::new(fs), format!("file://{}", root_path.display()))
            }
            #[cfg(feature = "gcp")]
            StorageBackend::Gcs {
                bucket,
                service_account_path,
            } => {
                let mut builder = object_store::gcp::GoogleCloudStorageBuilder::from_env()
                    .with_bucket_name(&bucket);
                if let Some(path) = service_account_path {
                    builder = builder.with_service_account_path(path);
                }
                let gcs = builder.build().map_err(|e| {
                    CommonError::storage_error_with_source(
                        format!("Failed to create GCS storage for bucket {}", bucket),
                        e,
                    )
                })?;
                (Arc::new(gcs), format!("gs://{}", bucket))
            }
        };

        Ok(Self {
            store,
            location,
            key_prefix,
            stats: InternalStorageStats::default(),
        })
    }

    fn key_to_path(&self, key: &str) -> Result<ObjectPath> {
        let full = match &self.key_prefix {
            Some(prefix) => format!("{}/{}", prefix.trim_end_matches('/'), key),
            None => key.to_string(),
        };
        ObjectPath::parse(&full).map_err(|e| {
            CommonError::storage_error_with_source(format!("Invalid object key: {}", full), e)
        })
    }
}

#[async_trait]
impl ArtifactStore for ObjectStoreArtifacts {
    async fn put(&self, key: &str, contents: Vec<u8>) -> Result<()> {
        let path = self.key_to_path(key)?;
        let size = contents.len();

        match self.store.put(&path, PutPayload::from(contents)).await {
            Ok(_) => {
                self.stats.record_write();
                debug!("Wrote {} bytes to {}/{}", size, self.location, path);
                Ok(())
            }
            Err(e) => {
                self.stats.record_error();
                Err(e.into())
            }
        }
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_to_path(key)?;

        match self.store.get(&path).await {
            Ok(result) => {
                self.stats.record_read();
                let bytes = result.bytes().await?;
                Ok(Some(bytes.to_vec()))
            }
            Err(object_store::Error::NotFound { .. }) => {
                self.stats.record_read();
                Ok(None)
            }
            Err(e) => {
                self.stats.record_error();
                Err(e.into())
            }
        }
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.key_to_path(key)?;

        match self.store.head(&path).await {
            Ok(_) => {
                self.stats.record_read();
                Ok(true)
            }
            Err(object_store::Error::NotFound { .. }) => {
                self.stats.record_read();
                Ok(false)
            }
            Err(e) => {
                self.stats.record_error();
                Err(e.into())
            }
        }
    }

    fn location(&self) -> String {
        match &self.key_prefix {
            Some(prefix) if self.location.ends_with('/') => format!("{}{}", self.location, prefix),
            Some(prefix) => format!("{}/{}", self.location, prefix),
            None => self.location.clone(),
        }
    }

    fn stats(&self) -> StorageStats {
        self.stats.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_put_get() {
        let store = StorageBuilder::new().build().unwrap();

        store.put("jobs/a/out", b"hello".to_vec()).await.unwrap();
        let value = store.get("jobs/a/out").await.unwrap();

        assert_eq!(value, Some(b"hello".to_vec()));
        assert!(store.exists("jobs/a/out").await.unwrap());
        assert_eq!(store.location(), "memory://");
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let store = StorageBuilder::new().build().unwrap();

        assert_eq!(store.get("nope").await.unwrap(), None);
        assert!(!store.exists("nope").await.unwrap());

        let stats = store.stats();
        assert_eq!(stats.read_count, 2);
        assert_eq!(stats.error_count, 0);
    }

    #[tokio::test]
    async fn test_local_filesystem_with_prefix() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("out");
        let store = StorageBuilder::new()
            .backend(StorageBackend::LocalFileSystem {
                root_path: root.clone(),
            })
            .key_prefix("app")
            .build()
            .unwrap();

        store.put("jobs/j1/output.txt", b"data".to_vec()).await.unwrap();

        let on_disk = std::fs::read(root.join("app/jobs/j1/output.txt")).unwrap();
        assert_eq!(on_disk, b"data");
        assert_eq!(store.stats().write_count, 1);
        assert!(store.location().ends_with("/app"));
    }

    #[tokio::test]
    async fn test_invalid_key_is_rejected() {
        let store = StorageBuilder::new().build().unwrap();

        let err = store.put("a/../b", Vec::new()).await.unwrap_err();
        assert!(matches!(err, CommonError::StorageError { .. }));
    }
}
