//! Job identity and published driver output.
//!
//! Managed cluster services keep what a driver printed as an object named
//! `jobs/<job id>/driveroutput.000000000` under a per-cluster prefix. The
//! driver can publish its own output at the same place so it can be read
//! back without the service.

use rddsort_common::{ArtifactStore, CommonError, Result, StorageBackend, StorageBuilder};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// Name of the first (and only) driver output chunk.
pub const DRIVER_OUTPUT_FILE: &str = "driveroutput.000000000";

/// Identifies one job run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReference {
    job_id: String,
}

impl JobReference {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }

    /// `<app_name>-job-<unix seconds>`
    pub fn generate(app_name: &str) -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self::new(format!("{}-job-{}", app_name, secs))
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Object key of the driver output for this job.
    pub fn driver_output_key(&self) -> String {
        format!("jobs/{}/{}", self.job_id, DRIVER_OUTPUT_FILE)
    }
}

/// Publishes and reads back driver output.
#[derive(Debug, Clone)]
pub struct DriverOutput {
    store: Arc<dyn ArtifactStore>,
}

impl DriverOutput {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    /// Build a store for `backend`, with all keys under `app_name`.
    pub fn open(backend: StorageBackend, app_name: &str) -> Result<Self> {
        let store = StorageBuilder::new()
            .backend(backend)
            .key_prefix(app_name)
            .build()?;
        Ok(Self::new(store))
    }

    /// Store `text` as the job's driver output and return where it went.
    pub async fn publish(&self, reference: &JobReference, text: &str) -> Result<String> {
        let key = reference.driver_output_key();
        let mut contents = text.as_bytes().to_vec();
        if !text.ends_with('\n') {
            contents.push(b'\n');
        }

        self.store.put(&key, contents).await?;
        let location = format!("{}/{}", self.store.location(), key);
        info!("Published driver output of {} to {}", reference.job_id(), location);
        Ok(location)
    }

    /// Read back the driver output of a job, if it was published.
    pub async fn fetch(&self, reference: &JobReference) -> Result<Option<String>> {
        match self.store.get(&reference.driver_output_key()).await? {
            Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
                CommonError::storage_error_with_source(
                    format!("Driver output of {} is not UTF-8", reference.job_id()),
                    e,
                )
            }),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generated_job_id() {
        let reference = JobReference::generate("words");
        let suffix = reference
            .job_id()
            .strip_prefix("words-job-")
            .expect("prefix");
        assert!(suffix.parse::<u64>().is_ok());
    }

    #[test]
    fn test_driver_output_key() {
        let reference = JobReference::new("j-1");
        assert_eq!(
            reference.driver_output_key(),
            "jobs/j-1/driveroutput.000000000"
        );
    }

    #[tokio::test]
    async fn test_publish_and_fetch_in_memory() {
        let output = DriverOutput::open(StorageBackend::Memory, "words").unwrap();
        let reference = JobReference::new("j-1");

        assert_eq!(output.fetch(&reference).await.unwrap(), None);

        let location = output.publish(&reference, "[\"dog\"]").await.unwrap();
        assert_eq!(location, "memory://words/jobs/j-1/driveroutput.000000000");
        assert_eq!(
            output.fetch(&reference).await.unwrap().as_deref(),
            Some("[\"dog\"]\n")
        );
    }

    #[tokio::test]
    async fn test_publish_to_local_directory() {
        let dir = TempDir::new().unwrap();
        let output = DriverOutput::open(
            StorageBackend::LocalFileSystem {
                root_path: dir.path().to_path_buf(),
            },
            "words",
        )
        .unwrap();
        let reference = JobReference::new("j-2");

        output.publish(&reference, "done\n").await.unwrap();

        let written =
            std::fs::read_to_string(dir.path().join("words/jobs/j-2/driveroutput.000000000"))
                .unwrap();
        assert_eq!(written, "done\n");
    }
}
