//! Command-line and environment configuration for the driver.
//!
//! Every setting has a default, so the driver runs with no arguments at all.

use crate::context::ContextConfig;
use clap::Parser;
use rddsort_common::{CommonError, Result, StorageBackend};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

/// Driver configuration
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "rddsort",
    version,
    about = "Distribute a fixed word list, collect it back, sort it and print it"
)]
pub struct JobConfig {
    /// Application name, used for the context id, job ids and output paths
    #[arg(long, env = "RDDSORT_APP_NAME", default_value = "rddsort")]
    pub app_name: String,

    /// Number of partitions to distribute the words into (default: CPU count)
    #[arg(long, env = "RDDSORT_PARTITIONS")]
    pub partitions: Option<usize>,

    /// Size of a dedicated task thread pool (default: shared global pool)
    #[arg(long, env = "RDDSORT_THREADS")]
    pub threads: Option<usize>,

    /// Maximum log level written to stderr
    #[arg(long, env = "RDDSORT_LOG", default_value = "info")]
    pub log_level: String,

    /// Print the job report as JSON instead of the plain list
    #[arg(long)]
    pub json: bool,

    /// Also publish the driver output under this local directory
    #[arg(long, env = "RDDSORT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also publish the driver output to this Cloud Storage bucket (needs the `gcp` feature)
    #[arg(long, env = "RDDSORT_GCS_BUCKET", conflicts_with = "output_dir")]
    pub gcs_bucket: Option<String>,

    /// Job id to report and publish under (default: `<app-name>-job-<unix seconds>`)
    #[arg(long, env = "RDDSORT_JOB_ID")]
    pub job_id: Option<String>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            app_name: "rddsort".to_string(),
            partitions: None,
            threads: None,
            log_level: "info".to_string(),
            json: false,
            output_dir: None,
            gcs_bucket: None,
            job_id: None,
        }
    }
}

impl JobConfig {
    /// Check values clap cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(CommonError::configuration_error("app name must not be empty"));
        }
        if self.app_name.contains('/') {
            return Err(CommonError::configuration_error(format!(
                "app name must not contain '/': {}",
                self.app_name
            )));
        }
        if self.partitions == Some(0) {
            return Err(CommonError::configuration_error(
                "partitions must be at least 1",
            ));
        }
        if self.threads == Some(0) {
            return Err(CommonError::configuration_error("threads must be at least 1"));
        }
        if let Some(job_id) = &self.job_id {
            if job_id.is_empty() || job_id.contains('/') {
                return Err(CommonError::configuration_error(format!(
                    "job id must be non-empty and must not contain '/': {:?}",
                    job_id
                )));
            }
        }
        self.max_log_level()?;
        self.storage_backend()?;
        Ok(())
    }

    /// Parsed `log_level`.
    pub fn max_log_level(&self) -> Result<Level> {
        Level::from_str(&self.log_level).map_err(|e| {
            CommonError::configuration_error_with_source(
                format!("invalid log level {:?}", self.log_level),
                e,
            )
        })
    }

    /// Context settings derived from this configuration.
    ///
    /// An explicit partition count also becomes the context's default parallelism.
    pub fn context_config(&self) -> ContextConfig {
        let defaults = ContextConfig::default();
        ContextConfig {
            default_parallelism: self.partitions.unwrap_or(defaults.default_parallelism),
            num_threads: self.threads,
        }
    }

    /// Where to publish the driver output, if anywhere.
    pub fn storage_backend(&self) -> Result<Option<StorageBackend>> {
        if let Some(bucket) = &self.gcs_bucket {
            return gcs_backend(bucket).map(Some);
        }

        Ok(self
            .output_dir
            .as_ref()
            .map(|root_path| StorageBackend::LocalFileSystem {
                root_path: root_path.clone(),
            }))
    }
}

#[cfg(feature = "gcp")]
fn gcs_backend(bucket: &str) -> Result<StorageBackend> {
    Ok(StorageBackend::Gcs {
        bucket: bucket.to_string(),
        service_account_path: std::env::var("GOOGLE_APPLICATION_CREDENTIALS").ok(),
    })
}

#[cfg(not(feature = "gcp"))]
fn gcs_backend(bucket: &str) -> Result<StorageBackend> {
    Err(CommonError::configuration_error(format!(
        "cannot publish to gs://{}: built without the `gcp` feature",
        bucket
    )))
}
