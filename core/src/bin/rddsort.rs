//! Sorted-words driver
//!
//! Distributes a fixed word list, collects it back, sorts it and prints the
//! result on stdout. Any failure ends the process with a non-zero status.

use anyhow::Context;
use clap::Parser;
use rddsort_core::job::{self, DriverOutput, JobReference};
use rddsort_core::logging::init_logging;
use rddsort_core::JobConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = JobConfig::parse();
    config.validate().context("invalid configuration")?;
    init_logging(config.max_log_level()?);

    info!("Starting {}", config.app_name);
    let report = job::run(&config).context("sorted-words job failed")?;
    let text = report.driver_output(config.json)?;
    println!("{}", text);

    if let Some(backend) = config.storage_backend()? {
        let output = DriverOutput::open(backend, &report.app_name)?;
        output
            .publish(&JobReference::new(report.job_id.clone()), &text)
            .await
            .context("failed to publish driver output")?;
    }

    info!("Job {} finished", report.job_id);
    Ok(())
}
