//! The sorted-words driver job.
//!
//! Distributes a fixed list of words, collects them back to the driver,
//! sorts them and renders the result for standard output.

pub mod output;

use crate::config::JobConfig;
use crate::context::FlowContext;
use crate::traits::RddResult;
use serde::{Deserialize, Serialize};
use tracing::info;

pub use output::{DRIVER_OUTPUT_FILE, DriverOutput, JobReference};

/// The words the job distributes, in their original order.
pub const SAMPLE_WORDS: [&str; 5] = ["Hello,", "world!", "dog", "elephant", "panther"];

/// [`SAMPLE_WORDS`] as owned strings.
pub fn sample_words() -> Vec<String> {
    SAMPLE_WORDS.iter().map(|word| word.to_string()).collect()
}

/// Parallelize `words`, collect them and sort the result.
///
/// With `partitions == None` the context's default parallelism is used.
/// Sorting is `Ord for String`, i.e. byte-wise lexicographic, so uppercase
/// ASCII letters sort before lowercase ones.
pub fn collect_sorted(
    context: &FlowContext,
    words: Vec<String>,
    partitions: Option<usize>,
) -> RddResult<Vec<String>> {
    let rdd = match partitions {
        Some(n) => context.parallelize_with_partitions(words, n),
        None => context.parallelize(words),
    };

    let mut collected = rdd.collect()?;
    collected.sort();
    Ok(collected)
}

/// Human-readable rendering of a word list: `["a", "b"]`.
pub fn render(words: &[String]) -> String {
    format!("{:?}", words)
}

/// Everything one run of the job produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReport {
    pub job_id: String,
    pub app_name: String,
    pub partitions: usize,
    pub words: Vec<String>,
}

impl JobReport {
    /// The text written to standard output for this report.
    pub fn driver_output(&self, json: bool) -> serde_json::Result<String> {
        if json {
            serde_json::to_string(self)
        } else {
            Ok(render(&self.words))
        }
    }
}

/// Run the job end to end with `config`.
///
/// Context construction and collection errors are returned as they are; the
/// job does not retry.
pub fn run(config: &JobConfig) -> RddResult<JobReport> {
    let context_config = config.context_config();
    let partitions = context_config.default_parallelism;
    let context = FlowContext::with_config(config.app_name.clone(), context_config)?;

    let reference = match &config.job_id {
        Some(job_id) => JobReference::new(job_id.clone()),
        None => JobReference::generate(context.app_name()),
    };
    info!(
        "Running job {} in context {}",
        reference.job_id(),
        context.context_id()
    );

    let words = collect_sorted(&context, sample_words(), Some(partitions))?;

    Ok(JobReport {
        job_id: reference.job_id().to_string(),
        app_name: context.app_name().to_string(),
        partitions,
        words,
    })
}
