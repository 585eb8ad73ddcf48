//! FlowContext - execution context for distributed collections
//!
//! The context is the driver's handle to the execution layer. It owns the
//! scheduler that runs partition tasks and decides how many partitions a
//! collection gets when the caller does not say.

use crate::rdd::DistributedRdd;
use crate::scheduler::LocalScheduler;
use crate::traits::{Data, RddError, RddResult};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Configuration for a [`FlowContext`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    /// Partitions used by `parallelize` when no count is given
    pub default_parallelism: usize,
    /// Size of a dedicated task pool; `None` uses rayon's global pool
    pub num_threads: Option<usize>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            default_parallelism: num_cpus::get(),
            num_threads: None,
        }
    }
}

/// FlowContext manages distributed collections for one application
#[derive(Debug)]
pub struct FlowContext {
    app_name: String,
    context_id: String,
    config: ContextConfig,
    scheduler: Arc<LocalScheduler>,
}

impl FlowContext {
    /// Create a new FlowContext with the given application name and default configuration
    pub fn new(app_name: impl Into<String>) -> Self {
        let app_name = app_name.into();
        Self {
            context_id: new_context_id(&app_name),
            app_name,
            config: ContextConfig::default(),
            scheduler: Arc::new(LocalScheduler::default()),
        }
    }

    /// Create a new FlowContext with an explicit configuration
    pub fn with_config(app_name: impl Into<String>, config: ContextConfig) -> RddResult<Self> {
        let app_name = app_name.into();

        if config.default_parallelism == 0 {
            return Err(RddError::ContextError(
                "default_parallelism must be at least 1".to_string(),
            ));
        }

        let scheduler = match config.num_threads {
            Some(threads) => LocalScheduler::new(threads)?,
            None => LocalScheduler::with_default_threads(),
        };

        let context = Self {
            context_id: new_context_id(&app_name),
            app_name,
            config,
            scheduler: Arc::new(scheduler),
        };
        info!(
            "Created context {} (default parallelism {}, {} task threads)",
            context.context_id,
            context.config.default_parallelism,
            context.scheduler.num_threads()
        );
        Ok(context)
    }

    /// Get the application name
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Unique id of this context instance
    pub fn context_id(&self) -> &str {
        &self.context_id
    }

    /// Partitions used by [`FlowContext::parallelize`]
    pub fn default_parallelism(&self) -> usize {
        self.config.default_parallelism
    }

    /// Number of threads running partition tasks
    pub fn num_threads(&self) -> usize {
        self.scheduler.num_threads()
    }

    /// Create an RDD from a vector of data using the default parallelism
    pub fn parallelize<T: Data>(&self, data: Vec<T>) -> DistributedRdd<T> {
        self.parallelize_with_partitions(data, self.config.default_parallelism)
    }

    /// Create an RDD from a vector with specified number of partitions
    pub fn parallelize_with_partitions<T: Data>(
        &self,
        data: Vec<T>,
        num_partitions: usize,
    ) -> DistributedRdd<T> {
        DistributedRdd::with_scheduler(data, num_partitions, Arc::clone(&self.scheduler))
    }
}

impl Default for FlowContext {
    fn default() -> Self {
        Self::new("rddsort-app")
    }
}

fn new_context_id(app_name: &str) -> String {
    format!("{}-context-{}", app_name, Uuid::new_v4())
}
