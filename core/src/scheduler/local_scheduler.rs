//! Local Task Scheduler
//!
//! This module provides a local task scheduler that uses Rayon's thread pool
//! to execute partition tasks in parallel on a single machine.

use crate::traits::{Data, Partition, RddError, RddResult};
use rayon::prelude::*;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;

/// Task represents a unit of work to be executed
pub struct Task<T> {
    pub partition: Box<dyn Partition>,
    pub compute_fn: ComputeFn<T>,
}

/// Type alias for complex compute function type
pub type ComputeFn<T> = Arc<dyn Fn(&dyn Partition) -> RddResult<Vec<T>> + Send + Sync>;

impl<T> Debug for Task<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("partition", &self.partition)
            .field("compute_fn", &"<function>")
            .finish()
    }
}

impl<T: Data> Task<T> {
    pub fn new(partition: Box<dyn Partition>, compute_fn: ComputeFn<T>) -> Self {
        Self {
            partition,
            compute_fn,
        }
    }

    /// Run the task and ship its output back through the result encoding.
    pub fn execute(&self) -> RddResult<Vec<T>> {
        let output = (self.compute_fn)(self.partition.as_ref())?;
        let bytes = encode_task_result(&output)?;
        debug!(
            "Task for {} produced {} elements ({} bytes)",
            self.partition.id(),
            output.len(),
            bytes.len()
        );
        decode_task_result(&bytes)
    }
}

/// Encode a task's output the way it would travel from an executor to the driver.
pub fn encode_task_result<T: Data>(output: &[T]) -> RddResult<Vec<u8>> {
    bincode::serde::encode_to_vec(output, bincode::config::standard())
        .map_err(|e| RddError::SerializationError(e.to_string()))
}

/// Decode a task result produced by [`encode_task_result`].
pub fn decode_task_result<T: Data>(bytes: &[u8]) -> RddResult<Vec<T>> {
    let (output, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
        .map_err(|e| RddError::SerializationError(e.to_string()))?;
    Ok(output)
}

/// LocalScheduler manages parallel execution of tasks using Rayon
pub struct LocalScheduler {
    /// Number of threads in the thread pool
    num_threads: usize,
    /// Dedicated pool; `None` runs on rayon's global pool
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Debug for LocalScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalScheduler")
            .field("num_threads", &self.num_threads)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl LocalScheduler {
    /// Create a new LocalScheduler backed by a dedicated pool of `num_threads` threads
    pub fn new(num_threads: usize) -> RddResult<Self> {
        if num_threads == 0 {
            return Err(RddError::ContextError(
                "Scheduler needs at least one thread".to_string(),
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("rddsort-task-{}", i))
            .build()
            .map_err(|e| RddError::ContextError(format!("Failed to build thread pool: {}", e)))?;

        Ok(Self {
            num_threads,
            pool: Some(Arc::new(pool)),
        })
    }

    /// Create a new LocalScheduler on rayon's global pool
    pub fn with_default_threads() -> Self {
        Self {
            num_threads: rayon::current_num_threads(),
            pool: None,
        }
    }

    /// Get the number of threads
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Execute a collection of tasks in parallel, one result per task in task order
    pub fn execute_tasks<T: Data>(&self, tasks: Vec<Task<T>>) -> RddResult<Vec<Vec<T>>> {
        let num_tasks = tasks.len();
        debug!("Executing {} tasks on {} threads", num_tasks, self.num_threads);

        self.install(move || tasks.into_par_iter().map(|task| task.execute()).collect())
    }

    /// Execute a collection of tasks and collect all results into a single vector
    pub fn execute_and_collect<T: Data>(&self, tasks: Vec<Task<T>>) -> RddResult<Vec<T>> {
        let partition_results = self.execute_tasks(tasks)?;
        let mut result = Vec::with_capacity(partition_results.iter().map(Vec::len).sum());
        for partition_data in partition_results {
            result.extend(partition_data);
        }
        Ok(result)
    }

    /// Execute a collection of tasks and count the total number of elements
    pub fn execute_and_count<T: Data>(&self, tasks: Vec<Task<T>>) -> RddResult<usize> {
        self.install(move || {
            tasks
                .into_par_iter()
                .map(|task| -> RddResult<usize> { Ok(task.execute()?.len()) })
                .sum()
        })
    }
}

impl Default for LocalScheduler {
    fn default() -> Self {
        Self::with_default_threads()
    }
}
