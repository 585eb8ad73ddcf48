//! Parallel collection backed by driver-side data
//!
//! A `DistributedRdd` is what `parallelize` hands back: the driver's vector
//! split into contiguous partitions, each computed as one scheduler task.

use crate::scheduler::{ComputeFn, LocalScheduler, Task};
use crate::traits::{BasicPartition, Data, Partition, RddError, RddResult};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, info};

/// A Resilient Distributed Dataset (RDD) created from a local vector.
///
/// Partition `i` holds the elements `[i * size, (i + 1) * size)` where
/// `size = ceil(len / num_partitions)`, so trailing partitions may be empty.
/// Concatenating partitions in index order gives back the original vector.
pub struct DistributedRdd<T: Data> {
    data: Arc<Vec<T>>,
    num_partitions: usize,
    scheduler: Arc<LocalScheduler>,
}

impl<T: Data> Debug for DistributedRdd<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistributedRdd")
            .field("data_len", &self.data.len())
            .field("num_partitions", &self.num_partitions)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

impl<T: Data> Clone for DistributedRdd<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            num_partitions: self.num_partitions,
            scheduler: Arc::clone(&self.scheduler),
        }
    }
}

impl<T: Data> DistributedRdd<T> {
    /// Create a new single-partition RDD from a vector of data
    pub fn from_vec(data: Vec<T>) -> Self {
        Self::from_vec_with_partitions(data, 1)
    }

    /// Create a new RDD from a vector with specified number of partitions
    pub fn from_vec_with_partitions(data: Vec<T>, num_partitions: usize) -> Self {
        Self::with_scheduler(data, num_partitions, Arc::new(LocalScheduler::default()))
    }

    /// Create a new RDD whose tasks run on `scheduler`
    pub fn with_scheduler(
        data: Vec<T>,
        num_partitions: usize,
        scheduler: Arc<LocalScheduler>,
    ) -> Self {
        let num_partitions = num_partitions.max(1);
        debug!(
            "Parallelizing {} elements into {} partitions",
            data.len(),
            num_partitions
        );
        Self {
            data: Arc::new(data),
            num_partitions,
            scheduler,
        }
    }

    /// Get the list of partitions for this RDD
    pub fn partitions(&self) -> Vec<Box<dyn Partition>> {
        (0..self.num_partitions)
            .map(|i| Box::new(BasicPartition::new(i)) as Box<dyn Partition>)
            .collect()
    }

    /// Get the number of partitions
    pub fn num_partitions(&self) -> usize {
        self.num_partitions
    }

    /// Compute the elements of this RDD for the given partition.
    pub fn compute(&self, partition: &dyn Partition) -> RddResult<Vec<T>> {
        slice_partition(&self.data, self.num_partitions, partition.index())
    }

    fn tasks(&self) -> Vec<Task<T>> {
        let data = Arc::clone(&self.data);
        let num_partitions = self.num_partitions;
        let compute_fn: ComputeFn<T> = Arc::new(move |partition: &dyn Partition| {
            slice_partition(&data, num_partitions, partition.index())
        });

        self.partitions()
            .into_iter()
            .map(|partition| Task::new(partition, Arc::clone(&compute_fn)))
            .collect()
    }

    /// Collect all elements of the RDD into a vector, in partition order.
    ///
    /// Blocks until every partition task has finished. The first failing task
    /// fails the whole collect.
    pub fn collect(&self) -> RddResult<Vec<T>> {
        let result = self.scheduler.execute_and_collect(self.tasks())?;
        info!(
            "Collected {} elements from {} partitions",
            result.len(),
            self.num_partitions
        );
        Ok(result)
    }

    /// Collect each partition as its own vector.
    pub fn glom(&self) -> RddResult<Vec<Vec<T>>> {
        self.scheduler.execute_tasks(self.tasks())
    }

    /// Count the number of elements in the RDD
    pub fn count(&self) -> RddResult<usize> {
        self.scheduler.execute_and_count(self.tasks())
    }

    /// Take the first n elements of the RDD
    pub fn take(&self, n: usize) -> RddResult<Vec<T>> {
        let mut result = Vec::new();

        for partition in self.partitions() {
            if result.len() >= n {
                break;
            }
            let remaining = n - result.len();
            let partition_data = self.compute(partition.as_ref())?;
            result.extend(partition_data.into_iter().take(remaining));
        }

        Ok(result)
    }

    /// Get the first element of the RDD
    pub fn first(&self) -> RddResult<Option<T>> {
        Ok(self.take(1)?.into_iter().next())
    }
}

fn slice_partition<T: Clone>(
    data: &[T],
    num_partitions: usize,
    partition_index: usize,
) -> RddResult<Vec<T>> {
    if partition_index >= num_partitions {
        return Err(RddError::InvalidPartition(partition_index));
    }

    let data_len = data.len();
    let partition_size = data_len.div_ceil(num_partitions);
    let start = partition_index * partition_size;
    let end = std::cmp::min(start + partition_size, data_len);

    if start >= data_len {
        Ok(Vec::new())
    } else {
        Ok(data[start..end].to_vec())
    }
}
