//! Core traits for the rddsort execution layer
//!
//! This module defines the error type, the partition abstraction and the
//! element bound shared by distributed collections and the scheduler.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Error types for RDD operations
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RddError {
    #[error("Computation failed: {0}")]
    ComputationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid partition: {0}")]
    InvalidPartition(usize),

    #[error("Context error: {0}")]
    ContextError(String),
}

/// Result type for RDD operations
pub type RddResult<T> = Result<T, RddError>;

/// Partition represents a logical partition of data in an RDD
pub trait Partition: Send + Sync + Debug {
    /// Get the partition index
    fn index(&self) -> usize;

    /// Get a unique identifier for this partition
    fn id(&self) -> String {
        format!("partition_{}", self.index())
    }
}

/// Basic partition implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicPartition {
    index: usize,
}

impl BasicPartition {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Partition for BasicPartition {
    fn index(&self) -> usize {
        self.index
    }
}

/// A data type that can be used in an RDD.
///
/// Elements must be serializable because task results cross a
/// serialization boundary on their way back to the driver.
pub trait Data:
    Send + Sync + Clone + Debug + Serialize + for<'de> Deserialize<'de> + 'static
{
}
impl<T> Data for T where
    T: Send + Sync + Clone + Debug + Serialize + for<'de> Deserialize<'de> + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_id() {
        let p = BasicPartition::new(3);
        assert_eq!(p.index(), 3);
        assert_eq!(p.id(), "partition_3");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            RddError::InvalidPartition(7).to_string(),
            "Invalid partition: 7"
        );
        assert_eq!(
            RddError::ContextError("no pool".to_string()).to_string(),
            "Context error: no pool"
        );
    }
}
