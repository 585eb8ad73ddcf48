//! rddsort core - a small RDD-style execution layer and the sorted-words job
//!
//! The execution layer offers the three calls a driver needs: build a
//! context, `parallelize` a local vector into a partitioned collection, and
//! `collect` it back. The `job` module is the driver built on top of it.

pub mod config;
pub mod context;
pub mod job;
pub mod logging;
pub mod rdd;
pub mod scheduler;
pub mod traits;

pub use config::JobConfig;
pub use context::{ContextConfig, FlowContext};
pub use job::{JobReport, SAMPLE_WORDS, collect_sorted, render};
pub use rdd::DistributedRdd;
pub use traits::{RddError, RddResult};
