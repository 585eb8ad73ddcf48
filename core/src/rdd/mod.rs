//! RDD (Resilient Distributed Dataset) implementations
//!
//! This module contains the distributed collection handed out by
//! `parallelize` and its actions.

pub mod distributed;

pub use distributed::*;
