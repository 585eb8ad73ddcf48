//! Common utilities and abstractions for the rddsort project.
//!
//! This crate provides the shared error type and the object storage
//! abstraction used to publish job artifacts.

pub mod error;
pub mod storage;

pub use error::{CommonError, Result};
pub use storage::{ArtifactStore, StorageBackend, StorageBuilder, StorageStats};
