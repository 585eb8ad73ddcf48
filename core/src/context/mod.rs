//! Context module for rddsort
//!
//! This module provides the execution context that creates distributed
//! collections.

pub mod flow_context;

pub use flow_context::*;
