//! Common test utilities and helpers for integration tests

use rddsort_core::context::{ContextConfig, FlowContext};

/// Create a test context with a given name
pub fn create_test_context(name: &str) -> FlowContext {
    FlowContext::new(name)
}

/// Create a test context with its own task pool
#[allow(dead_code)] // not every test file needs a dedicated pool
pub fn create_test_context_with_threads(name: &str, threads: usize) -> FlowContext {
    let config = ContextConfig {
        default_parallelism: threads,
        num_threads: Some(threads),
    };
    FlowContext::with_config(name, config).expect("test context")
}

/// The expected result of sorting the sample words
pub fn expected_sorted_words() -> Vec<String> {
    ["Hello,", "dog", "elephant", "panther", "world!"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Assert that two vectors contain the same elements (order-independent)
pub fn assert_same_elements<T: Ord + Clone + std::fmt::Debug>(
    mut actual: Vec<T>,
    mut expected: Vec<T>,
) {
    actual.sort();
    expected.sort();
    assert_eq!(actual, expected);
}
