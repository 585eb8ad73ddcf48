//! Integration tests for the sorted-words job
//!
//! These tests check the observable properties of the job: the same elements
//! come back, in ascending order, no matter how the words are partitioned.

mod common;

use common::*;
use rddsort_core::job::{SAMPLE_WORDS, collect_sorted, render, sample_words};

#[test]
fn test_output_has_the_input_elements() {
    let context = create_test_context("same-elements");
    let sorted = collect_sorted(&context, sample_words(), None).unwrap();

    assert_eq!(sorted.len(), SAMPLE_WORDS.len());
    assert_same_elements(sorted, sample_words());
}

#[test]
fn test_output_is_ascending() {
    let context = create_test_context("ascending");
    let sorted = collect_sorted(&context, sample_words(), None).unwrap();

    assert_eq!(sorted, expected_sorted_words());
    assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_uppercase_sorts_before_lowercase() {
    let context = create_test_context("ascii-order");
    let words = vec!["apple".to_string(), "Zebra".to_string(), "banana".to_string()];

    let sorted = collect_sorted(&context, words, Some(2)).unwrap();
    assert_eq!(sorted, vec!["Zebra", "apple", "banana"]);
}

#[test]
fn test_sorting_is_idempotent() {
    let context = create_test_context("idempotent");
    let once = collect_sorted(&context, sample_words(), Some(3)).unwrap();
    let twice = collect_sorted(&context, once.clone(), Some(2)).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_distribution_is_transparent() {
    let context = create_test_context("transparent");
    let mut locally_sorted = sample_words();
    locally_sorted.sort();

    for partitions in [1, 2, 3, 5, 7, 16] {
        let sorted = collect_sorted(&context, sample_words(), Some(partitions)).unwrap();
        assert_eq!(sorted, locally_sorted, "partitions = {}", partitions);
    }
}

#[test]
fn test_collect_without_sort_preserves_multiplicity() {
    let context = create_test_context("multiplicity");
    let words: Vec<String> = ["dog", "dog", "Hello,", "dog"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let collected = context
        .parallelize_with_partitions(words.clone(), 3)
        .collect()
        .unwrap();
    assert_eq!(collected, words);
}

#[test]
fn test_empty_input_sorts_to_empty_output() {
    let context = create_test_context("empty");
    let sorted = collect_sorted(&context, Vec::new(), Some(4)).unwrap();

    assert!(sorted.is_empty());
    assert_eq!(render(&sorted), "[]");
}

#[test]
fn test_dedicated_pool() {
    let context = create_test_context_with_threads("dedicated", 2);
    let sorted = collect_sorted(&context, sample_words(), None).unwrap();

    assert_eq!(sorted, expected_sorted_words());
}

#[test]
fn test_rendering() {
    assert_eq!(
        render(&expected_sorted_words()),
        r#"["Hello,", "dog", "elephant", "panther", "world!"]"#
    );
}
