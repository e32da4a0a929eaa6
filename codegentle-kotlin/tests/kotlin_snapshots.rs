//! Snapshot tests for Kotlin file rendering.
//!
//! These tests verify that rendered Kotlin sources match expected output.
//! Run `cargo insta review` to update snapshots when making intentional changes.

mod fixtures;

#[test]
fn test_hello_world() {
    let file = fixtures::hello_world();
    insta::assert_snapshot!("hello_world", file.to_string());
}

#[test]
fn test_sealed_interface_with_data_classes() {
    let file = fixtures::geometry();
    insta::assert_snapshot!("geometry", file.to_string());
}

#[test]
fn test_generic_interface_with_imports() {
    let file = fixtures::repository();
    insta::assert_snapshot!("repository", file.to_string());
}

#[test]
fn test_enum_with_companion() {
    let file = fixtures::planet();
    insta::assert_snapshot!("planet", file.to_string());
}

#[test]
fn test_anonymous_object_and_varargs() {
    let file = fixtures::sorting();
    insta::assert_snapshot!("sorting", file.to_string());
}

#[test]
fn test_top_level_property_and_object() {
    let file = fixtures::config();
    insta::assert_snapshot!("config", file.to_string());
}
