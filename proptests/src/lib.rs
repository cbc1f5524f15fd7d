//! Property-based tests for the proof-of-data-possession engine.
//!
//! This crate contains proptest-based property tests for verifying
//! invariants across the verification engine components.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p proptests
//!
//! # Run with more test cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p proptests
//!
//! # Run specific test module
//! cargo test -p proptests index
//! ```
//!
//! ## Test Categories
//!
//! - **Index tests**: leaf index partition invariant under arbitrary
//!   insert/delete histories
//! - **Challenge tests**: offset derivation (determinism, range,
//!   input sensitivity)
//! - **Merkle tests**: proof round-trip and tamper resistance
//! - **Registry tests**: batch atomicity and access control

/// Shared test strategies and helpers.
pub mod strategies;

// Test modules
#[cfg(test)]
mod challenge;
#[cfg(test)]
mod merkle;
#[cfg(test)]
mod registry;
