//! Read-only pattern analyzers.
//!
//! Analyzers extract structural facts from a token range and never mutate
//! the stream; the fixers own all mutation.

/// Constructor discovery and promoted-parameter extraction.
pub mod constructor;
/// Data-provider declaration/usage collection.
pub mod data_provider;
/// Test-class boundary detection.
pub mod test_class;
/// Indentation detection and line-layout configuration.
pub mod whitespace;
