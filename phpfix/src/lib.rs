//! Core library for the phpfix source rewriting tool.
//!
//! This library tokenizes PHP source text into a lossless token stream,
//! runs a scheduled set of rewriting fixers over it to a fixed point, and
//! serializes the stream back to text.

// Allow common complexity warnings - these are intentional design choices
#![allow(
    clippy::type_complexity,
    clippy::similar_names,
    clippy::items_after_statements
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module defining the token model: kinds and their classification helpers.
pub mod token;

/// Module defining the mutable token stream and its navigation, search,
/// and editing operations.
pub mod tokens;

/// Module containing the lossless PHP tokenizer.
pub mod tokenizer;

/// Module containing read-only pattern analyzers (test classes, data
/// providers, constructors, whitespace).
pub mod analyzer;

/// Module containing the fixer trait, metadata types, the registry, and
/// the individual fixers.
pub mod fixer;

/// Module containing the scheduling and convergence orchestrator.
pub mod orchestrator;

/// Module for loading configuration.
pub mod config;

/// Module defining the error types.
pub mod error;

/// Module containing shared constants.
pub mod constants;

/// Module for rich CLI output formatting with colored text and progress
/// bars.
pub mod output;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;

/// Module defining the shared entry point logic.
pub mod entry_point;
