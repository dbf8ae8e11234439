//! Shared cloud janitor domain primitives.
//!
//! This crate owns the cleanup predicates, report rendering, and environment
//! configuration. It intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod config;
pub mod contract;
pub mod report;
pub mod retention;
