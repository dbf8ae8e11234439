//! AWS-oriented adapters and handlers for the scheduled cleanup job.
//!
//! This crate owns runtime integration details (the Lambda handler, EC2 and SNS
//! adapters) on top of the domain primitives in `janitor_core`.

pub mod adapters;
pub mod handlers;
