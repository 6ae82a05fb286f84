//! Company search service library.
//!
//! This library exposes the core modules for integration testing while
//! keeping the actual binary entry point in main.rs.

pub mod company;
pub mod config;
pub mod error;
pub mod healthcheck;
pub mod http;
pub mod metrics;
