//! Company search module.
//!
//! This module provides a `CompanyRepository` trait and implementations:
//! - `MockCompanyRepository` - Serves a fixed sample of companies for testing
//! - `FileCompanyRepository` - Serves companies loaded from a JSON data file

mod file;
mod matcher;
mod mock;
mod repository;

pub use file::FileCompanyRepository;
pub use mock::MockCompanyRepository;
pub use repository::{CompanyRepository, CompanyResult};
