//! Repository trait defining the interface for company search operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// A single company returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyResult {
    /// Stable company identifier
    pub id: u64,
    /// Display name of the company
    pub name: String,
    /// Company website, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl CompanyResult {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            website: None,
        }
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }
}

/// Trait defining the interface for company search operations.
///
/// Implementations include:
/// - `MockCompanyRepository` - Fixed sample data for testing
/// - `FileCompanyRepository` - Companies loaded from a JSON file
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Search companies by name.
    ///
    /// # Arguments
    /// * `query` - Search term as typed by the user
    /// * `limit` - Maximum number of results to return
    ///
    /// # Returns
    /// Matching companies, best match first
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CompanyResult>, ServiceError>;

    /// Get the number of companies held by the repository.
    fn company_count(&self) -> usize;

    /// Describe where the companies were loaded from.
    fn source(&self) -> &str;

    /// Check if the repository is ready to handle requests.
    fn is_ready(&self) -> bool;
}
