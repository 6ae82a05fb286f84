//! Mock repository serving a fixed sample of companies.

use async_trait::async_trait;
use tracing::info;

use super::matcher::rank_matches;
use super::repository::{CompanyRepository, CompanyResult};
use crate::error::ServiceError;

/// Mock repository that searches a hardcoded list of companies.
///
/// Used for local development and tests when no data file is available.
pub struct MockCompanyRepository {
    companies: Vec<CompanyResult>,
    source: String,
}

impl MockCompanyRepository {
    /// Create a new mock repository with the sample companies.
    pub fn new() -> Self {
        info!("Initializing MockCompanyRepository with sample companies");
        Self::with_companies(sample_companies())
    }

    /// Create a mock repository over the given companies.
    pub fn with_companies(companies: Vec<CompanyResult>) -> Self {
        Self {
            companies,
            source: "mock://sample-companies".to_string(),
        }
    }
}

impl Default for MockCompanyRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_companies() -> Vec<CompanyResult> {
    vec![
        CompanyResult::new(1, "Acme Corp").with_website("https://acme.example"),
        CompanyResult::new(2, "Acme Logistics"),
        CompanyResult::new(3, "Globex Corporation").with_website("https://globex.example"),
        CompanyResult::new(4, "Initech"),
        CompanyResult::new(5, "Umbrella Corporation"),
        CompanyResult::new(6, "Hooli").with_website("https://hooli.example"),
        CompanyResult::new(7, "Stark Industries"),
        CompanyResult::new(8, "Wayne Enterprises"),
        CompanyResult::new(9, "Wonka Industries"),
        CompanyResult::new(10, "Cyberdyne Systems"),
        CompanyResult::new(11, "Soylent Corp"),
        CompanyResult::new(12, "Tyrell Corporation"),
    ]
}

#[async_trait]
impl CompanyRepository for MockCompanyRepository {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CompanyResult>, ServiceError> {
        let results = rank_matches(&self.companies, query, limit);

        info!(
            query = %query,
            limit = limit,
            hits = results.len(),
            "Mock company search completed"
        );

        Ok(results)
    }

    fn company_count(&self) -> usize {
        self.companies.len()
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn is_ready(&self) -> bool {
        true
    }
}
