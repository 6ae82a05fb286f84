//! Repository loading companies from a JSON data file.
//!
//! The file holds a JSON array of `{"id", "name", "website"?}` objects and is
//! read once at startup; the repository is immutable afterwards.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::matcher::rank_matches;
use super::repository::{CompanyRepository, CompanyResult};
use crate::error::ServiceError;

/// Repository backed by a JSON file of companies.
pub struct FileCompanyRepository {
    file_path: PathBuf,
    source: String,
    companies: Vec<CompanyResult>,
}

impl std::fmt::Debug for FileCompanyRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileCompanyRepository")
            .field("file_path", &self.file_path)
            .field("company_count", &self.companies.len())
            .finish_non_exhaustive()
    }
}

impl FileCompanyRepository {
    /// Load companies from a JSON file.
    ///
    /// # Errors
    /// Returns error if:
    /// - File doesn't exist
    /// - File can't be read or isn't a JSON array of companies
    /// - Two companies share an id
    pub async fn open(file_path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let file_path = file_path.as_ref().to_path_buf();

        info!(path = %file_path.display(), "Loading company data file");

        if !file_path.exists() {
            error!(path = %file_path.display(), "Company data file not found");
            return Err(ServiceError::CompanyFileNotFound(
                file_path.display().to_string(),
            ));
        }

        let companies = tokio::task::spawn_blocking({
            let file_path = file_path.clone();
            move || load_companies(&file_path)
        })
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to spawn blocking task");
            ServiceError::Internal(format!("Task error: {}", e))
        })?
        .map_err(|e| {
            error!(error = %e, "Failed to load company data file");
            e
        })?;

        info!(
            path = %file_path.display(),
            company_count = companies.len(),
            "Company data file loaded successfully"
        );

        Ok(Self {
            source: file_path.display().to_string(),
            file_path,
            companies,
        })
    }
}

fn load_companies(path: &Path) -> Result<Vec<CompanyResult>, ServiceError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ServiceError::CompanyLoadError(format!("{}: {}", path.display(), e)))?;

    let companies: Vec<CompanyResult> = serde_json::from_str(&contents)
        .map_err(|e| ServiceError::CompanyLoadError(format!("{}: {}", path.display(), e)))?;

    let mut seen = HashSet::with_capacity(companies.len());
    for company in &companies {
        if !seen.insert(company.id) {
            return Err(ServiceError::CompanyLoadError(format!(
                "duplicate company id {}",
                company.id
            )));
        }
    }

    Ok(companies)
}

#[async_trait]
impl CompanyRepository for FileCompanyRepository {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CompanyResult>, ServiceError> {
        let results = rank_matches(&self.companies, query, limit);

        info!(
            query = %query,
            limit = limit,
            hits = results.len(),
            "Company search completed"
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
