//! Name matching shared by the bundled repositories.

use std::cmp::Ordering;

use super::repository::CompanyResult;

/// Rank companies whose name contains `query`, case-insensitively.
///
/// Names starting with the query come first, then names containing it
/// elsewhere; each tier is ordered by name and then id. The result holds
/// at most `limit` entries. A query that trims to nothing matches nothing.
pub fn rank_matches(companies: &[CompanyResult], query: &str, limit: usize) -> Vec<CompanyResult> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut matches: Vec<(bool, String, &CompanyResult)> = companies
        .iter()
        .filter_map(|company| {
            let name = company.name.to_lowercase();
            let position = name.find(&needle)?;
            Some((position != 0, name, company))
        })
        .collect();

    matches.sort_by(|a, b| match a.0.cmp(&b.0) {
        Ordering::Equal => a.1.cmp(&b.1).then(a.2.id.cmp(&b.2.id)),
        other => other,
    });

    matches
        .into_iter()
        .take(limit)
        .map(|(_, _, company)| company.clone())
        .collect()
}
