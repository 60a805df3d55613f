//! Seed-document bulk loader
//!
//! Reads a previously generated seed document and merges it into the store.
//! Companies already present (by case-insensitive name) are skipped together
//! with their nested products; new companies are inserted with their products
//! in document order.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::db::models::{CompanyInput, ProductInput};
use crate::db::Repository;
use crate::errors::{AppError, Result};

/// One company record in the seed document; products nested in document
/// order, no ids or timestamps (assigned on insert).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCompany {
    #[serde(flatten)]
    pub company: CompanyInput,

    #[serde(default)]
    pub products: Vec<ProductInput>,
}

/// Top-level seed document shape: `{"companies": [...]}`. A missing key
/// reads as an empty document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub companies: Vec<SeedCompany>,
}

/// Outcome of a bulk load; on a clean run loaded + skipped == total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
    pub total: usize,
}

/// Read and parse the seed document at `path`.
pub async fn read_document(path: &Path) -> Result<SeedDocument> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::SeedDocumentNotFound {
                path: path.display().to_string(),
            });
        }
        Err(err) => return Err(err.into()),
    };

    serde_json::from_str(&raw).map_err(|err| AppError::SeedDocumentMalformed {
        message: err.to_string(),
    })
}

/// Merge `document` into the store, one company at a time in document order.
///
/// Each new company and its products are inserted in a single transaction.
/// A failing record aborts the run, but companies inserted before it stay
/// committed - there is no batch-level rollback.
pub async fn load_document(repo: &Repository, document: &SeedDocument) -> Result<LoadReport> {
    let total = document.companies.len();
    let mut loaded = 0;
    let mut skipped = 0;

    for record in &document.companies {
        if repo
            .find_company_by_name_ci(&record.company.name)
            .await?
            .is_some()
        {
            skipped += 1;
            continue;
        }

        record.company.validate().map_err(|err| AppError::Validation {
            message: format!("company '{}': {}", record.company.name, err),
            field: None,
        })?;
        for product in &record.products {
            product.validate().map_err(|err| AppError::Validation {
                message: format!("product '{}': {}", product.name, err),
                field: None,
            })?;
        }

        let company = repo
            .insert_company_with_products(&record.company, &record.products)
            .await?;

        info!(
            company_id = company.id,
            name = %company.name,
            products = record.products.len(),
            "Seed company loaded"
        );
        loaded += 1;
    }

    Ok(LoadReport {
        loaded,
        skipped,
        total,
    })
}

/// Read the document at `path` and load it.
pub async fn load_from_path(repo: &Repository, path: &Path) -> Result<LoadReport> {
    let document = read_document(path).await?;
    load_document(repo, &document).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_without_companies_key_is_empty() {
        let document: SeedDocument = serde_json::from_str("{}").unwrap();
        assert!(document.companies.is_empty());
    }

    #[test]
    fn company_record_parses_with_nested_products() {
        let raw = r#"{
            "companies": [{
                "name": "NovaPay",
                "tagline": "Payments without borders",
                "description": "Cross-border payment rails.",
                "industry": "FinTech",
                "founded_year": 2021,
                "employee_count": 85,
                "headquarters": "Lisbon, Portugal",
                "website_url": "https://novapay.example",
                "products": [{
                    "name": "LedgerSync",
                    "description": "Reconciles bank feeds nightly.",
                    "target_audience": "Accounting teams",
                    "key_features": "• Automated matching",
                    "pricing_model": "Subscription"
                }]
            }]
        }"#;

        let document: SeedDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(document.companies.len(), 1);
        assert_eq!(document.companies[0].company.name, "NovaPay");
        assert_eq!(document.companies[0].products.len(), 1);
    }

    #[test]
    fn junk_fails_to_parse() {
        assert!(serde_json::from_str::<SeedDocument>("not json").is_err());
        assert!(serde_json::from_str::<SeedDocument>("{\"companies\": 3}").is_err());
    }
}
