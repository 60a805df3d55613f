//! Bulk loader integration tests.

use std::io::Write;

use venturedesk_common::config::DatabaseConfig;
use venturedesk_common::db::models::{CompanyInput, Industry, PricingModel, ProductInput};
use venturedesk_common::db::{self, DbPool, Repository};
use venturedesk_common::errors::AppError;
use venturedesk_common::seed::{self, LoadReport, SeedCompany, SeedDocument};

async fn test_repo() -> Repository {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        connect_timeout_secs: 5,
        idle_timeout_secs: 300,
    };

    let pool = DbPool::new(&config).await.expect("connect");
    db::init_schema(pool.conn()).await.expect("schema");
    Repository::new(pool)
}

fn company(name: &str) -> CompanyInput {
    CompanyInput {
        name: name.to_string(),
        tagline: "Care, delivered".to_string(),
        description: "Remote monitoring for chronic conditions.".to_string(),
        industry: Industry::HealthTech,
        founded_year: 2019,
        employee_count: 60,
        headquarters: "Toronto, Canada".to_string(),
        website_url: None,
    }
}

fn product(name: &str) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: "Patient-facing companion app.".to_string(),
        target_audience: "Care teams".to_string(),
        key_features: "• Vitals tracking\n• Alerts".to_string(),
        pricing_model: PricingModel::Freemium,
    }
}

fn record(name: &str, products: Vec<ProductInput>) -> SeedCompany {
    SeedCompany {
        company: company(name),
        products,
    }
}

#[tokio::test]
async fn load_skips_existing_companies_by_case_insensitive_name() {
    let repo = test_repo().await;

    repo.create_company(&company("Heartline")).await.unwrap();

    let document = SeedDocument {
        companies: vec![
            record("HEARTLINE", vec![product("Should not land")]),
            record("PulseWorks", vec![product("Companion"), product("Dashboard")]),
        ],
    };

    let report = seed::load_document(&repo, &document).await.unwrap();
    assert_eq!(
        report,
        LoadReport {
            loaded: 1,
            skipped: 1,
            total: 2
        }
    );

    // The skipped company's products were not touched.
    let existing = repo.find_company_by_name_ci("heartline").await.unwrap().unwrap();
    assert!(repo.products_for_company(existing.id).await.unwrap().is_empty());

    // The new company landed with its products in document order.
    let loaded = repo.find_company_by_name_ci("pulseworks").await.unwrap().unwrap();
    let products = repo.products_for_company(loaded.id).await.unwrap();
    let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Companion", "Dashboard"]);
}

#[tokio::test]
async fn empty_document_loads_nothing() {
    let repo = test_repo().await;

    let report = seed::load_document(&repo, &SeedDocument::default()).await.unwrap();
    assert_eq!(
        report,
        LoadReport {
            loaded: 0,
            skipped: 0,
            total: 0
        }
    );
}

#[tokio::test]
async fn failing_record_keeps_earlier_companies() {
    let repo = test_repo().await;

    let mut bad = record("Broken", vec![]);
    bad.company.founded_year = 1999;

    let document = SeedDocument {
        companies: vec![record("Solid", vec![product("Kept")]), bad],
    };

    let err = seed::load_document(&repo, &document).await.unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    // No batch rollback: the first company stays committed.
    assert!(repo.find_company_by_name_ci("solid").await.unwrap().is_some());
    assert!(repo.find_company_by_name_ci("broken").await.unwrap().is_none());
}

#[tokio::test]
async fn invalid_nested_product_aborts_that_company_entirely() {
    let repo = test_repo().await;

    let mut bad_product = product("Empty features");
    bad_product.key_features = String::new();

    let document = SeedDocument {
        companies: vec![record("Atomic", vec![product("Fine"), bad_product])],
    };

    let err = seed::load_document(&repo, &document).await.unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    // Validation runs before the insert, so nothing of the record landed.
    assert!(repo.find_company_by_name_ci("atomic").await.unwrap().is_none());
    assert!(repo.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_document_is_reported_as_not_found() {
    let repo = test_repo().await;

    let missing = std::path::Path::new("/definitely/not/here.json");
    let err = seed::load_from_path(&repo, missing).await.unwrap_err();
    assert!(matches!(err, AppError::SeedDocumentNotFound { .. }));
}

#[tokio::test]
async fn malformed_document_is_reported_without_touching_the_store() {
    let repo = test_repo().await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{\"companies\": [{{\"name\": ").unwrap();

    let err = seed::load_from_path(&repo, file.path()).await.unwrap_err();
    assert!(matches!(err, AppError::SeedDocumentMalformed { .. }));

    let (companies, total) = repo.list_companies(1, 10).await.unwrap();
    assert!(companies.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn document_round_trips_through_disk() {
    let repo = test_repo().await;

    let document = SeedDocument {
        companies: vec![record("DiskBound", vec![product("Loader")])],
    };

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string_pretty(&document).unwrap()).unwrap();

    let report = seed::load_from_path(&repo, file.path()).await.unwrap();
    assert_eq!(
        report,
        LoadReport {
            loaded: 1,
            skipped: 0,
            total: 1
        }
    );
}
