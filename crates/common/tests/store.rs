//! Entity store integration tests over an in-memory SQLite database.

use venturedesk_common::config::DatabaseConfig;
use venturedesk_common::db::models::{CompanyInput, Industry, PricingModel, ProductInput};
use venturedesk_common::db::{self, DbPool, Repository};
use venturedesk_common::errors::AppError;

async fn test_repo() -> Repository {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        // A single pooled connection keeps every query on the same
        // in-memory database.
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
        tagline: "Ship faster".to_string(),
        description: "Developer tooling for small teams.".to_string(),
        industry: Industry::SaaS,
        founded_year: 2020,
        employee_count: 42,
        headquarters: "Berlin, Germany".to_string(),
        website_url: Some("https://example.com".to_string()),
    }
}

fn product(name: &str) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: "Automates the boring parts.".to_string(),
        target_audience: "Platform teams".to_string(),
        key_features: "• One-click deploys\n• Instant rollbacks".to_string(),
        pricing_model: PricingModel::Subscription,
    }
}

#[tokio::test]
async fn create_assigns_id_and_created_at() {
    let repo = test_repo().await;

    let created = repo.create_company(&company("NovaPay")).await.unwrap();
    assert!(created.id >= 1);
    assert_eq!(created.name, "NovaPay");

    let fetched = repo.find_company_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn name_lookup_is_case_insensitive() {
    let repo = test_repo().await;

    let created = repo.create_company(&company("Acme")).await.unwrap();

    let found = repo.find_company_by_name_ci("ACME").await.unwrap();
    assert_eq!(found.map(|c| c.id), Some(created.id));

    assert!(repo.find_company_by_name_ci("acme inc").await.unwrap().is_none());
}

#[tokio::test]
async fn store_rejects_duplicate_names_regardless_of_case() {
    let repo = test_repo().await;

    repo.create_company(&company("Acme")).await.unwrap();

    // The LOWER(name) unique index is the authoritative guard; inserting
    // past the application-level check still fails.
    let err = repo.create_company(&company("ACME")).await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
}

#[tokio::test]
async fn pagination_window_and_total() {
    let repo = test_repo().await;

    for i in 1..=25 {
        repo.create_company(&company(&format!("Company {i:02}")))
            .await
            .unwrap();
    }

    let (page, total) = repo.list_companies(3, 10).await.unwrap();
    assert_eq!(total, 25);
    assert_eq!(page.len(), 5);
    assert_eq!(page[0].name, "Company 21");
    assert_eq!(page[4].name, "Company 25");

    let (beyond, total) = repo.list_companies(5, 10).await.unwrap();
    assert_eq!(total, 25);
    assert!(beyond.is_empty());
}

#[tokio::test]
async fn update_overwrites_fields_but_not_created_at() {
    let repo = test_repo().await;

    let created = repo.create_company(&company("Acme")).await.unwrap();

    let mut input = company("Acme");
    input.tagline = "Everything, everywhere".to_string();
    input.employee_count = 120;
    let updated = repo.update_company(created.id, &input).await.unwrap();

    assert_eq!(updated.tagline, "Everything, everywhere");
    assert_eq!(updated.employee_count, 120);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn update_missing_company_reports_not_found() {
    let repo = test_repo().await;

    let err = repo.update_company(99999, &company("Ghost")).await.unwrap_err();
    assert!(matches!(err, AppError::CompanyNotFound { id: 99999 }));
}

#[tokio::test]
async fn deleting_a_company_cascades_to_its_products() {
    let repo = test_repo().await;

    let created = repo
        .insert_company_with_products(&company("Acme"), &[product("One"), product("Two")])
        .await
        .unwrap();

    let products = repo.products_for_company(created.id).await.unwrap();
    assert_eq!(products.len(), 2);

    assert!(repo.delete_company(created.id).await.unwrap());

    assert!(repo.find_company_by_id(created.id).await.unwrap().is_none());
    assert!(repo.products_for_company(created.id).await.unwrap().is_empty());
    for p in products {
        assert!(repo.find_product_by_id(p.id).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn delete_missing_rows_reports_false() {
    let repo = test_repo().await;

    assert!(!repo.delete_company(123).await.unwrap());
    assert!(!repo.delete_product(123).await.unwrap());
}

#[tokio::test]
async fn products_keep_insertion_order_per_company() {
    let repo = test_repo().await;

    let owner = repo.create_company(&company("Acme")).await.unwrap();
    let other = repo.create_company(&company("Globex")).await.unwrap();

    repo.create_product(owner.id, &product("First")).await.unwrap();
    repo.create_product(other.id, &product("Elsewhere")).await.unwrap();
    repo.create_product(owner.id, &product("Second")).await.unwrap();

    let owned = repo.products_for_company(owner.id).await.unwrap();
    let names: Vec<_> = owned.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);

    assert_eq!(repo.list_products().await.unwrap().len(), 3);
}

#[tokio::test]
async fn product_update_is_a_full_overwrite() {
    let repo = test_repo().await;

    let owner = repo.create_company(&company("Acme")).await.unwrap();
    let created = repo.create_product(owner.id, &product("Widget")).await.unwrap();

    let mut input = product("Widget");
    input.pricing_model = PricingModel::Enterprise;
    input.target_audience = "Fortune 500 ops".to_string();
    let updated = repo.update_product(created.id, &input).await.unwrap();

    assert_eq!(updated.pricing_model, PricingModel::Enterprise);
    assert_eq!(updated.target_audience, "Fortune 500 ops");
    assert_eq!(updated.company_id, owner.id);
    assert_eq!(updated.created_at, created.created_at);
}
