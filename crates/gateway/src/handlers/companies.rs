//! Company management handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::extract::Json;
use crate::handlers::products::ProductResponse;
use crate::AppState;
use venturedesk_common::{
    db::models::{Company, CompanyInput, Industry},
    db::Repository,
    errors::{AppError, Result},
};

/// Pagination window over the company list
#[derive(Debug, Deserialize, Validate)]
pub struct ListCompaniesParams {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page number must be >= 1"))]
    pub page: u64,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "page size must be between 1 and 100"))]
    pub page_size: u64,
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    10
}

/// Company response without products
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: i32,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub industry: Industry,
    pub founded_year: i32,
    pub employee_count: i32,
    pub headquarters: String,
    pub website_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            tagline: company.tagline,
            description: company.description,
            industry: company.industry,
            founded_year: company.founded_year,
            employee_count: company.employee_count,
            headquarters: company.headquarters,
            website_url: company.website_url,
            created_at: company.created_at,
        }
    }
}

/// Company response with nested products
#[derive(Debug, Serialize)]
pub struct CompanyWithProducts {
    #[serde(flatten)]
    pub company: CompanyResponse,
    pub products: Vec<ProductResponse>,
}

/// One page of companies plus the overall total
#[derive(Debug, Serialize)]
pub struct PaginatedCompanies {
    pub items: Vec<CompanyResponse>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

/// List companies with pagination
pub async fn list_companies(
    State(state): State<AppState>,
    Query(params): Query<ListCompaniesParams>,
) -> Result<Json<PaginatedCompanies>> {
    params.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());
    let (companies, total) = repo.list_companies(params.page, params.page_size).await?;

    Ok(Json(PaginatedCompanies {
        items: companies.into_iter().map(Into::into).collect(),
        total,
        page: params.page,
        page_size: params.page_size,
    }))
}

/// Get a company by ID with all nested products
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CompanyWithProducts>> {
    let repo = Repository::new(state.db.clone());

    let company = repo
        .find_company_by_id(id)
        .await?
        .ok_or(AppError::CompanyNotFound { id })?;

    let products = repo.products_for_company(id).await?;

    Ok(Json(CompanyWithProducts {
        company: company.into(),
        products: products.into_iter().map(Into::into).collect(),
    }))
}

/// Create a new company
pub async fn create_company(
    State(state): State<AppState>,
    Json(input): Json<CompanyInput>,
) -> Result<(StatusCode, Json<CompanyResponse>)> {
    input.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    if repo.find_company_by_name_ci(&input.name).await?.is_some() {
        return Err(AppError::DuplicateCompanyName { name: input.name });
    }

    let company = repo.create_company(&input).await?;

    tracing::info!(company_id = company.id, name = %company.name, "Company created");

    Ok((StatusCode::CREATED, Json(company.into())))
}

/// Full-record update of an existing company
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CompanyInput>,
) -> Result<Json<CompanyResponse>> {
    input.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    let existing = repo
        .find_company_by_id(id)
        .await?
        .ok_or(AppError::CompanyNotFound { id })?;

    // Check whether the new name collides with another company
    if input.name != existing.name
        && repo.find_company_by_name_ci(&input.name).await?.is_some()
    {
        return Err(AppError::DuplicateCompanyName { name: input.name });
    }

    let company = repo.update_company(id, &input).await?;

    tracing::info!(company_id = company.id, name = %company.name, "Company updated");

    Ok(Json(company.into()))
}

/// Delete a company and all its products
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_company(id).await? {
        return Err(AppError::CompanyNotFound { id });
    }

    tracing::info!(company_id = id, "Company deleted");

    Ok(StatusCode::NO_CONTENT)
}
