//! Product management handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::extract::Json;
use crate::AppState;
use venturedesk_common::{
    db::models::{PricingModel, Product, ProductInput},
    db::Repository,
    errors::{AppError, Result},
};

/// Request to create a product under an existing company
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(range(min = 1))]
    pub company_id: i32,

    #[serde(flatten)]
    #[validate(nested)]
    pub product: ProductInput,
}

/// Product response
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub description: String,
    pub target_audience: String,
    pub key_features: String,
    pub pricing_model: PricingModel,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            company_id: product.company_id,
            name: product.name,
            description: product.description,
            target_audience: product.target_audience,
            key_features: product.key_features,
            pricing_model: product.pricing_model,
            created_at: product.created_at,
        }
    }
}

/// List all products
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let repo = Repository::new(state.db.clone());

    let products = repo.list_products().await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Get a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>> {
    let repo = Repository::new(state.db.clone());

    let product = repo
        .find_product_by_id(id)
        .await?
        .ok_or(AppError::ProductNotFound { id })?;

    Ok(Json(product.into()))
}

/// Create a new product; the owning company must exist
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    if repo.find_company_by_id(request.company_id).await?.is_none() {
        return Err(AppError::Validation {
            message: format!("Company with id {} does not exist", request.company_id),
            field: Some("company_id".to_string()),
        });
    }

    let product = repo.create_product(request.company_id, &request.product).await?;

    tracing::info!(
        product_id = product.id,
        company_id = product.company_id,
        name = %product.name,
        "Product created"
    );

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// Full-record update of an existing product
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductResponse>> {
    input.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    let product = repo.update_product(id, &input).await?;

    tracing::info!(product_id = product.id, name = %product.name, "Product updated");

    Ok(Json(product.into()))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_product(id).await? {
        return Err(AppError::ProductNotFound { id });
    }

    tracing::info!(product_id = id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}
