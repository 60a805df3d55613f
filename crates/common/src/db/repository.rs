//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations
//! with proper error handling and transaction support.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Company Operations
    // ========================================================================

    /// Create a new company; the store assigns id and created_at
    pub async fn create_company(&self, input: &CompanyInput) -> Result<Company> {
        let mut company = CompanyActiveModel {
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        input.apply(&mut company);

        company.insert(self.conn()).await.map_err(Into::into)
    }

    /// Find company by ID
    pub async fn find_company_by_id(&self, id: i32) -> Result<Option<Company>> {
        CompanyEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Case-insensitive exact-match lookup, used for uniqueness checks
    pub async fn find_company_by_name_ci(&self, name: &str) -> Result<Option<Company>> {
        CompanyEntity::find()
            .filter(Expr::expr(Func::lower(Expr::col(CompanyColumn::Name))).eq(name.to_lowercase()))
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    /// List companies in insertion order with a total computed independently
    /// of the page. `page` is 1-based; bounds are the caller's concern.
    pub async fn list_companies(&self, page: u64, page_size: u64) -> Result<(Vec<Company>, u64)> {
        let paginator = CompanyEntity::find()
            .order_by_asc(CompanyColumn::Id)
            .paginate(self.conn(), page_size);

        let total = paginator.num_items().await?;
        let companies = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((companies, total))
    }

    /// Full-record overwrite of all mutable company fields; created_at is
    /// never rewritten
    pub async fn update_company(&self, id: i32, input: &CompanyInput) -> Result<Company> {
        let existing = self
            .find_company_by_id(id)
            .await?
            .ok_or(AppError::CompanyNotFound { id })?;

        let mut company: CompanyActiveModel = existing.into();
        input.apply(&mut company);

        company.update(self.conn()).await.map_err(Into::into)
    }

    /// Delete company by ID; the store cascades to its products
    pub async fn delete_company(&self, id: i32) -> Result<bool> {
        let result = CompanyEntity::delete_by_id(id).exec(self.conn()).await?;

        Ok(result.rows_affected > 0)
    }

    /// Insert a company and its products as one unit of work
    pub async fn insert_company_with_products(
        &self,
        company: &CompanyInput,
        products: &[ProductInput],
    ) -> Result<Company> {
        let company = company.clone();
        let products = products.to_vec();

        self.conn()
            .transaction::<_, Company, AppError>(move |txn| {
                Box::pin(async move {
                    let now = chrono::Utc::now();

                    let mut model = CompanyActiveModel {
                        created_at: Set(now),
                        ..Default::default()
                    };
                    company.apply(&mut model);
                    let inserted = model.insert(txn).await?;

                    for product in &products {
                        let mut model = ProductActiveModel {
                            company_id: Set(inserted.id),
                            created_at: Set(now),
                            ..Default::default()
                        };
                        product.apply(&mut model);
                        model.insert(txn).await?;
                    }

                    Ok(inserted)
                })
            })
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Product Operations
    // ========================================================================

    /// Create a new product under an existing company
    pub async fn create_product(&self, company_id: i32, input: &ProductInput) -> Result<Product> {
        let mut product = ProductActiveModel {
            company_id: Set(company_id),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        input.apply(&mut product);

        product.insert(self.conn()).await.map_err(Into::into)
    }

    /// Find product by ID
    pub async fn find_product_by_id(&self, id: i32) -> Result<Option<Product>> {
        ProductEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    /// List all products in insertion order
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        ProductEntity::find()
            .order_by_asc(ProductColumn::Id)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Products owned by a company, in insertion order
    pub async fn products_for_company(&self, company_id: i32) -> Result<Vec<Product>> {
        ProductEntity::find()
            .filter(ProductColumn::CompanyId.eq(company_id))
            .order_by_asc(ProductColumn::Id)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Full-record overwrite of all mutable product fields
    pub async fn update_product(&self, id: i32, input: &ProductInput) -> Result<Product> {
        let existing = self
            .find_product_by_id(id)
            .await?
            .ok_or(AppError::ProductNotFound { id })?;

        let mut product: ProductActiveModel = existing.into();
        input.apply(&mut product);

        product.update(self.conn()).await.map_err(Into::into)
    }

    /// Delete product by ID
    pub async fn delete_product(&self, id: i32) -> Result<bool> {
        let result = ProductEntity::delete_by_id(id).exec(self.conn()).await?;

        Ok(result.rows_affected > 0)
    }
}
