//! SeaORM entity models
//!
//! Companies own their products; the relation cascades on delete.

mod company;
mod product;

pub use company::{
    ActiveModel as CompanyActiveModel, Column as CompanyColumn, CompanyInput,
    Entity as CompanyEntity, Industry, Model as Company,
};

pub use product::{
    ActiveModel as ProductActiveModel, Column as ProductColumn, Entity as ProductEntity,
    Model as Product, PricingModel, ProductInput,
};
