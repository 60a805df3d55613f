//! Company entity

use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    pub tagline: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub industry: Industry,

    pub founded_year: i32,

    pub employee_count: i32,

    pub headquarters: String,

    pub website_url: Option<String>,

    /// Set at insert, never written again
    pub created_at: DateTimeUtc,
}

/// Closed set of supported industries. Stored as the exact display strings;
/// serde rejects anything outside the set instead of coercing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum Industry {
    #[sea_orm(string_value = "FinTech")]
    FinTech,

    #[sea_orm(string_value = "HealthTech")]
    HealthTech,

    #[sea_orm(string_value = "EdTech")]
    EdTech,

    #[sea_orm(string_value = "E-commerce")]
    #[serde(rename = "E-commerce")]
    Ecommerce,

    #[sea_orm(string_value = "SaaS")]
    SaaS,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Inbound company payload, shared by create, full-replace update, and the
/// seed loader.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompanyInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub tagline: String,

    #[validate(length(min = 1))]
    pub description: String,

    pub industry: Industry,

    #[validate(range(min = 2015, max = 2024))]
    pub founded_year: i32,

    #[validate(range(min = 1))]
    pub employee_count: i32,

    #[validate(length(min = 1, max = 255))]
    pub headquarters: String,

    #[validate(length(max = 255))]
    pub website_url: Option<String>,
}

impl CompanyInput {
    /// Map every mutable column explicitly; id and created_at stay untouched.
    pub fn apply(&self, model: &mut ActiveModel) {
        model.name = Set(self.name.clone());
        model.tagline = Set(self.tagline.clone());
        model.description = Set(self.description.clone());
        model.industry = Set(self.industry);
        model.founded_year = Set(self.founded_year);
        model.employee_count = Set(self.employee_count);
        model.headquarters = Set(self.headquarters.clone());
        model.website_url = Set(self.website_url.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CompanyInput {
        CompanyInput {
            name: "NovaPay".into(),
            tagline: "Payments without borders".into(),
            description: "Cross-border payment rails for small exporters.".into(),
            industry: Industry::FinTech,
            founded_year: 2021,
            employee_count: 85,
            headquarters: "Lisbon, Portugal".into(),
            website_url: Some("https://novapay.example".into()),
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn founded_year_outside_range_fails() {
        let mut company = input();
        company.founded_year = 2014;
        assert!(company.validate().is_err());

        company.founded_year = 2025;
        assert!(company.validate().is_err());
    }

    #[test]
    fn empty_tagline_fails() {
        let mut company = input();
        company.tagline = String::new();
        assert!(company.validate().is_err());
    }

    #[test]
    fn zero_employee_count_fails() {
        let mut company = input();
        company.employee_count = 0;
        assert!(company.validate().is_err());
    }

    #[test]
    fn industry_rejects_values_outside_the_set() {
        assert!(serde_json::from_str::<Industry>("\"Gaming\"").is_err());
        assert!(serde_json::from_str::<Industry>("\"fintech\"").is_err());
        assert_eq!(
            serde_json::from_str::<Industry>("\"E-commerce\"").unwrap(),
            Industry::Ecommerce
        );
    }
}
