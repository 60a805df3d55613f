//! Product entity

use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub company_id: i32,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub target_audience: String,

    /// Free-form, newline-delimited bullet list
    #[sea_orm(column_type = "Text")]
    pub key_features: String,

    pub pricing_model: PricingModel,

    pub created_at: DateTimeUtc,
}

/// Closed set of pricing models; rejected at deserialization when outside
/// the set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum PricingModel {
    #[sea_orm(string_value = "Free")]
    Free,

    #[sea_orm(string_value = "Freemium")]
    Freemium,

    #[sea_orm(string_value = "Subscription")]
    Subscription,

    #[sea_orm(string_value = "Enterprise")]
    Enterprise,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id",
        on_delete = "Cascade"
    )]
    Company,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Inbound product payload without its owning company id; the owner is
/// resolved by the caller (request field or seed nesting).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(length(min = 1, max = 255))]
    pub target_audience: String,

    #[validate(length(min = 1))]
    pub key_features: String,

    pub pricing_model: PricingModel,
}

impl ProductInput {
    /// Map every mutable column explicitly; id, company_id, and created_at
    /// stay untouched.
    pub fn apply(&self, model: &mut ActiveModel) {
        model.name = Set(self.name.clone());
        model.description = Set(self.description.clone());
        model.target_audience = Set(self.target_audience.clone());
        model.key_features = Set(self.key_features.clone());
        model.pricing_model = Set(self.pricing_model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProductInput {
        ProductInput {
            name: "LedgerSync".into(),
            description: "Reconciles bank feeds nightly.".into(),
            target_audience: "Accounting teams at SMEs".into(),
            key_features: "• Automated matching\n• Audit trail".into(),
            pricing_model: PricingModel::Subscription,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn empty_key_features_fails() {
        let mut product = input();
        product.key_features = String::new();
        assert!(product.validate().is_err());
    }

    #[test]
    fn pricing_model_rejects_values_outside_the_set() {
        assert!(serde_json::from_str::<PricingModel>("\"PayPerUse\"").is_err());
        assert_eq!(
            serde_json::from_str::<PricingModel>("\"Free\"").unwrap(),
            PricingModel::Free
        );
    }
}
