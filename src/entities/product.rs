//! Product entity - A stock item that tasks consume in some quantity.
//!
//! Each product has a name, a barcode and a unit price. Products are linked to
//! tasks through [`super::product_quantity`] rows.

use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    /// Client-generated surrogate identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Human-readable product name (e.g. "Морковь")
    pub name: String,
    /// Numeric barcode
    pub barcode: i64,
    /// Unit price in the smallest currency unit
    pub price: i64,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product appears in many task associations
    #[sea_orm(has_many = "super::product_quantity::Entity")]
    ProductQuantity,
}

impl Related<super::product_quantity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductQuantity.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_quantity::Relation::Task.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_quantity::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            ..ActiveModelTrait::default()
        }
    }
}

impl super::NamedEntity for Entity {
    fn name_column() -> Self::Column {
        Column::Name
    }
}

impl super::Named for Model {
    fn name(&self) -> &str {
        &self.name
    }
}
