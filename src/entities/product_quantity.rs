//! Product quantity entity - Associates a product with a task, carrying how
//! many units the task uses.
//!
//! `quantity` is nullable: `None` means "unspecified", which is distinct from
//! zero.

use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Product-to-task association model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "productquantity")]
pub struct Model {
    /// Client-generated surrogate identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Referenced product
    pub product_id: Uuid,
    /// Owning task
    pub task_id: Uuid,
    /// Units used, if known
    pub quantity: Option<i64>,
}

/// Defines relationships between `ProductQuantity` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each association references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each association belongs to one task
    #[sea_orm(
        belongs_to = "super::task::Entity",
        from = "Column::TaskId",
        to = "super::task::Column::Id"
    )]
    Task,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
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
