//! Task entity - A unit of work that consumes products and is carried out by
//! users with devices.
//!
//! A task owns its [`super::product_quantity`] rows and is linked many-to-many
//! to users (through `usertask`) and devices (through `devicetask`).

use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Task database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "task")]
pub struct Model {
    /// Client-generated surrogate identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Optional label for the task
    pub name: Option<String>,
    /// When the task was created
    pub date: DateTimeUtc,
}

/// Defines relationships between Task and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Product associations owned by this task
    #[sea_orm(has_many = "super::product_quantity::Entity")]
    ProductQuantity,
    /// User assignments
    #[sea_orm(has_many = "super::user_task::Entity")]
    UserTask,
    /// Device assignments
    #[sea_orm(has_many = "super::device_task::Entity")]
    DeviceTask,
}

impl Related<super::product_quantity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductQuantity.def()
    }
}

impl Related<super::user_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserTask.def()
    }
}

impl Related<super::device_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeviceTask.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_task::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_task::Relation::Task.def().rev())
    }
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        super::device_task::Relation::Device.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::device_task::Relation::Task.def().rev())
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_quantity::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_quantity::Relation::Task.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            date: Set(chrono::Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}
