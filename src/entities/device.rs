//! Device entity - Equipment (scanners, scales) attached to tasks.

use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Device database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "device")]
pub struct Model {
    /// Client-generated surrogate identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Device name, conventionally `SKF_` followed by hex digits
    pub name: String,
    /// Free-text description
    pub description: String,
}

/// Defines relationships between Device and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A device is assigned to tasks through join rows
    #[sea_orm(has_many = "super::device_task::Entity")]
    DeviceTask,
}

impl Related<super::device_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeviceTask.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        super::device_task::Relation::Task.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::device_task::Relation::Device.def().rev())
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
