//! Device-task join rows.

use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Device-to-task assignment model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "devicetask")]
pub struct Model {
    /// Client-generated surrogate identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Assigned device
    pub device_id: Uuid,
    /// Task the device is assigned to
    pub task_id: Uuid,
}

/// Defines relationships between `DeviceTask` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each assignment references one device
    #[sea_orm(
        belongs_to = "super::device::Entity",
        from = "Column::DeviceId",
        to = "super::device::Column::Id"
    )]
    Device,
    /// Each assignment references one task
    #[sea_orm(
        belongs_to = "super::task::Entity",
        from = "Column::TaskId",
        to = "super::task::Column::Id"
    )]
    Task,
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Device.def()
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
