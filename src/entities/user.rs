//! User entity - A person who works on tasks.

use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    /// Client-generated surrogate identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Numeric password, stored as-is
    pub password: i64,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many task assignments
    #[sea_orm(has_many = "super::user_task::Entity")]
    UserTask,
}

impl Related<super::user_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserTask.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_task::Relation::Task.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_task::Relation::User.def().rev())
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
