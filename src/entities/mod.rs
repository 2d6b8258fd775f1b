//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.
//!
//! Table names are the lower-cased type names (`productquantity`, `usertask`, ...).

pub mod device;
pub mod device_task;
pub mod product;
pub mod product_quantity;
pub mod task;
pub mod user;
pub mod user_task;

// Re-export specific types to avoid conflicts
pub use device::{Column as DeviceColumn, Entity as Device, Model as DeviceModel};
pub use device_task::{Entity as DeviceTask, Model as DeviceTaskModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_quantity::{
    Column as ProductQuantityColumn, Entity as ProductQuantity, Model as ProductQuantityModel,
};
pub use task::{Column as TaskColumn, Entity as Task, Model as TaskModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
pub use user_task::{Entity as UserTask, Model as UserTaskModel};

use sea_orm::EntityTrait;

/// Entities sharing the `name` column (users, products, devices).
pub trait NamedEntity: EntityTrait {
    /// The entity's `name` column.
    fn name_column() -> Self::Column;
}

/// Models carrying a `name` field.
pub trait Named {
    /// The row's name.
    fn name(&self) -> &str;
}
