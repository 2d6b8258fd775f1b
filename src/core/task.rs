//! Task business logic - Creating tasks and linking them to products, users
//! and devices.
//!
//! Link operations check that both endpoints exist before writing, so a
//! missing row surfaces as [`Error::NotFound`] naming the entity instead of a
//! raw constraint failure.

use crate::{
    entities::{
        Device, Product, ProductQuantity, Task, User, device_task, product, product_quantity,
        task, user_task,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves a specific task by its unique ID.
pub async fn get_task_by_id(db: &DatabaseConnection, task_id: Uuid) -> Result<Option<task::Model>> {
    Task::find_by_id(task_id).one(db).await.map_err(Into::into)
}

/// Creates a new, empty task stamped with the current time.
pub async fn create_task<C: ConnectionTrait>(db: &C, name: Option<&str>) -> Result<task::Model> {
    let task = task::ActiveModel {
        name: Set(name.map(str::to_string)),
        ..task::ActiveModel::new()
    };
    task.insert(db).await.map_err(Into::into)
}

async fn require_task<C: ConnectionTrait>(db: &C, task_id: Uuid) -> Result<()> {
    Task::find_by_id(task_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or_else(|| Error::not_found("task", task_id))
}

/// Adds a product to a task with an optional quantity.
///
/// `None` records an unspecified quantity, which aggregates skip.
///
/// # Errors
/// Returns [`Error::NotFound`] if the task or the product does not exist.
pub async fn add_product_to_task<C: ConnectionTrait>(
    db: &C,
    task_id: Uuid,
    product_id: Uuid,
    quantity: Option<i64>,
) -> Result<product_quantity::Model> {
    require_task(db, task_id).await?;
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("product", product_id))?;

    let association = product_quantity::ActiveModel {
        product_id: Set(product_id),
        task_id: Set(task_id),
        quantity: Set(quantity),
        ..product_quantity::ActiveModel::new()
    };
    association.insert(db).await.map_err(Into::into)
}

/// Assigns a user to a task.
///
/// # Errors
/// Returns [`Error::NotFound`] if the task or the user does not exist.
pub async fn assign_user_to_task<C: ConnectionTrait>(
    db: &C,
    task_id: Uuid,
    user_id: Uuid,
) -> Result<user_task::Model> {
    require_task(db, task_id).await?;
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("user", user_id))?;

    user_task::ActiveModel {
        user_id: Set(user_id),
        task_id: Set(task_id),
        ..user_task::ActiveModel::new()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Assigns a device to a task.
///
/// # Errors
/// Returns [`Error::NotFound`] if the task or the device does not exist.
pub async fn assign_device_to_task<C: ConnectionTrait>(
    db: &C,
    task_id: Uuid,
    device_id: Uuid,
) -> Result<device_task::Model> {
    require_task(db, task_id).await?;
    Device::find_by_id(device_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("device", device_id))?;

    device_task::ActiveModel {
        device_id: Set(device_id),
        task_id: Set(task_id),
        ..device_task::ActiveModel::new()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves a task's product associations together with their products.
pub async fn get_products_for_task(
    db: &DatabaseConnection,
    task_id: Uuid,
) -> Result<Vec<(product_quantity::Model, product::Model)>> {
    let rows = ProductQuantity::find()
        .filter(product_quantity::Column::TaskId.eq(task_id))
        .find_also_related(Product)
        .order_by_asc(product::Column::Name)
        .all(db)
        .await?;

    // The foreign key guarantees the product is present
    Ok(rows
        .into_iter()
        .filter_map(|(association, product)| product.map(|p| (association, p)))
        .collect())
}
