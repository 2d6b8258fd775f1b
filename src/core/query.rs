//! Read-only queries over tasks and their associations.
//!
//! Each query is a single round trip. The aggregates inner-join tasks to their
//! product associations, so a task without associations does not appear in
//! their results. `SUM` skips null quantities; a task whose quantities are all
//! null reports `None`.

use crate::{
    entities::{
        Device, Product, ProductQuantity, Task, User, device, device_task, product,
        product_quantity, task, user, user_task,
    },
    errors::{Error, Result},
};
use sea_orm::{
    DatabaseConnection, FromQueryResult, JoinType, QueryOrder, QuerySelect, RelationTrait,
    prelude::*,
    sea_query::{Expr, Func, SimpleExpr},
};

/// Quantity sum for one task.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct TaskQuantityTotal {
    /// Task the sum belongs to
    pub task_id: Uuid,
    /// Sum of non-null quantities; `None` if all were null
    pub total_quantity: Option<i64>,
}

/// Price totals for one task.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct TaskPriceTotal {
    /// Task the totals belong to
    pub task_id: Uuid,
    /// Sum of `price * quantity` over the task's associations
    pub total_price: Option<i64>,
    /// Average unit price of the associated products
    pub average_price: Option<f64>,
}

/// Every user together with the tasks assigned to them, eager-loaded.
///
/// Users without tasks are included with an empty list.
pub async fn users_with_tasks(
    db: &DatabaseConnection,
) -> Result<Vec<(user::Model, Vec<task::Model>)>> {
    User::find()
        .find_with_related(Task)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Per-task sum of association quantities.
///
/// ```sql
/// SELECT task.id, SUM(productquantity.quantity)
/// FROM task JOIN productquantity ON productquantity.task_id = task.id
/// GROUP BY task.id
/// ```
pub async fn task_quantity_totals(db: &DatabaseConnection) -> Result<Vec<TaskQuantityTotal>> {
    let quantity = Expr::col((ProductQuantity, product_quantity::Column::Quantity));

    Task::find()
        .select_only()
        .column_as(task::Column::Id, "task_id")
        .column_as(SimpleExpr::from(Func::sum(quantity)), "total_quantity")
        .join(JoinType::InnerJoin, task::Relation::ProductQuantity.def())
        .group_by(task::Column::Id)
        .order_by_asc(task::Column::Date)
        .into_model::<TaskQuantityTotal>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Per-task sum of `product.price * quantity`, with the average unit price.
pub async fn task_price_totals(db: &DatabaseConnection) -> Result<Vec<TaskPriceTotal>> {
    let price = Expr::col((Product, product::Column::Price));
    let line_total = Expr::col((Product, product::Column::Price))
        .mul(Expr::col((ProductQuantity, product_quantity::Column::Quantity)));

    Task::find()
        .select_only()
        .column_as(task::Column::Id, "task_id")
        .column_as(SimpleExpr::from(Func::sum(line_total)), "total_price")
        .column_as(SimpleExpr::from(Func::avg(price)), "average_price")
        .join(JoinType::InnerJoin, task::Relation::ProductQuantity.def())
        .join(JoinType::InnerJoin, product_quantity::Relation::Product.def())
        .group_by(task::Column::Id)
        .order_by_asc(task::Column::Date)
        .into_model::<TaskPriceTotal>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Users reachable from the device named `device_name` through its tasks.
///
/// Each user appears once even when several of the device's tasks share
/// them. Results are ordered by user name.
///
/// # Errors
/// Returns [`Error::NotFound`] if no device has that name.
pub async fn users_of_device(
    db: &DatabaseConnection,
    device_name: &str,
) -> Result<Vec<user::Model>> {
    let users = User::find()
        .join(JoinType::InnerJoin, user::Relation::UserTask.def())
        .join(JoinType::InnerJoin, user_task::Relation::Task.def())
        .join(JoinType::InnerJoin, task::Relation::DeviceTask.def())
        .join(JoinType::InnerJoin, device_task::Relation::Device.def())
        .filter(device::Column::Name.eq(device_name))
        .distinct()
        .order_by_asc(user::Column::Name)
        .all(db)
        .await?;

    // Tell "no such device" apart from "device without users"
    if users.is_empty()
        && Device::find()
            .filter(device::Column::Name.eq(device_name))
            .one(db)
            .await?
            .is_none()
    {
        return Err(Error::not_found("device", device_name));
    }

    Ok(users)
}

/// `name password [task ids]`
#[must_use]
pub fn format_user_tasks(user: &user::Model, tasks: &[task::Model]) -> String {
    let ids: Vec<String> = tasks.iter().map(|t| t.id.to_string()).collect();
    format!("{} {} [{}]", user.name, user.password, ids.join(", "))
}

fn format_optional<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "NULL".to_string(), |v| v.to_string())
}

/// `(task id, quantity sum)`
#[must_use]
pub fn format_quantity_total(row: &TaskQuantityTotal) -> String {
    format!("({}, {})", row.task_id, format_optional(row.total_quantity))
}

/// `(task id, price total, average price)`
#[must_use]
pub fn format_price_total(row: &TaskPriceTotal) -> String {
    format!(
        "({}, {}, {})",
        row.task_id,
        format_optional(row.total_price),
        format_optional(row.average_price.map(|avg| format!("{avg:.2}")))
    )
}
