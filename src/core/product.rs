//! Product business logic - Creating and looking up products.
//!
//! Products are the stock items tasks consume. They are created once and never
//! updated; a task references them through `productquantity` rows.

use crate::{
    entities::{Product, product},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all products, ordered alphabetically by name.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: Uuid,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product.
///
/// The identifier is generated client-side when the row is built.
pub async fn create_product<C: ConnectionTrait>(
    db: &C,
    name: &str,
    barcode: i64,
    price: i64,
) -> Result<product::Model> {
    let product = product::ActiveModel {
        name: Set(name.to_string()),
        barcode: Set(barcode),
        price: Set(price),
        ..product::ActiveModel::new()
    };
    product.insert(db).await.map_err(Into::into)
}
