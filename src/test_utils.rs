//! Shared test utilities for `taskstock`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{device, product, user},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user with a fixed password.
pub async fn create_test_user(db: &DatabaseConnection, name: &str) -> Result<entities::user::Model> {
    user::create_user(db, name, 123_456_789).await
}

/// Creates a test product with the given price.
///
/// # Defaults
/// * `barcode`: 237200000
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    price: i64,
) -> Result<entities::product::Model> {
    product::create_product(db, name, 237_200_000, price).await
}

/// Creates a test device with a fixed description.
pub async fn create_test_device(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::device::Model> {
    device::create_device(db, name, "test device").await
}
