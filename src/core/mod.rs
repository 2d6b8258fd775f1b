//! Core logic - framework-agnostic creation, seeding and query operations.

/// Device creation and lookup
pub mod device;
/// Hand-authored deterministic data set
pub mod fixture;
/// Product creation and lookup
pub mod product;
/// Read-only eager-load and aggregate queries
pub mod query;
/// Randomized bulk row generation
pub mod seed;
/// Task creation and linking
pub mod task;
/// User creation and lookup
pub mod user;

use crate::{entities::NamedEntity, errors::Result};
use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter};

/// Finds the first row of a named entity whose `name` matches exactly.
pub async fn find_by_name<E: NamedEntity>(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<E::Model>> {
    E::find()
        .filter(E::name_column().eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Named, Product, User};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_find_by_name_across_entities() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "Oleg").await?;
        create_test_product(&db, "Творог", 340).await?;

        let user = find_by_name::<User>(&db, "Oleg").await?;
        assert_eq!(user.as_ref().map(Named::name), Some("Oleg"));

        let product = find_by_name::<Product>(&db, "Творог").await?;
        assert_eq!(product.as_ref().map(Named::name), Some("Творог"));

        assert!(find_by_name::<User>(&db, "Творог").await?.is_none());
        Ok(())
    }
}
