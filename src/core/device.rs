//! Device business logic.

use crate::{
    entities::{Device, device},
    errors::Result,
};
use sea_orm::{Set, prelude::*};

/// Retrieves a specific device by its unique ID.
pub async fn get_device_by_id(
    db: &DatabaseConnection,
    device_id: Uuid,
) -> Result<Option<device::Model>> {
    Device::find_by_id(device_id).one(db).await.map_err(Into::into)
}

/// Finds a device by its exact name.
///
/// Device names are not unique; the first match is returned.
pub async fn get_device_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<device::Model>> {
    super::find_by_name::<Device>(db, name).await
}

/// Creates a new device.
pub async fn create_device<C: ConnectionTrait>(
    db: &C,
    name: &str,
    description: &str,
) -> Result<device::Model> {
    let device = device::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        ..device::ActiveModel::new()
    };
    device.insert(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_device_and_lookup_by_name() -> Result<()> {
        let db = setup_test_db().await?;

        let device = create_device(&db, "SKF_2004", "I AM ROBOT").await?;
        assert_eq!(device.description, "I AM ROBOT");

        assert_eq!(get_device_by_name(&db, "SKF_2004").await?, Some(device.clone()));
        assert_eq!(get_device_by_id(&db, device.id).await?, Some(device));

        // Exact match only
        assert!(get_device_by_name(&db, "SKF_200").await?.is_none());
        Ok(())
    }
}
