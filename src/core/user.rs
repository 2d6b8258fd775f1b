//! User business logic.

use crate::{
    entities::{User, user},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all users, ordered alphabetically by name.
pub async fn get_all_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific user by its unique ID.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: Uuid) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Creates a new user with the given name and numeric password.
pub async fn create_user<C: ConnectionTrait>(
    db: &C,
    name: &str,
    password: i64,
) -> Result<user::Model> {
    let user = user::ActiveModel {
        name: Set(name.to_string()),
        password: Set(password),
        ..user::ActiveModel::new()
    };
    user.insert(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_and_get_user() -> Result<()> {
        let db = setup_test_db().await?;

        let user = create_user(&db, "Kate", 646_567_474).await?;
        assert_eq!(user.name, "Kate");
        assert_eq!(user.password, 646_567_474);

        assert_eq!(get_user_by_id(&db, user.id).await?, Some(user));
        assert!(get_user_by_id(&db, Uuid::new_v4()).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_users() -> Result<()> {
        let db = setup_test_db().await?;

        let oleg = create_test_user(&db, "Oleg").await?;
        let max = create_test_user(&db, "Max").await?;

        assert_eq!(get_all_users(&db).await?, vec![max, oleg]);
        Ok(())
    }
}
