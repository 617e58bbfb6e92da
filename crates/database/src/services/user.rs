use crate::{
    entities::users,
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use models::user::UserRole;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

pub struct UserService;

impl UserService {
    pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email.to_lowercase()))
            .one(db)
            .await
    }

    /// Creates an account; `password_hash` must already be hashed
    pub async fn create(
        db: &DatabaseConnection,
        email: &str,
        password_hash: String,
        name: String,
        role: UserRole,
    ) -> ServiceResult<users::Model> {
        if Self::find_by_email(db, email).await?.is_some() {
            return Err(ServiceError::Invalid("Email already registered".to_string()));
        }

        let user = users::Model {
            id: Uuid::new_v4(),
            email: email.to_lowercase(),
            password_hash,
            name,
            role,
            created_at: Utc::now(),
        };

        users::Entity::insert(user.clone().into_active_model().reset_all())
            .exec_without_returning(db)
            .await?;

        log::info!("Registered {} account {}", user.role, user.email);
        Ok(user)
    }

    pub async fn count_by_role(db: &DatabaseConnection, role: UserRole) -> Result<u64, DbErr> {
        users::Entity::find()
            .filter(users::Column::Role.eq(role))
            .count(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn user(email: &str) -> users::Model {
        users::Model {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            name: "Alice".to_string(),
            role: UserRole::Client,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user("alice@example.com")]])
            .into_connection();

        let result = UserService::create(
            &db,
            "Alice@Example.com",
            "hash".to_string(),
            "Alice".to_string(),
            UserRole::Client,
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_create_lowercases_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let created = UserService::create(
            &db,
            "Bob@Example.com",
            "hash".to_string(),
            "Bob".to_string(),
            UserRole::Staff,
        )
        .await
        .unwrap();

        assert_eq!(created.email, "bob@example.com");
        assert_eq!(created.role, UserRole::Staff);
    }
}
