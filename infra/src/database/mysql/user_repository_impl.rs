//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use courier_core::domain::entities::user::User;
use courier_core::errors::DomainError;
use courier_core::repositories::UserRepository;

use super::db_error;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| db_error("Failed to get id", e))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {e}"),
            })?,
            username: row
                .try_get("username")
                .map_err(|e| db_error("Failed to get username", e))?,
            mobile_no: row
                .try_get("mobile_no")
                .map_err(|e| db_error("Failed to get mobile_no", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| db_error("Failed to get password_hash", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("Failed to get created_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, username, mobile_no, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.mobile_no)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let unique_violation = e
                    .as_database_error()
                    .map(|d| d.is_unique_violation())
                    .unwrap_or(false);
                if unique_violation {
                    DomainError::Conflict {
                        message: format!("username '{}' already taken", user.username),
                    }
                } else {
                    db_error("Failed to save user", e)
                }
            })?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, mobile_no, password_hash, created_at
            FROM users
            WHERE username = ?
        "#;

        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find user by username", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, mobile_no, password_hash, created_at
            FROM users
            WHERE id = ?
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find user by id", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?) AS present";

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check user existence", e))?;

        let present: i8 = row
            .try_get("present")
            .map_err(|e| db_error("Failed to get existence result", e))?;
        Ok(present == 1)
    }
}
