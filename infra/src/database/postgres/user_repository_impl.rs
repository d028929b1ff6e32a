//! Postgres implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use lr_core::domain::entities::user::User;
use lr_core::errors::{AuthError, DomainError};
use lr_core::repositories::UserRepository;

use crate::InfrastructureError;

/// Postgres implementation of UserRepository
pub struct PostgresUserRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new Postgres user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        Ok(User {
            id: row.try_get("id").map_err(column_error)?,
            name: row.try_get("name").map_err(column_error)?,
            email: row.try_get("email").map_err(column_error)?,
            password_hash: row.try_get("password").map_err(column_error)?,
            is_verified: row.try_get("is_verified").map_err(column_error)?,
        })
    }
}

fn column_error(e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to read user row: {}", e),
    }
}

fn query_error(e: sqlx::Error) -> DomainError {
    tracing::error!("User query failed: {}", e);
    InfrastructureError::Database(e).into()
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, name, email, password, is_verified
            FROM users
            WHERE email = $1
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, name, email, password, is_verified
            FROM users
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, name, email, password, is_verified)
            VALUES ($1, $2, $3, $4, $5)
        "#;

        sqlx::query(query)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_verified)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    AuthError::UserAlreadyExists.into()
                }
                e => query_error(e),
            })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                name = $1,
                email = $2,
                password = $3,
                is_verified = $4,
                updated_at = now()
            WHERE id = $5
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_verified)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound.into());
        }

        Ok(user)
    }
}
