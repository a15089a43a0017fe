use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    entities::user::{User, UserInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxUserRepo,
};


#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn create_user(&self, user: &UserInsert) -> Result<User, AppError>;
    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Earliest registered user, used as the portfolio owner when none is configured.
    async fn get_first_user(&self) -> Result<Option<User>, AppError>;

    /// User holding `token_hash` whose reset window is still open at `now`.
    async fn get_user_by_reset_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, AppError>;

    /// Writes every mutable column of `user` and returns the stored row.
    async fn save_user(&self, user: &User) -> Result<User, AppError>;

    async fn clear_expired_reset_tokens(&self) -> Result<u64, AppError>;
}

impl SqlxUserRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxUserRepo { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn create_user(&self, user: &UserInsert) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (
                full_name,
                email,
                phone,
                about_me,
                password_hash,
                portfolio_url,
                github_url,
                instagram_url,
                twitter_url,
                linkedin_url,
                facebook_url,
                avatar,
                resume,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.about_me)
        .bind(&user.password_hash)
        .bind(&user.portfolio_url)
        .bind(&user.github_url)
        .bind(&user.instagram_url)
        .bind(&user.twitter_url)
        .bind(&user.linkedin_url)
        .bind(&user.facebook_url)
        .bind(Json(&user.avatar))
        .bind(Json(&user.resume))
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("User with this email already exists".to_string()),
            other => other,
        })
    }

    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_first_user(&self) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at ASC LIMIT 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_user_by_reset_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE reset_password_token = $1 AND reset_password_expire > $2
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn save_user(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                full_name = $2,
                email = $3,
                phone = $4,
                about_me = $5,
                password_hash = $6,
                portfolio_url = $7,
                github_url = $8,
                instagram_url = $9,
                twitter_url = $10,
                linkedin_url = $11,
                facebook_url = $12,
                avatar = $13,
                resume = $14,
                reset_password_token = $15,
                reset_password_expire = $16,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.about_me)
        .bind(&user.password_hash)
        .bind(&user.portfolio_url)
        .bind(&user.github_url)
        .bind(&user.instagram_url)
        .bind(&user.twitter_url)
        .bind(&user.linkedin_url)
        .bind(&user.facebook_url)
        .bind(Json(&user.avatar))
        .bind(Json(&user.resume))
        .bind(&user.reset_password_token)
        .bind(user.reset_password_expire)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::NotFound(_) => AppError::NotFound("User not found".to_string()),
            AppError::Conflict(_) => AppError::Conflict("User with this email already exists".to_string()),
            other => other,
        })
    }

    async fn clear_expired_reset_tokens(&self) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET reset_password_token = NULL, reset_password_expire = NULL
            WHERE reset_password_expire IS NOT NULL AND reset_password_expire <= NOW()
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
