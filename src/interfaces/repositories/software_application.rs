use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    entities::software_application::{SoftwareApplication, SoftwareApplicationInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxSoftwareApplicationRepo,
};

#[async_trait]
pub trait SoftwareApplicationRepository: Send + Sync {
    async fn create_application(&self, application: &SoftwareApplicationInsert) -> Result<SoftwareApplication, AppError>;
    async fn get_application_by_id(&self, id: &Uuid) -> Result<Option<SoftwareApplication>, AppError>;
    async fn get_all_applications(&self) -> Result<Vec<SoftwareApplication>, AppError>;
    async fn update_application(&self, application: &SoftwareApplication) -> Result<SoftwareApplication, AppError>;
    async fn delete_application(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxSoftwareApplicationRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxSoftwareApplicationRepo { pool }
    }
}

#[async_trait]
impl SoftwareApplicationRepository for SqlxSoftwareApplicationRepo {
    async fn create_application(&self, application: &SoftwareApplicationInsert) -> Result<SoftwareApplication, AppError> {
        let created = sqlx::query_as::<_, SoftwareApplication>(
            r#"
            INSERT INTO software_applications (name, svg, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&application.name)
        .bind(Json(&application.svg))
        .bind(application.created_at)
        .bind(application.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_application_by_id(&self, id: &Uuid) -> Result<Option<SoftwareApplication>, AppError> {
        let application = sqlx::query_as::<_, SoftwareApplication>(
            "SELECT * FROM software_applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(application)
    }

    async fn get_all_applications(&self) -> Result<Vec<SoftwareApplication>, AppError> {
        let applications = sqlx::query_as::<_, SoftwareApplication>(
            "SELECT * FROM software_applications ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }

    async fn update_application(&self, application: &SoftwareApplication) -> Result<SoftwareApplication, AppError> {
        sqlx::query_as::<_, SoftwareApplication>(
            r#"
            UPDATE software_applications
            SET name = $2, svg = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(application.id)
        .bind(&application.name)
        .bind(Json(&application.svg))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Software application not found".into()),
            _ => e.into()
        })
    }

    async fn delete_application(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM software_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Software application not found".into()));
        }
        Ok(())
    }
}
