use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    entities::project::{Project, ProjectInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Inserts a project and returns the stored row
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;

    /// Retrieves a project by id
    async fn get_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError>;

    /// Retrieves every project, oldest first
    async fn get_all_projects(&self) -> Result<Vec<Project>, AppError>;

    /// Overwrites the stored project with `project`
    async fn update_project(&self, project: &Project) -> Result<Project, AppError>;

    /// Removes a project; `NotFound` when nothing was deleted
    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                title, description, git_repo_link, project_link, technologies,
                stack, deployed, project_banner, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.git_repo_link)
        .bind(&project.project_link)
        .bind(&project.technologies)
        .bind(&project.stack)
        .bind(project.deployed)
        .bind(Json(&project.project_banner))
        .bind(project.created_at)
        .bind(project.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn get_all_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn update_project(&self, project: &Project) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET
                title = $2,
                description = $3,
                git_repo_link = $4,
                project_link = $5,
                technologies = $6,
                stack = $7,
                deployed = $8,
                project_banner = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.git_repo_link)
        .bind(&project.project_link)
        .bind(&project.technologies)
        .bind(&project.stack)
        .bind(project.deployed)
        .bind(Json(&project.project_banner))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Project not found".into()),
            _ => e.into()
        })
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }
        Ok(())
    }
}
