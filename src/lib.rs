mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

#[cfg(test)]
mod test_support;

pub use domain::{entities, use_cases, password};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, mail, storage, utils};

use auth::jwt::JwtService;
use errors::AppError;
use mail::smtp::SmtpMailer;
use repositories::sqlx_repo::{SqlxProjectRepo, SqlxSkillRepo, SqlxSoftwareApplicationRepo, SqlxUserRepo};
use storage::cloudinary::CloudinaryClient;
use use_cases::{
    auth::{AuthHandler, AuthSettings},
    project::ProjectHandler,
    skill::SkillHandler,
    software_application::SoftwareApplicationHandler,
};

pub type AppAuthHandler = AuthHandler<SqlxUserRepo, JwtService, CloudinaryClient, SmtpMailer>;
pub type AppProjectHandler = ProjectHandler<SqlxProjectRepo, CloudinaryClient>;
pub type AppSkillHandler = SkillHandler<SqlxSkillRepo, CloudinaryClient>;
pub type AppSoftwareApplicationHandler = SoftwareApplicationHandler<SqlxSoftwareApplicationRepo, CloudinaryClient>;

/// Cookie parameters shared by every handler that issues or clears a session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub cookie_expires_days: i64,
    pub secure_cookie: bool,
}

/// Process-wide context, built once at startup and shared through `web::Data`.
pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub project_handler: AppProjectHandler,
    pub skill_handler: AppSkillHandler,
    pub software_application_handler: AppSoftwareApplicationHandler,
    pub session: SessionSettings,
    pub pool: sqlx::PgPool,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Result<Self, AppError> {
        let jwt_service = JwtService::new(config);
        let assets = CloudinaryClient::new(config)?;
        let mailer = SmtpMailer::new(config)?;

        let auth_handler = AuthHandler::new(
            SqlxUserRepo::new(pool.clone()),
            jwt_service,
            assets.clone(),
            mailer,
            AuthSettings::from(config),
        );

        Ok(AppState {
            auth_handler,
            project_handler: ProjectHandler::new(SqlxProjectRepo::new(pool.clone()), assets.clone()),
            skill_handler: SkillHandler::new(SqlxSkillRepo::new(pool.clone()), assets.clone()),
            software_application_handler: SoftwareApplicationHandler::new(
                SqlxSoftwareApplicationRepo::new(pool.clone()),
                assets,
            ),
            session: SessionSettings {
                cookie_expires_days: config.cookie_expires_days,
                secure_cookie: config.is_production(),
            },
            pool,
        })
    }

    /// Releases the database pool. Called once after the server stops.
    pub async fn shutdown(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
