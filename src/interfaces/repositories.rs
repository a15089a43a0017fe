pub mod asset_store;
pub mod mailer;
pub mod project;
pub mod skill;
pub mod software_application;
pub mod sqlx_repo;
pub mod token;
pub mod user;
