pub mod assets;
pub mod auth;
pub mod extractors;
pub mod project;
pub mod skill;
pub mod software_application;
