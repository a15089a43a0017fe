pub mod asset;
pub mod form_fields;
pub mod project;
pub mod skill;
pub mod software_application;
pub mod token;
pub mod user;
