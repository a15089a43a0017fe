pub mod auth;
pub mod home;
pub mod projects;
pub mod skills;
pub mod software_applications;
pub mod system;
