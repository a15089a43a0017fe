use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod auth;
mod json_error;
mod projects;
mod skills;
mod software_applications;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .wrap(json_error::payload_error_handlers())
            .service(health_check)
            .configure(auth::config_routes)
            .configure(projects::config_routes)
            .configure(skills::config_routes)
            .configure(software_applications::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
