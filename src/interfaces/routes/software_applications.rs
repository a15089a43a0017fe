use actix_web::web;

use crate::handlers::software_applications;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/software-applications")
            .service(software_applications::create_application)
            .service(software_applications::list_applications)
            .service(software_applications::get_application)
            .service(software_applications::update_application)
            .service(software_applications::delete_application)
    );
}
