use actix_web::web;

use crate::handlers::skills;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/skills")
            .service(skills::create_skill)
            .service(skills::list_skills)
            .service(skills::get_skill)
            .service(skills::update_skill)
            .service(skills::delete_skill)
    );
}
