use actix_web::web;

use crate::handlers::auth;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::logout)
            .service(auth::me)
            .service(auth::update_profile)
            .service(auth::update_password)
            .service(auth::forgot_password)
            .service(auth::reset_password)
            .service(auth::portfolio)
    );
}
