use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Welcome to my Portfolio Web API!",
        "version": env!("CARGO_PKG_VERSION"),
        "api": "/api/v1"
    }))
}
