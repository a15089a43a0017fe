use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::entities::software_application::SoftwareApplicationUpload;
use crate::errors::AppError;
use crate::use_cases::extractors::AuthClaims;
use crate::utils::valid_uuid::valid_uuid;
use crate::AppState;

#[post("")]
#[instrument(skip(state, _claims, form))]
pub async fn create_application(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    form: MultipartForm<SoftwareApplicationUpload>,
) -> Result<HttpResponse, AppError> {
    let (request, svg) = form.into_inner().into_new_application();
    let application = state
        .software_application_handler
        .create_application(request, svg)
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "New software application added",
        "software_application": application
    })))
}

#[get("")]
#[instrument(skip(state))]
pub async fn list_applications(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let applications = state.software_application_handler.list_applications().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "software_applications": applications
    })))
}

#[get("/{id}")]
#[instrument(skip(state))]
pub async fn get_application(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let application = state
        .software_application_handler
        .get_application(&valid_uuid(&id)?)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "software_application": application
    })))
}

#[put("/{id}")]
#[instrument(skip(state, _claims, form))]
pub async fn update_application(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    id: web::Path<String>,
    form: MultipartForm<SoftwareApplicationUpload>,
) -> Result<HttpResponse, AppError> {
    let id = valid_uuid(&id)?;
    let (update, svg) = form.into_inner().into_update();
    let application = state
        .software_application_handler
        .update_application(&id, update, svg)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Software application is updated",
        "software_application": application
    })))
}

#[delete("/{id}")]
#[instrument(skip(state, _claims))]
pub async fn delete_application(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state
        .software_application_handler
        .delete_application(&valid_uuid(&id)?)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Software application is deleted"
    })))
}
