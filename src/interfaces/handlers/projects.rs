use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::entities::project::ProjectUpload;
use crate::errors::AppError;
use crate::use_cases::extractors::AuthClaims;
use crate::utils::valid_uuid::valid_uuid;
use crate::AppState;

#[post("")]
#[instrument(skip(state, _claims, form))]
pub async fn create_project(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    form: MultipartForm<ProjectUpload>,
) -> Result<HttpResponse, AppError> {
    let (request, banner) = form.into_inner().into_new_project()?;
    let project = state.project_handler.create_project(request, banner).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "New project added",
        "project": project
    })))
}

#[get("")]
#[instrument(skip(state))]
pub async fn list_projects(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let projects = state.project_handler.list_projects().await?;

    Ok(HttpResponse::Ok().json(json!({"success": true, "projects": projects})))
}

#[get("/{id}")]
#[instrument(skip(state))]
pub async fn get_project(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let project = state.project_handler.get_project(&valid_uuid(&id)?).await?;

    Ok(HttpResponse::Ok().json(json!({"success": true, "project": project})))
}

#[put("/{id}")]
#[instrument(skip(state, _claims, form))]
pub async fn update_project(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    id: web::Path<String>,
    form: MultipartForm<ProjectUpload>,
) -> Result<HttpResponse, AppError> {
    let id = valid_uuid(&id)?;
    let (update, banner) = form.into_inner().into_update()?;
    let project = state.project_handler.update_project(&id, update, banner).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Project Updated",
        "project": project
    })))
}

#[delete("/{id}")]
#[instrument(skip(state, _claims))]
pub async fn delete_project(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.project_handler.delete_project(&valid_uuid(&id)?).await?;

    Ok(HttpResponse::Ok().json(json!({"success": true, "message": "Project is deleted"})))
}
