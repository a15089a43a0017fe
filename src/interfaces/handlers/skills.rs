use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::entities::skill::SkillUpload;
use crate::errors::AppError;
use crate::use_cases::extractors::AuthClaims;
use crate::utils::valid_uuid::valid_uuid;
use crate::AppState;

#[post("")]
#[instrument(skip(state, _claims, form))]
pub async fn create_skill(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    form: MultipartForm<SkillUpload>,
) -> Result<HttpResponse, AppError> {
    let (request, svg) = form.into_inner().into_new_skill()?;
    let skill = state.skill_handler.create_skill(request, svg).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "New skill added",
        "skill": skill
    })))
}

#[get("")]
#[instrument(skip(state))]
pub async fn list_skills(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let skills = state.skill_handler.list_skills().await?;

    Ok(HttpResponse::Ok().json(json!({"success": true, "skills": skills})))
}

#[get("/{id}")]
#[instrument(skip(state))]
pub async fn get_skill(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let skill = state.skill_handler.get_skill(&valid_uuid(&id)?).await?;

    Ok(HttpResponse::Ok().json(json!({"success": true, "skill": skill})))
}

#[put("/{id}")]
#[instrument(skip(state, _claims, form))]
pub async fn update_skill(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    id: web::Path<String>,
    form: MultipartForm<SkillUpload>,
) -> Result<HttpResponse, AppError> {
    let id = valid_uuid(&id)?;
    let (update, svg) = form.into_inner().into_update()?;
    let skill = state.skill_handler.update_skill(&id, update, svg).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Skill is updated",
        "skill": skill
    })))
}

#[delete("/{id}")]
#[instrument(skip(state, _claims))]
pub async fn delete_skill(
    state: web::Data<AppState>,
    _claims: AuthClaims,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.skill_handler.delete_skill(&valid_uuid(&id)?).await?;

    Ok(HttpResponse::Ok().json(json!({"success": true, "message": "Skill is deleted"})))
}
