use actix_multipart::form::MultipartForm;
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{get, post, put, web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::constants::SESSION_COOKIE;
use crate::entities::token::SessionGrant;
use crate::entities::user::{
    ForgotPasswordRequest, LoginUser, ResetPasswordRequest, UpdatePasswordRequest, UserUpload,
};
use crate::errors::AppError;
use crate::use_cases::extractors::AuthClaims;
use crate::{AppState, SessionSettings};

fn cookie_base(session: &SessionSettings, value: String) -> Cookie<'static> {
    let builder = Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true);

    if session.secure_cookie {
        builder.secure(true).same_site(SameSite::None).finish()
    } else {
        builder.same_site(SameSite::Lax).finish()
    }
}

pub fn session_cookie(session: &SessionSettings, token: &str) -> Cookie<'static> {
    let mut cookie = cookie_base(session, token.to_string());
    cookie.set_max_age(CookieDuration::days(session.cookie_expires_days));
    cookie
}

pub fn removal_cookie(session: &SessionSettings) -> Cookie<'static> {
    let mut cookie = cookie_base(session, String::new());
    cookie.make_removal();
    cookie
}

/// Sets the session cookie and echoes the token with the user.
fn send_token(session: &SessionSettings, grant: SessionGrant, message: &str, status: StatusCode) -> HttpResponse {
    HttpResponse::build(status)
        .cookie(session_cookie(session, &grant.token))
        .json(json!({
            "success": true,
            "message": message,
            "user": grant.user,
            "token": grant.token
        }))
}

#[post("/register")]
#[instrument(skip(state, form))]
pub async fn register(
    state: web::Data<AppState>,
    form: MultipartForm<UserUpload>,
) -> Result<HttpResponse, AppError> {
    let (request, files) = form.into_inner().into_new_user();
    let grant = state.auth_handler.register(request, files).await?;

    Ok(send_token(&state.session, grant, "User Registered!", StatusCode::CREATED))
}

#[post("/login")]
#[instrument(skip(state, credentials))]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<LoginUser>,
) -> Result<HttpResponse, AppError> {
    let grant = state.auth_handler.login(credentials.into_inner()).await?;

    Ok(send_token(&state.session, grant, "Logged In!", StatusCode::OK))
}

#[get("/logout")]
pub async fn logout(state: web::Data<AppState>, _claims: AuthClaims) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie(&state.session))
        .json(json!({"success": true, "message": "Logged out"}))
}

#[get("/me")]
#[instrument(skip(state, claims))]
pub async fn me(state: web::Data<AppState>, claims: AuthClaims) -> Result<HttpResponse, AppError> {
    let user = state.auth_handler.get_user(&claims.user_id()?).await?;

    Ok(HttpResponse::Ok().json(json!({"success": true, "user": user})))
}

#[put("/me/profile")]
#[instrument(skip(state, claims, form))]
pub async fn update_profile(
    state: web::Data<AppState>,
    claims: AuthClaims,
    form: MultipartForm<UserUpload>,
) -> Result<HttpResponse, AppError> {
    let (update, files) = form.into_inner().into_profile_update();
    let user = state
        .auth_handler
        .update_profile(&claims.user_id()?, update, files)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Profile Updated!",
        "user": user
    })))
}

#[put("/password")]
#[instrument(skip(state, claims, request))]
pub async fn update_password(
    state: web::Data<AppState>,
    claims: AuthClaims,
    request: web::Json<UpdatePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    state
        .auth_handler
        .update_password(&claims.user_id()?, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({"success": true, "message": "Password Updated!"})))
}

#[post("/password/forgot")]
#[instrument(skip(state, request))]
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let email = state.auth_handler.forgot_password(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": format!("Email sent to {} successfully", email)
    })))
}

#[put("/password/reset/{token}")]
#[instrument(skip(state, token, request))]
pub async fn reset_password(
    state: web::Data<AppState>,
    token: web::Path<String>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let grant = state
        .auth_handler
        .reset_password(&token.into_inner(), request.into_inner())
        .await?;

    Ok(send_token(&state.session, grant, "Reset Password Successfully", StatusCode::OK))
}

#[get("/portfolio")]
#[instrument(skip(state))]
pub async fn portfolio(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let user = state.auth_handler.get_portfolio_user().await?;

    Ok(HttpResponse::Ok().json(json!({"success": true, "user": user})))
}
