use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::reset_token::{generate_reset_token, hash_reset_token};
use crate::constants::{AVATAR_FOLDER, RESET_PASSWORD_SUBJECT, RESUME_FOLDER};
use crate::domain::password::validate_password_strength;
use crate::entities::token::SessionGrant;
use crate::entities::user::{
    ForgotPasswordRequest, LoginUser, NewUser, ProfileFiles, PublicUser, ResetPasswordRequest,
    UpdatePasswordRequest, UpdateProfile, User,
};
use crate::errors::AppError;
use crate::repositories::{
    asset_store::AssetStore,
    mailer::{MailMessage, Mailer},
    token::TokenServiceRepository,
    user::UserRepository,
};
use crate::settings::AppConfig;
use crate::use_cases::assets::{discard_all, discard_asset, upload_asset, upload_optional};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const INVALID_RESET_TOKEN: &str = "Reset password token is invalid or has been expired";

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub dashboard_url: String,
    pub reset_token_ttl: Duration,
    pub portfolio_owner_id: Option<Uuid>,
}

impl From<&AppConfig> for AuthSettings {
    fn from(config: &AppConfig) -> Self {
        AuthSettings {
            dashboard_url: config.dashboard_url.trim_end_matches('/').to_string(),
            reset_token_ttl: Duration::minutes(config.reset_token_exp_minutes),
            portfolio_owner_id: config.portfolio_owner_id,
        }
    }
}

pub struct AuthHandler<R, T, A, M>
where
    R: UserRepository,
    T: TokenServiceRepository,
    A: AssetStore,
    M: Mailer,
{
    pub user_repo: R,
    pub token_service: T,
    pub assets: A,
    pub mailer: M,
    pub settings: AuthSettings,
}

impl<R, T, A, M> AuthHandler<R, T, A, M>
where
    R: UserRepository,
    T: TokenServiceRepository,
    A: AssetStore,
    M: Mailer,
{
    pub fn new(user_repo: R, token_service: T, assets: A, mailer: M, settings: AuthSettings) -> Self {
        AuthHandler {
            user_repo,
            token_service,
            assets,
            mailer,
            settings,
        }
    }

    /// Registers the portfolio owner. Both files are required; nothing is
    /// uploaded until the fields validate, the email is known to be free and
    /// no owner has been registered yet.
    pub async fn register(&self, request: NewUser, files: ProfileFiles) -> Result<SessionGrant, AppError> {
        request.validate()?;
        let (avatar_file, resume_file) = match (files.avatar, files.resume) {
            (Some(avatar), Some(resume)) => (avatar, resume),
            _ => return Err(AppError::validation("avatar", "Avatar and resume are required")),
        };

        let email = request.email.as_deref().unwrap_or_default();
        if self.user_repo.get_user_by_email(email).await?.is_some() {
            return Err(AppError::Conflict("User with this email already exists".into()));
        }
        if self.user_repo.get_first_user().await?.is_some() {
            tracing::warn!("Registration attempted after the portfolio owner was registered");
            return Err(AppError::Conflict("Portfolio owner is already registered".into()));
        }

        let password_hash = hash_password(request.password.as_deref().unwrap_or_default())?;

        let avatar = upload_asset(&self.assets, &avatar_file, AVATAR_FOLDER).await?;
        let resume = match upload_asset(&self.assets, &resume_file, RESUME_FOLDER).await {
            Ok(resume) => resume,
            Err(e) => {
                discard_asset(&self.assets, &avatar).await;
                return Err(e);
            }
        };

        let insert = request.prepare_for_insert(password_hash, avatar.clone(), resume.clone());
        let user = match self.user_repo.create_user(&insert).await {
            Ok(user) => user,
            Err(e) => {
                discard_all(&self.assets, [avatar, resume]).await;
                return Err(e);
            }
        };

        tracing::info!(user_id = %user.id, "User registered");
        self.issue_token(user)
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, request: LoginUser) -> Result<SessionGrant, AppError> {
        request
            .validate()
            .map_err(|_| AppError::BadRequest("Email and password are required".into()))?;

        let user = self
            .user_repo
            .get_user_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.into()))?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|e| {
                tracing::warn!(user_id = %user.id, "Stored password hash unusable: {}", e);
                AppError::Unauthorized(INVALID_CREDENTIALS.into())
            })?;
        if !is_password_valid {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        tracing::info!(user_id = %user.id, "User logged in");
        self.issue_token(user)
    }

    pub fn issue_token(&self, user: User) -> Result<SessionGrant, AppError> {
        let token = self.token_service.create_jwt(&user.id)?;
        Ok(SessionGrant { user: user.into(), token })
    }

    async fn find_user(&self, id: &Uuid) -> Result<User, AppError> {
        self.user_repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    pub async fn get_user(&self, id: &Uuid) -> Result<PublicUser, AppError> {
        self.find_user(id).await.map(PublicUser::from)
    }

    /// The configured owner when set, otherwise the earliest registered user.
    pub async fn get_portfolio_user(&self) -> Result<PublicUser, AppError> {
        let owner = match self.settings.portfolio_owner_id {
            Some(id) => self.user_repo.get_user_by_id(&id).await?,
            None => self.user_repo.get_first_user().await?,
        };

        owner
            .map(PublicUser::from)
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    pub async fn update_profile(
        &self,
        id: &Uuid,
        update: UpdateProfile,
        files: ProfileFiles,
    ) -> Result<PublicUser, AppError> {
        update.validate()?;
        let mut user = self.find_user(id).await?;

        let new_avatar = upload_optional(&self.assets, files.avatar.as_ref(), AVATAR_FOLDER).await?;
        let new_resume = match upload_optional(&self.assets, files.resume.as_ref(), RESUME_FOLDER).await {
            Ok(resume) => resume,
            Err(e) => {
                discard_all(&self.assets, new_avatar).await;
                return Err(e);
            }
        };

        user.apply(update);
        let old_avatar = new_avatar
            .as_ref()
            .map(|avatar| std::mem::replace(&mut user.avatar, avatar.clone()));
        let old_resume = new_resume
            .as_ref()
            .map(|resume| std::mem::replace(&mut user.resume, resume.clone()));

        match self.user_repo.save_user(&user).await {
            Ok(saved) => {
                discard_all(&self.assets, old_avatar.into_iter().chain(old_resume)).await;
                tracing::info!(user_id = %saved.id, "Profile updated");
                Ok(saved.into())
            }
            Err(e) => {
                discard_all(&self.assets, new_avatar.into_iter().chain(new_resume)).await;
                Err(e)
            }
        }
    }

    pub async fn update_password(&self, id: &Uuid, request: UpdatePasswordRequest) -> Result<(), AppError> {
        request.validate()?;
        if request.new_password != request.confirm_new_password {
            return Err(AppError::BadRequest("New password and confirmation do not match".into()));
        }
        check_strength("new_password", &request.new_password)?;

        let mut user = self.find_user(id).await?;
        if !verify_password(&request.current_password, &user.password_hash)? {
            return Err(AppError::BadRequest("Incorrect current password".into()));
        }

        user.password_hash = hash_password(&request.new_password)?;
        self.user_repo.save_user(&user).await?;

        tracing::info!(user_id = %user.id, "Password updated");
        Ok(())
    }

    /// Mails a one-time reset link. Only the token's hash is stored; if the
    /// mail cannot be sent the stored token is withdrawn again.
    pub async fn forgot_password(&self, request: ForgotPasswordRequest) -> Result<String, AppError> {
        request.validate()?;

        let mut user = self
            .user_repo
            .get_user_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        let token = generate_reset_token();
        user.reset_password_token = Some(token.digest);
        user.reset_password_expire = Some(Utc::now() + self.settings.reset_token_ttl);
        let mut user = self.user_repo.save_user(&user).await?;

        let reset_url = format!("{}/password/reset/{}", self.settings.dashboard_url, token.plain);
        let message = MailMessage {
            to: user.email.clone(),
            subject: RESET_PASSWORD_SUBJECT.to_string(),
            body: format!(
                "Your reset password token is:\n\n{}\n\nIf you have not requested this, please ignore it.",
                reset_url
            ),
        };

        if let Err(e) = self.mailer.send(&message).await {
            tracing::error!(user_id = %user.id, error = %e, "Reset email failed, withdrawing token");
            user.clear_reset_token();
            if let Err(clear_err) = self.user_repo.save_user(&user).await {
                tracing::error!(user_id = %user.id, "Could not withdraw reset token: {}", clear_err);
            }
            return Err(e.into());
        }

        Ok(user.email)
    }

    pub async fn reset_password(&self, token: &str, request: ResetPasswordRequest) -> Result<SessionGrant, AppError> {
        request.validate()?;

        let now = Utc::now();
        let mut user = self
            .user_repo
            .get_user_by_reset_token(&hash_reset_token(token), now)
            .await?
            .filter(|user| user.reset_token_is_live(now))
            .ok_or_else(|| AppError::BadRequest(INVALID_RESET_TOKEN.into()))?;

        if request.password != request.confirm_password {
            return Err(AppError::BadRequest("Password and confirm password do not match".into()));
        }
        check_strength("password", &request.password)?;

        user.password_hash = hash_password(&request.password)?;
        user.clear_reset_token();
        let user = self.user_repo.save_user(&user).await?;

        tracing::info!(user_id = %user.id, "Password reset");
        self.issue_token(user)
    }
}

fn check_strength(field: &str, password: &str) -> Result<(), AppError> {
    validate_password_strength(password).map_err(|e| {
        let message = e
            .message
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Password is too weak".to_string());
        AppError::validation(field, message)
    })
}
