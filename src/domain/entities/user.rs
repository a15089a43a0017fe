use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;

use crate::domain::password::validate_password_strength;
use crate::entities::asset::{non_empty_upload, AssetRef, UploadedFile};
use crate::entities::form_fields;


/// The portfolio owner as stored. Never serialized directly; see [`PublicUser`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub about_me: String,
    pub password_hash: String,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub instagram_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub facebook_url: Option<String>,
    #[sqlx(json)]
    pub avatar: AssetRef,
    #[sqlx(json)]
    pub resume: AssetRef,
    pub reset_password_token: Option<String>,
    pub reset_password_expire: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserInsert {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub about_me: String,
    pub password_hash: String,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub instagram_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub facebook_url: Option<String>,
    pub avatar: AssetRef,
    pub resume: AssetRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserInsert {
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            about_me: self.about_me,
            password_hash: self.password_hash,
            portfolio_url: self.portfolio_url,
            github_url: self.github_url,
            instagram_url: self.instagram_url,
            twitter_url: self.twitter_url,
            linkedin_url: self.linkedin_url,
            facebook_url: self.facebook_url,
            avatar: self.avatar,
            resume: self.resume,
            reset_password_token: None,
            reset_password_expire: None,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub about_me: String,
    pub portfolio_url: Option<String>,
    pub github_url: Option<String>,
    pub instagram_url: Option<String>,
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub facebook_url: Option<String>,
    pub avatar: AssetRef,
    pub resume: AssetRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            about_me: user.about_me,
            portfolio_url: user.portfolio_url,
            github_url: user.github_url,
            instagram_url: user.instagram_url,
            twitter_url: user.twitter_url,
            linkedin_url: user.linkedin_url,
            facebook_url: user.facebook_url,
            avatar: user.avatar,
            resume: user.resume,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Default, Clone, Validate)]
pub struct NewUser {
    #[validate(
        required(message = "Full name is required"),
        length(min = 1, max = 100, message = "Full name must be between 1 and 100 characters")
    )]
    pub full_name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub email: Option<String>,

    #[validate(required(message = "Phone number is required"))]
    pub phone: Option<String>,

    #[validate(required(message = "About me field is required"))]
    pub about_me: Option<String>,

    #[validate(
        required(message = "Password is required"),
        custom(function = "validate_password_strength")
    )]
    pub password: Option<String>,

    #[validate(url(message = "Portfolio URL must be a valid URL"))]
    pub portfolio_url: Option<String>,
    #[validate(url(message = "GitHub URL must be a valid URL"))]
    pub github_url: Option<String>,
    #[validate(url(message = "Instagram URL must be a valid URL"))]
    pub instagram_url: Option<String>,
    #[validate(url(message = "Twitter URL must be a valid URL"))]
    pub twitter_url: Option<String>,
    #[validate(url(message = "LinkedIn URL must be a valid URL"))]
    pub linkedin_url: Option<String>,
    #[validate(url(message = "Facebook URL must be a valid URL"))]
    pub facebook_url: Option<String>,
}

impl NewUser {
    pub fn prepare_for_insert(
        self,
        password_hash: String,
        avatar: AssetRef,
        resume: AssetRef,
    ) -> UserInsert {
        let now = Utc::now();
        UserInsert {
            full_name: self.full_name.unwrap_or_default(),
            email: self.email.unwrap_or_default().to_lowercase(),
            phone: self.phone.unwrap_or_default(),
            about_me: self.about_me.unwrap_or_default(),
            password_hash,
            portfolio_url: self.portfolio_url,
            github_url: self.github_url,
            instagram_url: self.instagram_url,
            twitter_url: self.twitter_url,
            linkedin_url: self.linkedin_url,
            facebook_url: self.facebook_url,
            avatar,
            resume,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default, Clone, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 1, max = 100, message = "Full name must be between 1 and 100 characters"))]
    pub full_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub about_me: Option<String>,
    #[validate(url(message = "Portfolio URL must be a valid URL"))]
    pub portfolio_url: Option<String>,
    #[validate(url(message = "GitHub URL must be a valid URL"))]
    pub github_url: Option<String>,
    #[validate(url(message = "Instagram URL must be a valid URL"))]
    pub instagram_url: Option<String>,
    #[validate(url(message = "Twitter URL must be a valid URL"))]
    pub twitter_url: Option<String>,
    #[validate(url(message = "LinkedIn URL must be a valid URL"))]
    pub linkedin_url: Option<String>,
    #[validate(url(message = "Facebook URL must be a valid URL"))]
    pub facebook_url: Option<String>,
}

impl User {
    pub fn apply(&mut self, update: UpdateProfile) {
        if let Some(full_name) = update.full_name {
            self.full_name = full_name;
        }
        if let Some(email) = update.email {
            self.email = email.to_lowercase();
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(about_me) = update.about_me {
            self.about_me = about_me;
        }
        if update.portfolio_url.is_some() {
            self.portfolio_url = update.portfolio_url;
        }
        if update.github_url.is_some() {
            self.github_url = update.github_url;
        }
        if update.instagram_url.is_some() {
            self.instagram_url = update.instagram_url;
        }
        if update.twitter_url.is_some() {
            self.twitter_url = update.twitter_url;
        }
        if update.linkedin_url.is_some() {
            self.linkedin_url = update.linkedin_url;
        }
        if update.facebook_url.is_some() {
            self.facebook_url = update.facebook_url;
        }
        self.updated_at = Utc::now();
    }

    /// A reset token is only usable while its expiry lies in the future.
    pub fn reset_token_is_live(&self, now: DateTime<Utc>) -> bool {
        self.reset_password_token.is_some()
            && self.reset_password_expire.is_some_and(|expire| expire > now)
    }

    pub fn clear_reset_token(&mut self) {
        self.reset_password_token = None;
        self.reset_password_expire = None;
    }
}

// ───── Multipart Input ──────────────────────────────────────────────

#[derive(Debug, MultipartForm)]
pub struct UserUpload {
    pub full_name: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub phone: Option<Text<String>>,
    pub about_me: Option<Text<String>>,
    pub password: Option<Text<String>>,
    pub portfolio_url: Option<Text<String>>,
    pub github_url: Option<Text<String>>,
    pub instagram_url: Option<Text<String>>,
    pub twitter_url: Option<Text<String>>,
    pub linkedin_url: Option<Text<String>>,
    pub facebook_url: Option<Text<String>>,
    #[multipart(limit = "5MB")]
    pub avatar: Option<TempFile>,
    #[multipart(limit = "10MB")]
    pub resume: Option<TempFile>,
}

/// Files accompanying a registration or profile update.
#[derive(Debug, Default)]
pub struct ProfileFiles {
    pub avatar: Option<UploadedFile>,
    pub resume: Option<UploadedFile>,
}

impl UserUpload {
    pub fn into_new_user(self) -> (NewUser, ProfileFiles) {
        let request = NewUser {
            full_name: form_fields::text(self.full_name),
            email: form_fields::text(self.email),
            phone: form_fields::text(self.phone),
            about_me: form_fields::text(self.about_me),
            password: self.password.map(Text::into_inner).filter(|p| !p.is_empty()),
            portfolio_url: form_fields::text(self.portfolio_url),
            github_url: form_fields::text(self.github_url),
            instagram_url: form_fields::text(self.instagram_url),
            twitter_url: form_fields::text(self.twitter_url),
            linkedin_url: form_fields::text(self.linkedin_url),
            facebook_url: form_fields::text(self.facebook_url),
        };
        let files = ProfileFiles {
            avatar: non_empty_upload(self.avatar),
            resume: non_empty_upload(self.resume),
        };
        (request, files)
    }

    /// Password parts are ignored here; passwords change through their own endpoints.
    pub fn into_profile_update(self) -> (UpdateProfile, ProfileFiles) {
        let update = UpdateProfile {
            full_name: form_fields::text(self.full_name),
            email: form_fields::text(self.email),
            phone: form_fields::text(self.phone),
            about_me: form_fields::text(self.about_me),
            portfolio_url: form_fields::text(self.portfolio_url),
            github_url: form_fields::text(self.github_url),
            instagram_url: form_fields::text(self.instagram_url),
            twitter_url: form_fields::text(self.twitter_url),
            linkedin_url: form_fields::text(self.linkedin_url),
            facebook_url: form_fields::text(self.facebook_url),
        };
        let files = ProfileFiles {
            avatar: non_empty_upload(self.avatar),
            resume: non_empty_upload(self.resume),
        };
        (update, files)
    }
}

// ───── JSON Input ───────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginUser {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password confirmation is required"))]
    pub confirm_new_password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password confirmation is required"))]
    pub confirm_password: String,
}
