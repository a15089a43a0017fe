use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

// Destination folders on the media host.
pub const AVATAR_FOLDER: &str = "AVATARS";
pub const RESUME_FOLDER: &str = "MY_RESUME";
pub const PROJECT_BANNER_FOLDER: &str = "PROJECT IMAGES";
pub const SKILL_SVG_FOLDER: &str = "PORTFOLIO_SKILLS-SVGS";
pub const SOFTWARE_APPLICATION_FOLDER: &str = "PORTFOLIO_SOFTWARE_APPLICATION";

pub const RESET_PASSWORD_SUBJECT: &str = "Personal portfolio dashboard recovery password";
