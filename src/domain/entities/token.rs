use serde::{Serialize, Deserialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// Outcome of a successful register, login or password reset.
#[derive(Debug, Clone)]
pub struct SessionGrant {
    pub user: crate::entities::user::PublicUser,
    pub token: String,
}
