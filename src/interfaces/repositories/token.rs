use jsonwebtoken::TokenData;
use uuid::Uuid;
use crate::{entities::token::Claims, errors::AuthError};


pub trait TokenServiceRepository: Send + Sync {
    /// Creates a signed session token for the user
    fn create_jwt(&self, user_id: &Uuid) -> Result<String, AuthError>;

    /// Decodes a session token and returns the claims
    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;
}
