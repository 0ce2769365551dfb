use jsonwebtoken::TokenData;
use uuid::Uuid;

use crate::entities::token::{Claims, RefreshClaims};
use crate::entities::user::User;
use crate::errors::AuthError;

/// Seam between the auth use case and the concrete JWT implementation.
pub trait TokenServiceRepository: Send + Sync {
    fn create_jwt(&self, user: &User) -> Result<String, AuthError>;
    fn create_refresh_jwt(&self, user_id: &Uuid) -> Result<String, AuthError>;
    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;
    fn decode_refresh_jwt(&self, token: &str) -> Result<TokenData<RefreshClaims>, AuthError>;
}
