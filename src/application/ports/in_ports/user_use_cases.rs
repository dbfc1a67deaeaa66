use async_trait::async_trait;

use crate::domain::entities::user::{AuthToken, NewUser, User, UserLogin};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRegistrationUseCase: Send + Sync {
    async fn register_user(&self, new_user: NewUser) -> DomainResult<User>;
}

#[async_trait]
pub trait UserAuthenticationUseCase: Send + Sync {
    async fn login(&self, credentials: UserLogin) -> DomainResult<(User, AuthToken)>;
    /// Returns the user id carried by a valid token.
    async fn validate_token(&self, token: &str) -> DomainResult<String>;
}

#[async_trait]
pub trait UserProfileUseCase: Send + Sync {
    async fn get_user_profile(&self, user_id: &str) -> DomainResult<User>;
}
