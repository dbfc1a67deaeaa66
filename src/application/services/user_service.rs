use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::application::ports::in_ports::{
    UserAuthenticationUseCase, UserProfileUseCase, UserRegistrationUseCase,
};
use crate::domain::entities::user::{AuthToken, NewUser, User, UserLogin};
use crate::domain::repositories::UserRepository;
use crate::domain::services::PasswordService;
use crate::domain::{DomainError, DomainResult};

const USER_EXISTS: &str = "User already exists";

/// Longest token lifetime accepted from configuration (ten years).
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365 * 10;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl UserService {
    /// `token_ttl_hours` is capped at `MAX_TOKEN_TTL_HOURS`.
    pub fn new(user_repository: Arc<dyn UserRepository>, jwt_secret: String, token_ttl_hours: u64) -> Self {
        let hours = token_ttl_hours.min(MAX_TOKEN_TTL_HOURS) as i64;
        Self {
            user_repository,
            jwt_secret,
            token_ttl: Duration::try_hours(hours).unwrap_or(Duration::zero()),
        }
    }

    fn generate_token(&self, user_id: &str) -> DomainResult<AuthToken> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.token_ttl)
            .context("Token expiry out of range")?;
        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .context("Failed to sign token")?;

        Ok(AuthToken { token, expires_at })
    }

    fn decode_token(&self, token: &str) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| DomainError::unauthorized("Invalid or expired token"))?;

        Ok(token_data.claims)
    }
}

#[async_trait]
impl UserRegistrationUseCase for UserService {
    async fn register_user(&self, new_user: NewUser) -> DomainResult<User> {
        let name = new_user.name.trim();
        let email = new_user.email.trim();
        if name.is_empty() || email.is_empty() || new_user.password.is_empty() {
            return Err(DomainError::validation("All fields are required"));
        }

        // Early exit before hashing; `create` repeats the check atomically.
        if self.user_repository.find_by_email(email).await?.is_some() {
            return Err(DomainError::conflict(USER_EXISTS));
        }

        let password_hash = PasswordService::hash_on_blocking_pool(new_user.password).await?;

        let user = User::new(name.to_string(), email.to_string(), password_hash);
        let Some(created_user) = self.user_repository.create(&user).await? else {
            return Err(DomainError::conflict(USER_EXISTS));
        };

        info!(user_id = %created_user.id, "registered new user");
        Ok(created_user)
    }
}

#[async_trait]
impl UserAuthenticationUseCase for UserService {
    async fn login(&self, credentials: UserLogin) -> DomainResult<(User, AuthToken)> {
        let email = credentials.email.trim();
        if email.is_empty() || credentials.password.is_empty() {
            return Err(DomainError::validation("Email and password are required"));
        }

        let user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => return Err(DomainError::not_found("User not found")),
        };

        let is_valid =
            PasswordService::verify_on_blocking_pool(credentials.password, user.password_hash.clone()).await?;
        if !is_valid {
            warn!(user_id = %user.id, "rejected login with wrong password");
            return Err(DomainError::InvalidCredentials("Invalid credentials".into()));
        }

        let token = self.generate_token(&user.id)?;

        info!(user_id = %user.id, "user logged in");
        Ok((user, token))
    }

    async fn validate_token(&self, token: &str) -> DomainResult<String> {
        self.decode_token(token).map(|claims| claims.sub)
    }
}

#[async_trait]
impl UserProfileUseCase for UserService {
    async fn get_user_profile(&self, user_id: &str) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestStore;

    fn service(store: &TestStore, ttl_hours: u64) -> UserService {
        UserService::new(store.users(), "test-secret".into(), ttl_hours)
    }

    fn ada() -> NewUser {
        NewUser {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "correct horse".into(),
        }
    }

    #[tokio::test]
    async fn register_hashes_the_password() {
        let store = TestStore::new().await;
        let user = service(&store, 24).register_user(ada()).await.unwrap();

        assert_ne!(user.password_hash, "correct horse");
        assert!(PasswordService::verify("correct horse", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = TestStore::new().await;
        let users = service(&store, 24);
        users.register_user(ada()).await.unwrap();

        let err = users.register_user(ada()).await.unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(store.users().find_all().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn simultaneous_registrations_store_one_user() {
        let store = TestStore::new().await;
        let users = Arc::new(service(&store, 24));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let users = users.clone();
                tokio::spawn(async move { users.register_user(ada()).await })
            })
            .collect();
        let mut registered = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => registered += 1,
                Err(err) => assert!(matches!(err, DomainError::Conflict(msg) if msg == USER_EXISTS)),
            }
        }

        assert_eq!(registered, 1);
        assert_eq!(store.users().find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn oversized_ttl_is_capped() {
        let store = TestStore::new().await;
        let users = service(&store, u64::MAX);

        assert_eq!(users.token_ttl, Duration::hours(MAX_TOKEN_TTL_HOURS as i64));
        assert!(users.generate_token("someone").is_ok());
    }

    #[tokio::test]
    async fn register_requires_every_field() {
        let store = TestStore::new().await;
        let err = service(&store, 24)
            .register_user(NewUser { name: " ".into(), ..ada() })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(msg) if msg == "All fields are required"));
    }

    #[tokio::test]
    async fn login_outcomes() {
        let store = TestStore::new().await;
        let users = service(&store, 24);
        users.register_user(ada()).await.unwrap();

        let wrong = users
            .login(UserLogin { email: "ada@example.com".into(), password: "nope".into() })
            .await
            .unwrap_err();
        assert!(matches!(wrong, DomainError::InvalidCredentials(_)));
        assert!(!wrong.to_string().contains("argon2"));

        let unknown = users
            .login(UserLogin { email: "bob@example.com".into(), password: "nope".into() })
            .await
            .unwrap_err();
        assert!(matches!(unknown, DomainError::NotFound(_)));

        let (user, token) = users
            .login(UserLogin { email: "ada@example.com".into(), password: "correct horse".into() })
            .await
            .unwrap();
        assert_eq!(users.validate_token(&token.token).await.unwrap(), user.id);
        assert_eq!(users.get_user_profile(&user.id).await.unwrap().email, "ada@example.com");
    }

    #[tokio::test]
    async fn tokens_from_another_secret_are_rejected() {
        let store = TestStore::new().await;
        let users = service(&store, 24);
        let user = users.register_user(ada()).await.unwrap();

        let foreign = UserService::new(store.users(), "other-secret".into(), 24)
            .generate_token(&user.id)
            .unwrap();

        let err = users.validate_token(&foreign.token).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn expired_tokens_are_rejected() {
        let store = TestStore::new().await;
        let mut users = service(&store, 24);
        let user = users.register_user(ada()).await.unwrap();

        // past the 60s leeway jsonwebtoken allows by default
        users.token_ttl = Duration::minutes(-5);
        let token = users.generate_token(&user.id).unwrap();

        assert!(users.validate_token(&token.token).await.is_err());
    }
}
