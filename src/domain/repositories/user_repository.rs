use async_trait::async_trait;

use crate::domain::entities::user::User;
use anyhow::Result;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores the user unless its email is already taken, in which case
    /// nothing is written and `None` comes back.
    async fn create(&self, user: &User) -> Result<Option<User>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_all(&self) -> Result<Vec<User>>;
}
