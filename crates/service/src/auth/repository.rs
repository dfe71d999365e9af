use async_trait::async_trait;

use super::domain::{AccessToken, AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user_by_id(&self, id: i32) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(&self, name: &str, email: &str, password_hash: &str) -> Result<AuthUser, AuthError>;
    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError>;

    async fn create_token(&self, user_id: i32, name: &str, token_hash: &str) -> Result<AccessToken, AuthError>;
    async fn find_token_by_hash(&self, token_hash: &str) -> Result<Option<AccessToken>, AuthError>;
    async fn touch_token(&self, id: i32) -> Result<(), AuthError>;
    /// Returns whether a token was removed.
    async fn delete_token(&self, id: i32) -> Result<bool, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    use chrono::Utc;
    use models::errors::ModelError;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<Vec<(AuthUser, Credentials)>>,
        tokens: Mutex<Vec<AccessToken>>,
    }

    impl MockAuthRepository {
        pub fn user_count(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        pub fn token_count(&self) -> usize {
            self.tokens.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|(u, _)| u.email == email).map(|(u, _)| u.clone()))
        }

        async fn find_user_by_id(&self, id: i32) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
        }

        async fn create_user(&self, name: &str, email: &str, password_hash: &str) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|(u, _)| u.email == email) {
                return Err(ModelError::Unique("email".into()).into());
            }
            let now: chrono::DateTime<chrono::FixedOffset> = Utc::now().into();
            let id = users.len() as i32 + 1;
            let user = AuthUser { id, name: name.to_string(), email: email.to_string(), created_at: now, updated_at: now };
            let creds = Credentials { user_id: id, password_hash: password_hash.to_string() };
            users.push((user.clone(), creds));
            Ok(user)
        }

        async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|(u, _)| u.id == user_id).map(|(_, c)| c.clone()))
        }

        async fn create_token(&self, user_id: i32, name: &str, token_hash: &str) -> Result<AccessToken, AuthError> {
            let mut tokens = self.tokens.lock().unwrap();
            let id = tokens.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            let t = AccessToken { id, user_id, name: name.to_string(), token_hash: token_hash.to_string() };
            tokens.push(t.clone());
            Ok(t)
        }

        async fn find_token_by_hash(&self, token_hash: &str) -> Result<Option<AccessToken>, AuthError> {
            let tokens = self.tokens.lock().unwrap();
            Ok(tokens.iter().find(|t| t.token_hash == token_hash).cloned())
        }

        async fn touch_token(&self, _id: i32) -> Result<(), AuthError> {
            Ok(())
        }

        async fn delete_token(&self, id: i32) -> Result<bool, AuthError> {
            let mut tokens = self.tokens.lock().unwrap();
            let before = tokens.len();
            tokens.retain(|t| t.id != id);
            Ok(tokens.len() != before)
        }
    }
}
