use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{AuthContext, AuthSession, AuthUser, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::password;
use super::repository::AuthRepository;
use super::token;
use crate::validation::{unique_message, ValidationErrors};

/// Auth service configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Label stored with every issued token.
    pub token_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { token_name: "auth_token".into() }
    }
}

/// Auth business service independent of web framework.
///
/// Inputs are expected to have passed their schema already; the service only
/// enforces rules that need the store (email uniqueness, credentials, tokens).
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new user and issue their first token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, AuthConfig, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::default());
    /// let input = RegisterInput { name: "Test".into(), email: "user@example.com".into(), password: "Secret123".into() };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "user@example.com");
    /// assert!(session.token.contains('|'));
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        if let Some(existing) = self.repo.find_user_by_email(&input.email).await? {
            debug!(user_id = existing.id, "email already registered");
            return Err(ValidationErrors::single("email", unique_message("email")).into());
        }

        let hash = password::hash_password(&input.password)?;
        let user = self.repo.create_user(&input.name, &input.email, &hash).await?;
        let token = self.issue_token(&user).await?;
        info!(user_id = user.id, "user_registered");
        Ok(AuthSession { user, token })
    }

    /// Check credentials and issue a new token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, AuthConfig, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo.clone(), AuthConfig::default());
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { name: "N".into(), email: "u@e.com".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let Some(user) = self.repo.find_user_by_email(&input.email).await? else {
            password::burn_verify(&input.password);
            warn!("login_failed");
            return Err(AuthError::InvalidCredentials);
        };

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(&input.password, &cred.password_hash)? {
            warn!(user_id = user.id, "login_failed");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(&user).await?;
        info!(user_id = user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    /// Resolve a presented bearer token to its user.
    #[instrument(skip_all)]
    pub async fn resolve_token(&self, presented: &str) -> Result<AuthContext, AuthError> {
        let (id, secret) = token::parse(presented).ok_or(AuthError::Unauthenticated)?;
        let stored = self.repo
            .find_token_by_hash(&token::hash_secret(secret))
            .await?
            .ok_or(AuthError::Unauthenticated)?;
        if id.is_some_and(|id| id != stored.id) {
            return Err(AuthError::Unauthenticated);
        }
        let user = self.repo
            .find_user_by_id(stored.user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;
        self.repo.touch_token(stored.id).await?;
        Ok(AuthContext { user, token_id: stored.id })
    }

    /// Revoke exactly the given token. Revoking twice is an error.
    #[instrument(skip(self))]
    pub async fn logout(&self, token_id: i32) -> Result<(), AuthError> {
        if !self.repo.delete_token(token_id).await? {
            return Err(AuthError::Unauthenticated);
        }
        info!("token_revoked");
        Ok(())
    }

    async fn issue_token(&self, user: &AuthUser) -> Result<String, AuthError> {
        let secret = token::generate_secret();
        let stored = self.repo
            .create_token(user.id, &self.cfg.token_name, &token::hash_secret(&secret))
            .await?;
        Ok(token::plain_text(stored.id, &secret))
    }
}
