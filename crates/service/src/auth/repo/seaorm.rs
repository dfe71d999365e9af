use sea_orm::DatabaseConnection;

use crate::auth::domain::{AccessToken, AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

use models::{personal_access_token, user};

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_access_token(t: personal_access_token::Model) -> AccessToken {
    AccessToken { id: t.id, user_id: t.user_id, name: t.name, token_hash: t.token }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        Ok(user::find_by_email(&self.db, email).await?.map(AuthUser::from))
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<AuthUser>, AuthError> {
        Ok(user::find_by_id(&self.db, id).await?.map(AuthUser::from))
    }

    async fn create_user(&self, name: &str, email: &str, password_hash: &str) -> Result<AuthUser, AuthError> {
        let created = user::create(&self.db, name, email, password_hash).await?;
        Ok(created.into())
    }

    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
        let found = user::find_by_id(&self.db, user_id).await?;
        Ok(found.map(|u| Credentials { user_id: u.id, password_hash: u.password }))
    }

    async fn create_token(&self, user_id: i32, name: &str, token_hash: &str) -> Result<AccessToken, AuthError> {
        let created = personal_access_token::create(&self.db, user_id, name, token_hash).await?;
        Ok(to_access_token(created))
    }

    async fn find_token_by_hash(&self, token_hash: &str) -> Result<Option<AccessToken>, AuthError> {
        Ok(personal_access_token::find_by_hash(&self.db, token_hash).await?.map(to_access_token))
    }

    async fn touch_token(&self, id: i32) -> Result<(), AuthError> {
        Ok(personal_access_token::touch(&self.db, id).await?)
    }

    async fn delete_token(&self, id: i32) -> Result<bool, AuthError> {
        Ok(personal_access_token::delete(&self.db, id).await?)
    }
}
