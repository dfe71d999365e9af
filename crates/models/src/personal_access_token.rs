use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, EntityTrait, ColumnTrait, QueryFilter, ActiveModelTrait, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "personal_access_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    /// Hex SHA-256 of the token secret; the plaintext is never stored.
    #[serde(skip_serializing)]
    pub token: String,
    pub last_used_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    name: &str,
    token_hash: &str,
) -> Result<Model, ModelError> {
    if token_hash.len() != 64 {
        return Err(ModelError::Validation("token hash must be 64 hex chars".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        name: Set(name.to_string()),
        token: Set(token_hash.to_string()),
        last_used_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_hash(db: &DatabaseConnection, token_hash: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Token.eq(token_hash))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Record that the token was just presented.
pub async fn touch(db: &DatabaseConnection, id: i32) -> Result<(), ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await.map_err(|e| ModelError::Db(e.to_string()))? else {
        return Ok(());
    };
    let now = Utc::now().into();
    let mut am: ActiveModel = found.into();
    am.last_used_at = Set(Some(now));
    am.updated_at = Set(now);
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}

/// Hard delete. Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

pub async fn count_for_user(db: &DatabaseConnection, user_id: i32) -> Result<u64, ModelError> {
    use sea_orm::PaginatorTrait;
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .count(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}
