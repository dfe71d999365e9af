use sea_orm::{entity::prelude::*, ActiveValue::NotSet, QueryOrder, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const TITLE_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 255;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// See [`TodoStatus`]; unknown codes are stored as given.
    pub status: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Well-known status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoStatus {
    NotStarted,
    InProgress,
    Done,
}

impl TodoStatus {
    pub fn code(self) -> i32 {
        match self {
            TodoStatus::NotStarted => 0,
            TodoStatus::InProgress => 1,
            TodoStatus::Done => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(TodoStatus::NotStarted),
            1 => Some(TodoStatus::InProgress),
            2 => Some(TodoStatus::Done),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TodoStatus::NotStarted => "not started",
            TodoStatus::InProgress => "in progress",
            TodoStatus::Done => "done",
        }
    }
}

impl Model {
    pub fn is_deleted(&self) -> bool { self.deleted_at.is_some() }

    pub fn known_status(&self) -> Option<TodoStatus> { TodoStatus::from_code(self.status) }
}

fn check_lengths(title: &str, description: Option<&str>) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() { return Err(errors::ModelError::Validation("title required".into())); }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(errors::ModelError::Validation(format!("title longer than {TITLE_MAX_CHARS} chars")));
    }
    if description.is_some_and(|d| d.chars().count() > DESCRIPTION_MAX_CHARS) {
        return Err(errors::ModelError::Validation(format!("description longer than {DESCRIPTION_MAX_CHARS} chars")));
    }
    Ok(())
}

/// All rows whose `deleted_at` is null, oldest first.
pub async fn list_live(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::DeletedAt.is_null())
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Soft-deleted rows resolve to `None`, same as missing ones.
pub async fn find_live(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id)
        .filter(Column::DeletedAt.is_null())
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn create(db: &DatabaseConnection, title: &str, description: Option<&str>, status: i32) -> Result<Model, errors::ModelError> {
    check_lengths(title, description)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: NotSet,
        title: Set(title.to_string()),
        description: Set(description.map(str::to_string)),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite title and status of a live row. `description` is replaced only
/// when `Some`; `Some(None)` clears it. Returns `None` when the id does not
/// resolve to a live row.
pub async fn update_live(
    db: &DatabaseConnection,
    id: i32,
    title: &str,
    description: Option<Option<&str>>,
    status: i32,
) -> Result<Option<Model>, errors::ModelError> {
    check_lengths(title, description.flatten())?;
    let Some(found) = find_live(db, id).await? else { return Ok(None) };
    let mut am: ActiveModel = found.into();
    am.title = Set(title.to_string());
    if let Some(description) = description {
        am.description = Set(description.map(str::to_string));
    }
    am.status = Set(status);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}

/// Marks `deleted_at`. Returns `false` when the id does not resolve to a live row.
pub async fn soft_delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let Some(found) = find_live(db, id).await? else { return Ok(false) };
    let now = Utc::now().into();
    let mut am: ActiveModel = found.into();
    am.deleted_at = Set(Some(now));
    am.updated_at = Set(now);
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(true)
}

/// Fetch regardless of `deleted_at`.
pub async fn find_with_trashed(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
