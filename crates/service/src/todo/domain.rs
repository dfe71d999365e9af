use serde::{Deserialize, Deserializer, Serialize};

use models::todo::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};

use crate::validation::{FieldRules, Rule, Schema, Validate};

pub use models::todo::{Model as Todo, TodoStatus};

pub const NOT_FOUND_MESSAGE: &str = "Todoリストが見つかりません。";
pub const DELETED_MESSAGE: &str = "Todoリストを削除しました。";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Omitted or null stores 0.
    #[serde(default)]
    pub status: Option<i32>,
}

impl Validate for CreateTodoInput {
    const SCHEMA: Schema = &[
        FieldRules { field: "title", rules: &[Rule::Required, Rule::String, Rule::Max(TITLE_MAX_CHARS)] },
        FieldRules { field: "description", rules: &[Rule::Nullable, Rule::String, Rule::Max(DESCRIPTION_MAX_CHARS)] },
        FieldRules { field: "status", rules: &[Rule::Nullable, Rule::Integer] },
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodoInput {
    pub title: String,
    /// `None`: field absent, keep. `Some(None)`: explicit null, clear.
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    pub status: i32,
}

impl Validate for UpdateTodoInput {
    const SCHEMA: Schema = &[
        FieldRules { field: "title", rules: &[Rule::Required, Rule::String, Rule::Max(TITLE_MAX_CHARS)] },
        FieldRules { field: "description", rules: &[Rule::Nullable, Rule::String, Rule::Max(DESCRIPTION_MAX_CHARS)] },
        FieldRules { field: "status", rules: &[Rule::Required, Rule::Integer] },
    ];
}

fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_description_is_tri_state() {
        let absent: UpdateTodoInput = serde_json::from_value(json!({"title": "t", "status": 1})).unwrap();
        assert_eq!(absent.description, None);
        let null: UpdateTodoInput = serde_json::from_value(json!({"title": "t", "description": null, "status": 1})).unwrap();
        assert_eq!(null.description, Some(None));
        let set: UpdateTodoInput = serde_json::from_value(json!({"title": "t", "description": "d", "status": 1})).unwrap();
        assert_eq!(set.description, Some(Some("d".into())));
    }

    #[test]
    fn create_defaults() {
        let input: CreateTodoInput = serde_json::from_value(json!({"title": "x"})).unwrap();
        assert_eq!(input.description, None);
        assert_eq!(input.status, None);
    }
}
