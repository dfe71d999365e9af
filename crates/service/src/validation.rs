//! Declarative request validation.
//!
//! Every operation that accepts a body declares a schema: an ordered list of
//! fields, each with the rules it must satisfy. The schema is evaluated once
//! against the raw JSON at the API boundary. Failures are collected per field
//! into [`ValidationErrors`], which serializes as `{"field": ["message", ..]}`
//! in schema order.
//!
//! Before rules run the body is normalized: string values are trimmed
//! (password fields excepted) and empty strings become `null`. Integer fields
//! that pass validation are coerced to JSON numbers so the typed input can be
//! deserialized afterwards.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// A single constraint on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Must be present and not null.
    Required,
    /// May be absent or null; remaining rules only apply to a value.
    Nullable,
    String,
    /// JSON integer or a string of digits, within `i32`.
    Integer,
    Email,
    /// Minimum length in characters.
    Min(usize),
    /// Maximum length in characters.
    Max(usize),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

pub type Schema = &'static [FieldRules];

/// Implemented by request inputs that carry a schema.
pub trait Validate {
    const SCHEMA: Schema;
}

/// Fields whose values are never trimmed.
const TRIM_EXCEPT: &[&str] = &["password", "password_confirmation", "current_password"];

/// Ordered field to messages map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(f, _)| f == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field.to_string(), vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    /// Total number of messages across all fields.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, m)| m.len()).sum()
    }

    /// First message, with a count of the rest appended.
    pub fn summary(&self) -> String {
        let Some(first) = self.entries.first().and_then(|(_, m)| m.first()) else {
            return "The given data was invalid.".to_string();
        };
        match self.len() - 1 {
            0 => first.clone(),
            1 => format!("{first} (and 1 more error)"),
            n => format!("{first} (and {n} more errors)"),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

/// Human form of a field name: `todoId` becomes `todo id`, `last_name`
/// becomes `last name`.
pub fn attribute_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 2);
    for (i, c) in field.chars().enumerate() {
        if c == '_' {
            out.push(' ');
        } else if c.is_uppercase() {
            if i > 0 {
                out.push(' ');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub fn required_message(field: &str) -> String {
    format!("The {} field is required.", attribute_name(field))
}

pub fn string_message(field: &str) -> String {
    format!("The {} field must be a string.", attribute_name(field))
}

pub fn integer_message(field: &str) -> String {
    format!("The {} field must be an integer.", attribute_name(field))
}

pub fn email_message(field: &str) -> String {
    format!("The {} field must be a valid email address.", attribute_name(field))
}

pub fn min_message(field: &str, min: usize) -> String {
    format!("The {} field must be at least {} characters.", attribute_name(field), min)
}

pub fn max_message(field: &str, max: usize) -> String {
    format!("The {} field must not be greater than {} characters.", attribute_name(field), max)
}

pub fn unique_message(field: &str) -> String {
    format!("The {} has already been taken.", attribute_name(field))
}

/// Trim strings and turn empty strings into `null`, recursively.
pub fn normalize(value: &mut Value) {
    normalize_field(None, value);
}

fn normalize_field(key: Option<&str>, value: &mut Value) {
    match value {
        Value::String(s) => {
            let keep_raw = key.is_some_and(|k| TRIM_EXCEPT.contains(&k));
            if !keep_raw {
                let trimmed = s.trim();
                if trimmed.len() != s.len() {
                    *s = trimmed.to_string();
                }
            }
            if s.is_empty() {
                *value = Value::Null;
            }
        }
        Value::Object(map) => {
            for (k, v) in map.iter_mut() {
                normalize_field(Some(k.as_str()), v);
            }
        }
        Value::Array(items) => {
            for v in items.iter_mut() {
                normalize_field(key, v);
            }
        }
        _ => {}
    }
}

fn coerce_integer(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.parse::<i32>().ok(),
        _ => None,
    }
}

/// Run `schema` against `input`. `input` is normalized in place and integer
/// fields are coerced. A non-object input is treated as an empty object.
pub fn validate(schema: Schema, input: &mut Value) -> Result<(), ValidationErrors> {
    normalize(input);
    if !input.is_object() {
        *input = Value::Object(Map::new());
    }
    let mut errors = ValidationErrors::new();
    let Value::Object(map) = input else { unreachable!("replaced above") };

    for spec in schema {
        let field = spec.field;
        let value = map.get(field).filter(|v| !v.is_null());
        let Some(value) = value else {
            if spec.rules.contains(&Rule::Required) {
                errors.add(field, required_message(field));
            }
            continue;
        };

        let mut coerced = None;
        for rule in spec.rules {
            match rule {
                Rule::Required | Rule::Nullable => {}
                Rule::String => {
                    if !value.is_string() {
                        errors.add(field, string_message(field));
                        break;
                    }
                }
                Rule::Integer => match coerce_integer(value) {
                    Some(n) => coerced = Some(n),
                    None => {
                        errors.add(field, integer_message(field));
                        break;
                    }
                },
                Rule::Email => {
                    let ok = value.as_str().is_some_and(|s| models::user::validate_email(s).is_ok());
                    if !ok {
                        errors.add(field, email_message(field));
                    }
                }
                Rule::Min(min) => {
                    if let Some(s) = value.as_str() {
                        if s.chars().count() < *min {
                            errors.add(field, min_message(field, *min));
                        }
                    }
                }
                Rule::Max(max) => {
                    if let Some(s) = value.as_str() {
                        if s.chars().count() > *max {
                            errors.add(field, max_message(field, *max));
                        }
                    }
                }
            }
        }
        if let Some(n) = coerced {
            map.insert(field.to_string(), Value::from(n));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Validate `input` against `T::SCHEMA`, then deserialize it.
pub fn validate_into<T: Validate + DeserializeOwned>(mut input: Value) -> Result<T, ValidationErrors> {
    validate(T::SCHEMA, &mut input)?;
    serde_json::from_value(input)
        .map_err(|e| ValidationErrors::single("body", format!("The body field is invalid: {e}.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TITLE: Schema = &[
        FieldRules { field: "title", rules: &[Rule::Required, Rule::String, Rule::Max(5)] },
        FieldRules { field: "note", rules: &[Rule::Nullable, Rule::String, Rule::Min(2)] },
        FieldRules { field: "status", rules: &[Rule::Nullable, Rule::Integer] },
    ];

    #[test]
    fn missing_required_field() {
        let mut v = json!({});
        let err = validate(TITLE, &mut v).unwrap_err();
        assert_eq!(err.get("title").unwrap(), ["The title field is required."]);
        assert_eq!(err.len(), 1);
    }

    #[test]
    fn empty_and_blank_strings_count_as_missing() {
        for raw in ["", "   "] {
            let mut v = json!({ "title": raw });
            let err = validate(TITLE, &mut v).unwrap_err();
            assert!(err.get("title").is_some(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn strings_are_trimmed() {
        let mut v = json!({ "title": "  abc  " });
        validate(TITLE, &mut v).unwrap();
        assert_eq!(v["title"], "abc");
    }

    #[test]
    fn password_is_not_trimmed() {
        let mut v = json!({ "password": "  secret  " });
        normalize(&mut v);
        assert_eq!(v["password"], "  secret  ");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut v = json!({ "title": "あいうえお" });
        assert!(validate(TITLE, &mut v).is_ok());
        let mut v = json!({ "title": "あいうえおか" });
        let err = validate(TITLE, &mut v).unwrap_err();
        assert_eq!(err.get("title").unwrap(), ["The title field must not be greater than 5 characters."]);
    }

    #[test]
    fn wrong_type_stops_remaining_rules() {
        let mut v = json!({ "title": 12345678 });
        let err = validate(TITLE, &mut v).unwrap_err();
        assert_eq!(err.get("title").unwrap(), ["The title field must be a string."]);
    }

    #[test]
    fn nullable_field_may_be_null() {
        let mut v = json!({ "title": "ok", "note": null, "status": null });
        assert!(validate(TITLE, &mut v).is_ok());
    }

    #[test]
    fn integer_accepts_digit_strings_and_coerces() {
        let mut v = json!({ "title": "ok", "status": "2" });
        validate(TITLE, &mut v).unwrap();
        assert_eq!(v["status"], json!(2));
    }

    #[test]
    fn integer_rejects_floats_words_and_overflow() {
        for bad in [json!(1.5), json!("two"), json!(i64::from(i32::MAX) + 1), json!(true)] {
            let mut v = json!({ "title": "ok", "status": bad });
            let err = validate(TITLE, &mut v).unwrap_err();
            assert_eq!(err.get("status").unwrap(), ["The status field must be an integer."]);
        }
    }

    #[test]
    fn errors_keep_schema_order_and_summary_counts() {
        let mut v = json!({ "note": "x", "status": "nope" });
        let err = validate(TITLE, &mut v).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["title", "note", "status"]);
        assert_eq!(err.summary(), "The title field is required. (and 2 more errors)");
        let s = serde_json::to_string(&err).unwrap();
        assert!(s.starts_with(r#"{"title":"#));
    }

    #[test]
    fn non_object_body_is_treated_as_empty() {
        let mut v = json!([1, 2, 3]);
        let err = validate(TITLE, &mut v).unwrap_err();
        assert!(err.get("title").is_some());
    }

    #[test]
    fn email_rule() {
        const EMAIL: Schema = &[FieldRules { field: "email", rules: &[Rule::Required, Rule::Email] }];
        let mut v = json!({ "email": "not-an-email" });
        let err = validate(EMAIL, &mut v).unwrap_err();
        assert_eq!(err.get("email").unwrap(), ["The email field must be a valid email address."]);
        let mut v = json!({ "email": "a@b.jp" });
        assert!(validate(EMAIL, &mut v).is_ok());
    }

    #[test]
    fn attribute_names() {
        assert_eq!(attribute_name("todoId"), "todo id");
        assert_eq!(attribute_name("password_confirmation"), "password confirmation");
        assert_eq!(attribute_name("email"), "email");
    }

    #[test]
    fn single_message_summary_has_no_suffix() {
        let err = ValidationErrors::single("email", "bad");
        assert_eq!(err.summary(), "bad");
        assert_eq!(err.to_string(), "bad");
    }
}
