//! # Feedback
//!
//! One user submission and the rules for turning a raw request body into one.
//!
//! ## Coercion
//!
//! Request fields arrive untyped. Each is coerced before validation:
//! - Text fields: absent, `null`, `false`, `0` and `""` become empty, other scalars use their
//!   text form, then everything is trimmed.
//! - Rating: absent, `null`, `false` and `""` become `0`, numeric strings are parsed, `true` is `1`.
//!   Anything else is not a number and fails validation.
//!
//! A rating must be a whole number in `1..=5`. `4.0` is accepted as `4`, `4.5` is rejected.
//!
//! Only JSON scalars are coerced. Arrays and objects are never unwrapped: as text they keep
//! their JSON form (`{"a":1}` stays `{"a":1}`), as a rating they are not a number, so
//! `"rating": [5]` is refused. Numeric strings go through Rust float parsing, so hex like
//! `"0x5"` is refused while `"inf"`/`"Infinity"` parse and then fail the range check.
//!
//! ## Stored entries
//!
//! Entries read back from disk are accepted as they are. Missing text fields load as empty,
//! any scalar is kept as text, and a rating keeps whatever number was written (`4.5` included).
//! A rating that is not a number loads as `0`, which exports as an empty field.
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use uuid::Uuid;

use crate::error::AppError;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    #[serde(default, deserialize_with = "stored_text")]
    pub id: String,
    #[serde(default, deserialize_with = "stored_text")]
    pub name: String,
    #[serde(default, deserialize_with = "stored_text")]
    pub email: String,
    #[serde(default = "no_rating", deserialize_with = "stored_rating")]
    pub rating: Number,
    #[serde(default, deserialize_with = "stored_text")]
    pub comments: String,
    #[serde(default, deserialize_with = "stored_text")]
    pub created_at: String,
}

/// Validated create input, before the server assigns `id` and `createdAt`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub rating: u8,
    pub comments: String,
}

impl NewFeedback {
    pub fn from_value(value: &Value) -> Result<Self, AppError> {
        let name = coerce_string(value.get("name"));
        let email = coerce_string(value.get("email"));
        let rating = coerce_number(value.get("rating"));
        let comments = coerce_string(value.get("comments"));

        if name.is_empty() || email.is_empty() {
            return Err(AppError::InvalidInput);
        }

        Ok(Self {
            name,
            email,
            rating: validate_rating(rating)?,
            comments,
        })
    }
}

impl FeedbackEntry {
    pub fn create(input: NewFeedback) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: input.name,
            email: input.email,
            rating: Number::from(input.rating),
            comments: input.comments,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn validate_rating(rating: f64) -> Result<u8, AppError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) || rating.fract() != 0.0 {
        return Err(AppError::InvalidInput);
    }

    Ok(rating as u8)
}

fn no_rating() -> Number {
    Number::from(0)
}

fn stored_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(text_of(Some(&value)))
}

fn stored_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Number, D::Error> {
    let rating = match Value::deserialize(deserializer)? {
        Value::Number(n) => n,
        other => Number::from_f64(coerce_number(Some(&other))).unwrap_or_else(no_rating),
    };

    Ok(rating)
}

fn coerce_string(value: Option<&Value>) -> String {
    text_of(value).trim().to_string()
}

fn text_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(other) => other.to_string(),
    }
}

fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => 0.0,
        Some(Value::Bool(true)) => 1.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) if s.trim().is_empty() => 0.0,
        Some(Value::String(s)) => s.trim().parse().unwrap_or(f64::NAN),
        Some(_) => f64::NAN,
    }
}
