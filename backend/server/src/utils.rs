use axum::body::{Body, Bytes, to_bytes};
use serde_json::Value;

use crate::{
    error::AppError::{self, MalformedPayload, PayloadTooLarge},
    feedback::NewFeedback,
};

pub const BODY_LIMIT: usize = 1_000_000;

pub async fn read_body(body: Body) -> Result<Bytes, AppError> {
    to_bytes(body, BODY_LIMIT).await.map_err(|_| PayloadTooLarge)
}

pub fn get_value_from_bytes(bytes: &[u8]) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }

    serde_json::from_slice(bytes).map_err(|_| MalformedPayload)
}

pub async fn get_feedback_from_body(body: Body) -> Result<NewFeedback, AppError> {
    let bytes = read_body(body).await?;
    let value = get_value_from_bytes(&bytes)?;

    NewFeedback::from_value(&value)
}
