use std::io;

use axum::{
    Json,
    body::{Body, Bytes},
    http::{HeaderValue, StatusCode, header::CONNECTION},
    response::{IntoResponse, Response},
};
use futures_util::stream;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input. name, email, rating(1-5) required.")]
    InvalidInput,

    #[error("Invalid JSON")]
    MalformedPayload,

    #[error("Not found")]
    NotFound,

    #[error("API route not found")]
    RouteNotFound,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Internal server error")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput | AppError::MalformedPayload => StatusCode::BAD_REQUEST,
            AppError::NotFound | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::Store(source) = &self {
            error!("Persistence failure: {source}");
        }

        if matches!(self, AppError::PayloadTooLarge) {
            return aborted(status);
        }

        (status, Json(json!({ "ok": false, "error": self.to_string() }))).into_response()
    }
}

/// A response whose body fails on the first read, so hyper tears the connection down
/// instead of completing the exchange.
fn aborted(status: StatusCode) -> Response {
    let body = Body::from_stream(stream::once(async {
        Err::<Bytes, _>(io::Error::other("payload too large"))
    }));

    let mut response = (status, body).into_response();
    response
        .headers_mut()
        .insert(CONNECTION, HeaderValue::from_static("close"));

    response
}
