//! Success response helpers. Bodies are the bare schema records, no envelope.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn success_created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}
