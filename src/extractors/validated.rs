//! Extractors that parse a request part and run it through [`Validate`].
//!
//! Content that cannot be parsed (bad JSON, wrong types, unknown fields) becomes
//! `AppError::Validation` and answers 422. Body size and media type failures keep axum's status.

use crate::error::AppError;
use crate::service::Validate;
use async_trait::async_trait;
use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

/// JSON body, deserialized then validated.
pub struct ValidJson<T: Validate>(pub T::Output);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        Ok(ValidJson(body.validate()?))
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            AppError::Validation(rejection.body_text())
        }
        other => AppError::Rejected {
            status: other.status(),
            message: other.body_text(),
        },
    }
}

/// Query string, deserialized then validated.
pub struct ValidQuery<T: Validate>(pub T::Output);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(ValidQuery(query.validate()?))
    }
}
