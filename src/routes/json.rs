// ABOUTME: JSON request body extractor that rejects with the API error format
// ABOUTME: Malformed or mistyped bodies become 400 responses with an error code and message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::errors::{AppError, ErrorCode};

/// `Json<T>` whose rejection is an [`AppError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_error(&rejection)),
        }
    }
}

fn rejection_error(rejection: &JsonRejection) -> AppError {
    let code = match rejection {
        JsonRejection::JsonDataError(_) => ErrorCode::InvalidInput,
        _ => ErrorCode::InvalidFormat,
    };
    AppError::new(code, format!("Invalid request body: {}", rejection.body_text()))
}
