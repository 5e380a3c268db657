//! API error type with a structured JSON response.
//!
//! Every pipeline failure (fetch, decode, inference, encoding, upload)
//! is surfaced identically: HTTP 500 with the error text in the body. The
//! stage tag exists for the process log only; callers cannot distinguish
//! failure kinds and no retry is attempted.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::fetch::FetchError;
use crate::model::InferenceError;
use crate::pipeline::encode::EncodeError;
use crate::pipeline::preprocess::PreprocessError;
use crate::storage::StorageError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
#[error("{stage}: {detail}")]
pub struct ApiError {
    /// Pipeline stage that failed. Logged, not part of the contract.
    pub stage: &'static str,
    pub detail: String,
}

impl ApiError {
    fn new(stage: &'static str, detail: impl ToString) -> Self {
        Self {
            stage,
            detail: detail.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(stage = self.stage, detail = %self.detail, "upscale request failed");

        let body = ErrorBody {
            error: ErrorDetail {
                code: "UPSCALE_FAILED",
                message: self.detail,
            },
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self::new("fetch", err)
    }
}

impl From<PreprocessError> for ApiError {
    fn from(err: PreprocessError) -> Self {
        Self::new("decode", err)
    }
}

impl From<InferenceError> for ApiError {
    fn from(err: InferenceError) -> Self {
        Self::new("inference", err)
    }
}

impl From<EncodeError> for ApiError {
    fn from(err: EncodeError) -> Self {
        Self::new("encode", err)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self::new("upload", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn every_stage_maps_to_500() {
        let errors: Vec<ApiError> = vec![
            FetchError::Empty.into(),
            PreprocessError::Decode("bad header".into()).into(),
            InferenceError::Inference("boom".into()).into(),
            StorageError::Rejected {
                status: reqwest::StatusCode::FORBIDDEN,
                detail: "denied".into(),
            }
            .into(),
        ];

        for err in errors {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[tokio::test]
    async fn body_carries_code_and_error_text() {
        let err: ApiError = PreprocessError::Decode("bad header".into()).into();
        let response = err.into_response();

        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UPSCALE_FAILED");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("bad header"));
    }

    #[test]
    fn stage_tag_is_preserved_for_logs() {
        let err: ApiError = FetchError::Empty.into();
        assert_eq!(err.stage, "fetch");

        let err: ApiError = StorageError::Rejected {
            status: reqwest::StatusCode::BAD_GATEWAY,
            detail: String::new(),
        }
        .into();
        assert_eq!(err.stage, "upload");
    }
}
