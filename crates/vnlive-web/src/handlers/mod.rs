//! HTTP 핸들러 모듈.

pub mod page;
pub mod text;

use axum::http::Uri;

use crate::error::ApiError;

/// 정의되지 않은 경로 (404, 부수 효과 없음)
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
