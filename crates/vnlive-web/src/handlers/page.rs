//! 뷰어 페이지 핸들러.

use axum::extract::State;
use axum::response::Html;

use crate::embedded;
use crate::error::ApiError;
use crate::AppState;

/// GET /: 폴링 스크립트가 들어 있는 뷰어 페이지
pub async fn get_index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    embedded::index_html(state.poll_interval_ms)
        .map(Html)
        .ok_or_else(|| ApiError::Internal("뷰어 페이지 에셋 없음".to_string()))
}
