//! 표시 상태 조회 핸들러.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::warn;

use vnlive_core::models::display::timestamp_secs;

use crate::error::ApiError;
use crate::AppState;

/// JSON 응답 content-type
const JSON_UTF8: &str = "application/json; charset=utf-8";

/// GET /api/text 응답
#[derive(Debug, Serialize)]
pub struct TextResponse {
    /// 인식된 일본어 텍스트
    pub text: String,
    /// 번역 텍스트
    pub translation: String,
    /// 마지막 인식 텍스트 기록 시각 (epoch 초, 소수점 포함, 기록 전에는 0)
    pub timestamp: f64,
}

/// GET /api/text
///
/// 슬롯별로 따로 읽는다. 한 슬롯 읽기가 실패해도 그 필드만 비우고 200으로 응답한다.
pub async fn get_text(State(state): State<AppState>) -> Result<Response, ApiError> {
    let (text, timestamp) = match state.store.read_recognized().await {
        Ok(slot) => (slot.text, timestamp_secs(slot.updated_at)),
        Err(e) => {
            warn!("인식 텍스트 읽기 실패: {e}");
            (String::new(), 0.0)
        }
    };

    let translation = match state.store.read_translation().await {
        Ok(translation) => translation,
        Err(e) => {
            warn!("번역 텍스트 읽기 실패: {e}");
            String::new()
        }
    };

    let body = serde_json::to_string(&TextResponse {
        text,
        translation,
        timestamp,
    })
    .map_err(|e| ApiError::Internal(format!("응답 직렬화 실패: {e}")))?;

    Ok(([(header::CONTENT_TYPE, JSON_UTF8)], body).into_response())
}
