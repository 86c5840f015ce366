//! API 라우트 정의.

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::AppState;

/// API 라우트 생성 (`/api` 아래에 중첩)
///
/// 뷰어가 다른 로컬 출처에서 폴링할 수 있도록 모든 출처의 읽기를 허용한다.
pub fn api_routes() -> Router<AppState> {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        // 현재 표시 상태
        .route("/text", get(handlers::text::get_text))
        .layer(cors)
}
