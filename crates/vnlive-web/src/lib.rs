//! # vnlive-web
//!
//! 라이브 텍스트 공개 서버.
//! Axum 기반. 상태 저장소의 최신 내용을 브라우저 뷰어에 내보낸다.
//!
//! ## 라우트
//! - `GET /`: 뷰어 페이지 (폴링 스크립트 포함)
//! - `GET /api/text`: 현재 표시 상태 JSON (모든 출처 허용)
//! - 그 외: 404
//!
//! 요청별 접근 로그는 남기지 않는다.

pub mod embedded;
pub mod error;
pub mod handlers;
pub mod routes;

use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

use vnlive_core::config::WebConfig;
use vnlive_core::ports::state_store::StateStore;

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 표시 상태 저장소 (읽기 전용으로 사용)
    pub store: Arc<dyn StateStore>,
    /// 뷰어 폴링 간격 (밀리초)
    pub poll_interval_ms: u64,
}

/// 라이브 텍스트 공개 서버
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(store: Arc<dyn StateStore>, config: WebConfig) -> Self {
        let state = AppState {
            store,
            poll_interval_ms: config.poll_interval_ms,
        };
        Self { config, state }
    }

    /// 라우터 구성
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// 서버 실행
    ///
    /// 루프백 주소의 고정 포트에 바인드한다. 포트를 쓸 수 없으면 바로 에러를 반환한다.
    ///
    /// # Arguments
    /// * `shutdown_rx` - 종료 신호 수신 채널
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let addr = SocketAddr::from(([127, 0, 0, 1], self.config.port));
        let app = self.router();

        let listener = TcpListener::bind(addr).await.map_err(|e| {
            error!("포트 {} 바인드 실패: {}", self.config.port, e);
            e
        })?;
        info!("공개 서버 시작: http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                loop {
                    if *shutdown_rx.borrow() {
                        info!("공개 서버 종료 신호 수신");
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await?;

        info!("공개 서버 종료");
        Ok(())
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}

/// 상태를 받아 전체 라우터 구성
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::page::get_index))
        .nest("/api", routes::api_routes())
        .fallback(handlers::not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;
    use vnlive_core::error::CoreError;
    use vnlive_core::models::display::RecognizedSlot;
    use vnlive_storage::memory_store::MemoryStateStore;

    /// 번역 슬롯만 읽기에 실패하는 저장소
    struct BrokenTranslationStore;

    #[async_trait]
    impl StateStore for BrokenTranslationStore {
        async fn write_recognized(&self, _text: &str) -> Result<(), CoreError> {
            Ok(())
        }

        async fn write_translation(&self, _text: &str) -> Result<(), CoreError> {
            Ok(())
        }

        async fn read_recognized(&self) -> Result<RecognizedSlot, CoreError> {
            Ok(RecognizedSlot {
                text: "読める".to_string(),
                updated_at: chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            })
        }

        async fn read_translation(&self) -> Result<String, CoreError> {
            Err(CoreError::Storage("권한 없음".to_string()))
        }
    }

    /// 모든 읽기가 실패하는 저장소
    struct BrokenStore;

    #[async_trait]
    impl StateStore for BrokenStore {
        async fn write_recognized(&self, _text: &str) -> Result<(), CoreError> {
            Err(CoreError::Storage("쓰기 불가".to_string()))
        }

        async fn write_translation(&self, _text: &str) -> Result<(), CoreError> {
            Err(CoreError::Storage("쓰기 불가".to_string()))
        }

        async fn read_recognized(&self) -> Result<RecognizedSlot, CoreError> {
            Err(CoreError::Storage("읽기 불가".to_string()))
        }

        async fn read_translation(&self) -> Result<String, CoreError> {
            Err(CoreError::Storage("읽기 불가".to_string()))
        }
    }

    fn server(store: Arc<dyn StateStore>) -> WebServer {
        WebServer::new(store, WebConfig::default())
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn web_server_url() {
        let server = server(Arc::new(MemoryStateStore::new()));
        assert_eq!(server.url(), "http://localhost:8765");
    }

    #[tokio::test]
    async fn index_serves_html_with_poller() {
        let app = server(Arc::new(MemoryStateStore::new())).router();
        let resp = get(app, "/").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("const POLL_INTERVAL_MS = 500;"));
    }

    #[tokio::test]
    async fn text_before_any_write_is_empty() {
        let app = server(Arc::new(MemoryStateStore::new())).router();
        let resp = get(app, "/api/text").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let json = json_body(resp).await;
        assert_eq!(json["text"], "");
        assert_eq!(json["translation"], "");
        assert_eq!(json["timestamp"].as_f64(), Some(0.0));
    }

    #[tokio::test]
    async fn text_reflects_store_contents() {
        let store = Arc::new(MemoryStateStore::new());
        store.write_recognized("こんにちは").await.unwrap();
        store.write_translation("Hello").await.unwrap();
        let expected = store.read().await.unwrap().timestamp_secs();

        let app = server(store).router();
        let json = json_body(get(app, "/api/text").await).await;

        assert_eq!(json["text"], "こんにちは");
        assert_eq!(json["translation"], "Hello");
        assert_eq!(json["timestamp"].as_f64(), Some(expected));
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let app = server(Arc::new(MemoryStateStore::new())).router();
        let resp = get(app, "/nonexistent").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_api_path_is_not_found() {
        let app = server(Arc::new(MemoryStateStore::new())).router();
        let resp = get(app, "/api/other").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unreadable_store_degrades_to_empty_fields() {
        let app = server(Arc::new(BrokenStore)).router();
        let resp = get(app, "/api/text").await;

        assert_eq!(resp.status(), StatusCode::OK);
        let json = json_body(resp).await;
        assert_eq!(json["text"], "");
        assert_eq!(json["translation"], "");
        assert_eq!(json["timestamp"].as_f64(), Some(0.0));
    }

    #[tokio::test]
    async fn one_unreadable_slot_keeps_the_other() {
        let app = server(Arc::new(BrokenTranslationStore)).router();
        let json = json_body(get(app, "/api/text").await).await;

        assert_eq!(json["text"], "読める");
        assert_eq!(json["translation"], "");
        assert_eq!(json["timestamp"].as_f64(), Some(1_700_000_000.0));
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        // 비어 있는 포트를 받아 두고 바로 놓아준다
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = WebConfig {
            port,
            ..WebConfig::default()
        };
        let server = WebServer::new(Arc::new(MemoryStateStore::new()), config);
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(server.run(rx));
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        tx.send(true).unwrap();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
