//! 뷰어 페이지 임베드.
//!
//! rust-embed로 `assets/index.html`을 바이너리에 포함한다.
//! 요청마다 폴링 간격만 치환하고 그 외 내용은 그대로 내보낸다.

use rust_embed::Embed;

/// 뷰어 페이지 파일 이름
const INDEX_FILE: &str = "index.html";

/// 폴링 간격 자리표시자
const POLL_INTERVAL_PLACEHOLDER: &str = "{{POLL_INTERVAL_MS}}";

/// 뷰어 페이지 에셋
#[derive(Embed)]
#[folder = "assets"]
#[include = "*.html"]
struct Assets;

/// 폴링 간격을 채운 뷰어 페이지 (에셋이 없으면 None)
pub fn index_html(poll_interval_ms: u64) -> Option<String> {
    let file = Assets::get(INDEX_FILE)?;
    let template = String::from_utf8_lossy(&file.data);
    Some(template.replace(POLL_INTERVAL_PLACEHOLDER, &poll_interval_ms.to_string()))
}
