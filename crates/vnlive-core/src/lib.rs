//! # vnlive-core
//!
//! vnlive 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 도메인 데이터 구조체 (serde Serialize/Deserialize)
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체
//! - [`config_manager`]: 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::display::DisplayState;
    use crate::models::fragment::{RecognizedFragment, RecognizedText};

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert_eq!(config.web.port, 8765);
        assert_eq!(config.web.poll_interval_ms, 500);
        assert!((config.gate.threshold - 0.85).abs() < f64::EPSILON);
        assert!(config.storage.state_dir.is_none());
        assert!(!config.translation.enabled);
    }

    #[test]
    fn fragments_feed_display_state() {
        let text: RecognizedText = vec![
            RecognizedFragment::text_only("こん"),
            RecognizedFragment::text_only("にちは"),
        ]
        .into_iter()
        .collect();

        let mut state = DisplayState::empty();
        state.japanese_text = text.joined();
        assert_eq!(state.japanese_text, "こんにちは");
        assert!(state.english_text.is_empty());
    }
}
