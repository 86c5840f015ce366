//! # vnlive-network
//!
//! 외부 서비스 네트워크 어댑터.
//!
//! ## 모듈
//! - `http_translator`: LibreTranslate 호환 HTTP 번역 클라이언트 (`Translator` 구현)

pub mod http_translator;
