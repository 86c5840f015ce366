//! # vnlive-vision
//!
//! 화면 텍스트 처리 크레이트.
//! 인식 결과가 직전 텍스트와 충분히 다른지 판단하는 유사도 게이트와,
//! 스크린샷 바이트를 텍스트 조각으로 바꾸는 인식 어댑터를 담당한다.

pub mod command_recognizer;
pub mod decode;
pub mod gate;
#[cfg(feature = "ocr")]
pub mod ocr;
pub mod recognizer;
pub mod similarity;
