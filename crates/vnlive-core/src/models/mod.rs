//! vnlive 도메인 모델.
//!
//! 인식 결과와 뷰어에 공개되는 표시 상태를 정의한다.

pub mod display;
pub mod fragment;
