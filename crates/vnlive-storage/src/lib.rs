//! # vnlive-storage
//!
//! 표시 상태 저장소 어댑터.
//! 인식 파이프라인(writer)과 공개 서버(reader)가 공유하는 두 슬롯
//! (인식 텍스트, 번역 텍스트)과 마지막 기록 시각을 보관한다.
//!
//! ## 모듈
//! - `memory_store`: 단일 프로세스용 메모리 저장소
//! - `file_store`: 프로세스 간 공유용 파일 저장소 (`last_text.txt`, `last_translation.txt`)
//! - `clock`: 단조 증가 기록 시각

pub mod clock;
pub mod file_store;
pub mod memory_store;
