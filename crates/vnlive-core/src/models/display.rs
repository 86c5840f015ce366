//! 표시 상태 모델.
//!
//! 인식 파이프라인이 쓰고 공개 서버가 읽는 단일 공유 레코드.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 뷰어에 공개되는 최신 상태
///
/// `updated_at`은 인식 텍스트가 기록된 시각이며 단조 증가한다.
/// 번역 기록은 `updated_at`을 바꾸지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    /// 인식된 일본어 텍스트 (비어 있을 수 있음)
    pub japanese_text: String,
    /// 번역된 텍스트 (비어 있을 수 있음)
    pub english_text: String,
    /// 마지막 인식 텍스트 기록 시각 (기록 전에는 epoch)
    pub updated_at: DateTime<Utc>,
}

impl DisplayState {
    /// 한 번도 기록되지 않은 상태
    pub fn empty() -> Self {
        Self {
            japanese_text: String::new(),
            english_text: String::new(),
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// epoch 이후 경과 초 (소수점 포함)
    pub fn timestamp_secs(&self) -> f64 {
        timestamp_secs(self.updated_at)
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::empty()
    }
}

/// 인식 텍스트 슬롯 (텍스트 + 기록 시각)
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedSlot {
    /// 인식 텍스트
    pub text: String,
    /// 기록 시각
    pub updated_at: DateTime<Utc>,
}

impl RecognizedSlot {
    /// 빈 슬롯 (epoch 시각)
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// 시각을 epoch 기준 초(소수점 포함)로 변환
pub fn timestamp_secs(at: DateTime<Utc>) -> f64 {
    at.timestamp() as f64 + f64::from(at.timestamp_subsec_micros()) / 1_000_000.0
}
