//! 상태 저장소 포트.
//!
//! 인식 텍스트/번역 텍스트 두 슬롯과 마지막 기록 시각을 보관한다.
//! 파이프라인이 유일한 writer이고 공개 서버는 읽기만 한다.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::display::{DisplayState, RecognizedSlot};

/// 표시 상태 저장소
#[async_trait]
pub trait StateStore: Send + Sync {
    /// 인식 텍스트 교체 + 기록 시각 갱신 (한 번에 관찰되는 단일 단계)
    async fn write_recognized(&self, text: &str) -> Result<(), CoreError>;

    /// 번역 텍스트 교체 (기록 시각은 바꾸지 않음)
    async fn write_translation(&self, text: &str) -> Result<(), CoreError>;

    /// 인식 텍스트 슬롯 읽기: 기록된 적 없으면 빈 문자열 + epoch
    async fn read_recognized(&self) -> Result<RecognizedSlot, CoreError>;

    /// 번역 텍스트 슬롯 읽기: 기록된 적 없으면 빈 문자열
    async fn read_translation(&self) -> Result<String, CoreError>;

    /// 두 슬롯을 합친 스냅샷
    async fn read(&self) -> Result<DisplayState, CoreError> {
        let recognized = self.read_recognized().await?;
        let english_text = self.read_translation().await?;
        Ok(DisplayState {
            japanese_text: recognized.text,
            english_text,
            updated_at: recognized.updated_at,
        })
    }
}
