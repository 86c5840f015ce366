//! 메모리 상태 저장소.
//!
//! `vnlive run`처럼 파이프라인과 공개 서버가 한 프로세스에 있을 때 쓴다.
//! 재시작하면 내용이 사라진다.

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use vnlive_core::error::CoreError;
use vnlive_core::models::display::{DisplayState, RecognizedSlot};
use vnlive_core::ports::state_store::StateStore;

use crate::clock;

/// 메모리 저장소
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    state: RwLock<DisplayState>,
}

impl MemoryStateStore {
    /// 빈 저장소 생성
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn write_recognized(&self, text: &str) -> Result<(), CoreError> {
        let mut state = self.state.write();
        let previous = (state.updated_at != DisplayState::empty().updated_at)
            .then(|| state.updated_at.timestamp_micros());
        state.japanese_text = text.to_string();
        state.updated_at = clock::from_micros(clock::next_stamp(previous));
        debug!(chars = text.chars().count(), "인식 텍스트 기록");
        Ok(())
    }

    async fn write_translation(&self, text: &str) -> Result<(), CoreError> {
        self.state.write().english_text = text.to_string();
        debug!(chars = text.chars().count(), "번역 텍스트 기록");
        Ok(())
    }

    async fn read_recognized(&self) -> Result<RecognizedSlot, CoreError> {
        let state = self.state.read();
        Ok(RecognizedSlot {
            text: state.japanese_text.clone(),
            updated_at: state.updated_at,
        })
    }

    async fn read_translation(&self) -> Result<String, CoreError> {
        Ok(self.state.read().english_text.clone())
    }

    /// 한 번의 읽기 잠금으로 두 슬롯을 함께 복제
    async fn read(&self) -> Result<DisplayState, CoreError> {
        Ok(self.state.read().clone())
    }
}
