//! 번역 포트.

use async_trait::async_trait;

use crate::error::CoreError;

/// 번역기: 원문 텍스트를 번역 텍스트로 변환
#[async_trait]
pub trait Translator: Send + Sync {
    /// 텍스트 번역
    async fn translate(&self, text: &str) -> Result<String, CoreError>;

    /// 번역기 이름
    fn name(&self) -> &str;
}
