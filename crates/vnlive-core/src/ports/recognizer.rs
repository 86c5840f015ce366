//! 텍스트 인식 포트.
//!
//! 내장 Tesseract 또는 외부 헬퍼 프로그램을 추상화하는 인터페이스를 정의한다.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::fragment::RecognizedText;

/// 텍스트 인식기: 이미지 한 장에서 읽기 순서의 조각을 추출
///
/// 구현체는 첫 호출에서 엔진을 준비하고 이후 호출에서 재사용한다.
/// 호출자는 프레임마다 인식기를 새로 만들지 말고 하나를 계속 써야 한다.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// 인코딩된 이미지 바이트에서 텍스트 조각 추출
    ///
    /// - 이미지를 열 수 없으면 `CoreError::ImageDecode`
    /// - 텍스트가 없으면 `Ok`(빈 결과)
    async fn recognize(&self, image: &[u8]) -> Result<RecognizedText, CoreError>;

    /// 인식기 이름 (예: "tesseract-jpn", "command:meikiocr-helper")
    fn name(&self) -> &str;
}
