//! vnlive 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 자체 에러 타입에서 `#[from] CoreError`로 래핑한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 설정, 인식, 저장소, 번역 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 이미지를 열 수 없음 (손상/미지원 형식)
    ///
    /// "인식된 조각 0개"와 구분되는 실패. 파이프라인은 해당 프레임만 건너뛴다.
    #[error("이미지 디코딩 실패: {0}")]
    ImageDecode(String),

    /// 인식 엔진 실패
    #[error("인식 에러: {0}")]
    Recognition(String),

    /// 상태 저장소 읽기/쓰기 실패
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 번역 엔진 실패 (응답 형식 오류 등)
    #[error("번역 에러: {0}")]
    Translation(String),

    /// 네트워크 에러 (연결 실패, 타임아웃, 비정상 상태 코드)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 이미지 디코딩 실패 여부
    pub fn is_image_decode(&self) -> bool {
        matches!(self, CoreError::ImageDecode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_decode_is_distinguishable() {
        let decode = CoreError::ImageDecode("잘린 PNG".to_string());
        let engine = CoreError::Recognition("엔진 종료".to_string());
        assert!(decode.is_image_decode());
        assert!(!engine.is_image_decode());
        assert!(decode.to_string().contains("디코딩"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
