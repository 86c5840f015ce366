//! 설정 기반 인식기 선택.

use std::sync::Arc;
use tracing::info;

use vnlive_core::config::{RecognitionConfig, RecognitionEngine};
use vnlive_core::error::CoreError;
use vnlive_core::ports::recognizer::TextRecognizer;

use crate::command_recognizer::CommandRecognizer;

/// 설정에 맞는 인식기 생성
///
/// `tesseract` 엔진은 `ocr` feature로 빌드된 경우에만 사용할 수 있다.
pub fn create_recognizer(config: &RecognitionConfig) -> Result<Arc<dyn TextRecognizer>, CoreError> {
    let recognizer: Arc<dyn TextRecognizer> = match config.engine {
        RecognitionEngine::Command => Arc::new(
            CommandRecognizer::new(&config.helper_command)?.with_timeout(config.helper_timeout()),
        ),
        RecognitionEngine::Tesseract => tesseract(config)?,
    };

    info!(engine = recognizer.name(), "인식기 준비 완료");
    Ok(recognizer)
}

#[cfg(feature = "ocr")]
fn tesseract(config: &RecognitionConfig) -> Result<Arc<dyn TextRecognizer>, CoreError> {
    Ok(Arc::new(crate::ocr::TesseractRecognizer::new(
        config.tessdata_path.clone(),
        config.language.clone(),
    )))
}

#[cfg(not(feature = "ocr"))]
fn tesseract(_config: &RecognitionConfig) -> Result<Arc<dyn TextRecognizer>, CoreError> {
    Err(CoreError::Config(
        "tesseract 엔진은 `ocr` feature로 빌드해야 합니다".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_command_recognizer() {
        let recognizer = create_recognizer(&RecognitionConfig::default()).unwrap();
        assert_eq!(recognizer.name(), "command:meikiocr-helper");
    }

    #[test]
    fn empty_helper_command_is_rejected() {
        let config = RecognitionConfig {
            helper_command: Vec::new(),
            ..RecognitionConfig::default()
        };
        assert!(matches!(
            create_recognizer(&config),
            Err(CoreError::Config(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn configured_helper_timeout_is_applied() {
        let config = RecognitionConfig {
            helper_command: vec![
                "sh".to_string(),
                "-c".to_string(),
                "sleep 10".to_string(),
                "helper".to_string(),
            ],
            helper_timeout_secs: 1,
            ..RecognitionConfig::default()
        };
        let recognizer = create_recognizer(&config).unwrap();

        let started = std::time::Instant::now();
        let err = recognizer
            .recognize(&crate::decode::test_support::png_bytes(4, 4))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Recognition(_)));
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[cfg(not(feature = "ocr"))]
    #[test]
    fn tesseract_without_feature_is_config_error() {
        let config = RecognitionConfig {
            engine: RecognitionEngine::Tesseract,
            ..RecognitionConfig::default()
        };
        assert!(matches!(
            create_recognizer(&config),
            Err(CoreError::Config(_))
        ));
    }
}
