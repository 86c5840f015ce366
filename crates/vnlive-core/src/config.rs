//! 애플리케이션 설정 구조체.
//!
//! 웹 서버 포트, 유사도 임계값, 상태 저장 경로, 인식/번역 엔진,
//! 파이프라인 주기 등 런타임 설정을 정의한다. `ConfigManager`를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 공개 서버 설정
    #[serde(default)]
    pub web: WebConfig,
    /// 변경 감지 게이트 설정
    #[serde(default)]
    pub gate: GateConfig,
    /// 상태 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 텍스트 인식(OCR) 설정
    #[serde(default)]
    pub recognition: RecognitionConfig,
    /// 번역 설정
    #[serde(default)]
    pub translation: TranslationConfig,
    /// 인식 파이프라인 설정
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

// ============================================================
// 공개 서버 설정
// ============================================================

/// 공개 서버 설정: 루프백 전용
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 바인드 포트 (기본: 8765)
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 뷰어 폴링 간격 (밀리초, 기본: 500)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

// ============================================================
// 게이트 설정
// ============================================================

/// 유사도 게이트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// 이 값 이상이면 직전 텍스트와 같은 것으로 보고 건너뜀 (0.0 ~ 1.0)
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

// ============================================================
// 저장소 설정
// ============================================================

/// 상태 저장소 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 상태 파일 디렉토리 (None이면 플랫폼 기본 설정 디렉토리)
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
}

// ============================================================
// 인식 설정
// ============================================================

/// 인식 엔진 종류
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionEngine {
    /// 내장 Tesseract (`ocr` feature 필요)
    Tesseract,
    /// 외부 헬퍼 프로그램 (이미지 경로를 마지막 인자로 전달)
    #[default]
    Command,
}

/// 텍스트 인식 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// 사용할 엔진
    #[serde(default)]
    pub engine: RecognitionEngine,
    /// Tesseract 언어 코드
    #[serde(default = "default_ocr_language")]
    pub language: String,
    /// Tesseract 데이터 경로 (None이면 시스템 기본값)
    #[serde(default)]
    pub tessdata_path: Option<PathBuf>,
    /// 외부 헬퍼 명령 (프로그램 + 고정 인자)
    #[serde(default = "default_helper_command")]
    pub helper_command: Vec<String>,
    /// 외부 헬퍼 실행 타임아웃 (초)
    #[serde(default = "default_helper_timeout_secs")]
    pub helper_timeout_secs: u64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            engine: RecognitionEngine::default(),
            language: default_ocr_language(),
            tessdata_path: None,
            helper_command: default_helper_command(),
            helper_timeout_secs: default_helper_timeout_secs(),
        }
    }
}

impl RecognitionConfig {
    /// 헬퍼 실행 타임아웃
    pub fn helper_timeout(&self) -> Duration {
        Duration::from_secs(self.helper_timeout_secs)
    }
}

// ============================================================
// 번역 설정
// ============================================================

/// 번역 설정: LibreTranslate 호환 엔드포인트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// 번역 활성화 여부
    #[serde(default)]
    pub enabled: bool,
    /// 번역 API 엔드포인트
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,
    /// 원문 언어
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    /// 번역 언어
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// API 키 (선택)
    #[serde(default)]
    pub api_key: Option<String>,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_translation_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_translation_endpoint(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            api_key: None,
            timeout_secs: default_translation_timeout_secs(),
        }
    }
}

impl TranslationConfig {
    /// 요청 타임아웃
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================
// 파이프라인 설정
// ============================================================

/// 인식 파이프라인 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// 외부 캡처 도구가 덮어쓰는 스크린샷 파일 경로
    #[serde(default)]
    pub frame_path: Option<PathBuf>,
    /// 프레임 파일 확인 간격 (밀리초)
    #[serde(default = "default_frame_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame_path: None,
            poll_interval_ms: default_frame_poll_interval_ms(),
        }
    }
}

impl AppConfig {
    /// 기본 설정
    pub fn default_config() -> Self {
        Self {
            web: WebConfig::default(),
            gate: GateConfig::default(),
            storage: StorageConfig::default(),
            recognition: RecognitionConfig::default(),
            translation: TranslationConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }

    /// 값 범위 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(0.0..=1.0).contains(&self.gate.threshold) {
            return Err(CoreError::Config(format!(
                "gate.threshold는 0.0 ~ 1.0 범위여야 합니다: {}",
                self.gate.threshold
            )));
        }
        if self.web.port == 0 {
            return Err(CoreError::Config("web.port는 0일 수 없습니다".to_string()));
        }
        if self.web.poll_interval_ms == 0 || self.pipeline.poll_interval_ms == 0 {
            return Err(CoreError::Config(
                "폴링 간격은 0보다 커야 합니다".to_string(),
            ));
        }
        if self.recognition.engine == RecognitionEngine::Command
            && self.recognition.helper_command.is_empty()
        {
            return Err(CoreError::Config(
                "recognition.helper_command가 비어 있습니다".to_string(),
            ));
        }
        if self.recognition.helper_timeout_secs == 0 || self.translation.timeout_secs == 0 {
            return Err(CoreError::Config("타임아웃은 0보다 커야 합니다".to_string()));
        }
        Ok(())
    }

    /// 프레임 확인 간격을 Duration으로 반환
    pub fn frame_poll_interval(&self) -> Duration {
        Duration::from_millis(self.pipeline.poll_interval_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_web_port() -> u16 {
    8765
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_threshold() -> f64 {
    0.85
}

fn default_ocr_language() -> String {
    "jpn".to_string()
}

fn default_helper_command() -> Vec<String> {
    vec!["meikiocr-helper".to_string()]
}

fn default_helper_timeout_secs() -> u64 {
    60
}

fn default_translation_endpoint() -> String {
    "http://127.0.0.1:5000/translate".to_string()
}

fn default_source_lang() -> String {
    "ja".to_string()
}

fn default_target_lang() -> String {
    "en".to_string()
}

fn default_translation_timeout_secs() -> u64 {
    15
}

fn default_frame_poll_interval_ms() -> u64 {
    1_000
}
