//! 내장 Tesseract 인식기.
//!
//! `leptess` 기반. `ocr` feature flag 활성화 시에만 빌드된다.
//!
//! - Lazy initialization: 첫 호출 시 전용 워커 스레드를 띄우고 그 안에서 엔진 생성
//! - 엔진 재사용: 워커가 엔진을 소유하고 이후 프레임에 계속 사용
//! - 초기화 실패 시 다음 요청에서 다시 시도

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::OnceLock;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use vnlive_core::error::CoreError;
use vnlive_core::models::fragment::{RecognizedFragment, RecognizedText};
use vnlive_core::ports::recognizer::TextRecognizer;

use crate::decode::decode_image;

/// 단어 사이 공백을 쓰지 않는 언어
const SPACELESS_LANGUAGES: &[&str] = &["jpn", "jpn_vert", "chi_sim", "chi_tra"];

/// OCR 에러 타입
#[derive(Debug, Error)]
pub enum OcrError {
    /// Tesseract 초기화 실패
    #[error("OCR 초기화 실패: {0}")]
    Init(String),

    /// 이미지 설정 실패
    #[error("OCR 이미지 설정 실패: {0}")]
    ImageSetup(String),

    /// 텍스트 추출 실패
    #[error("OCR 텍스트 추출 실패: {0}")]
    Extraction(String),

    /// 워커 스레드 통신 실패
    #[error("OCR 워커 실패: {0}")]
    Worker(String),
}

impl From<OcrError> for CoreError {
    fn from(e: OcrError) -> Self {
        CoreError::Recognition(e.to_string())
    }
}

/// 워커에 보내는 RGBA 프레임
struct OcrJob {
    rgba: Vec<u8>,
    width: u32,
    height: u32,
    reply: oneshot::Sender<Result<String, OcrError>>,
}

/// Tesseract 인식기
pub struct TesseractRecognizer {
    /// Tesseract 데이터 경로 (None이면 시스템 기본값)
    tessdata_path: Option<PathBuf>,
    /// 언어 코드 (예: "jpn")
    language: String,
    /// 워커 작업 큐 (첫 호출 시 생성)
    worker: OnceLock<mpsc::Sender<OcrJob>>,
}

impl TesseractRecognizer {
    /// 새 인식기 생성 (엔진은 첫 `recognize` 호출 때 만들어진다)
    pub fn new(tessdata_path: Option<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            tessdata_path,
            language: language.into(),
            worker: OnceLock::new(),
        }
    }

    fn worker(&self) -> Result<&mpsc::Sender<OcrJob>, OcrError> {
        if let Some(tx) = self.worker.get() {
            return Ok(tx);
        }

        let (tx, rx) = mpsc::channel::<OcrJob>();
        let tessdata = self
            .tessdata_path
            .as_ref()
            .map(|p| p.to_string_lossy().to_string());
        let language = self.language.clone();

        std::thread::Builder::new()
            .name("vnlive-ocr".to_string())
            .spawn(move || run_worker(rx, tessdata, language))
            .map_err(|e| OcrError::Worker(format!("스레드 생성 실패: {e}")))?;

        // 동시에 두 호출이 들어오면 먼저 등록된 쪽만 남고 나머지 워커는 채널이 닫혀 종료된다
        Ok(self.worker.get_or_init(|| tx))
    }

    /// Tesseract 출력 → 조각 (줄 단위)
    fn split_lines(raw: &str, spaceless: bool) -> RecognizedText {
        raw.lines()
            .map(|line| {
                if spaceless {
                    line.chars().filter(|c| !c.is_whitespace()).collect::<String>()
                } else {
                    line.trim().to_string()
                }
            })
            .filter(|line| !line.is_empty())
            .map(RecognizedFragment::text_only)
            .collect()
    }
}

/// 워커 루프: 엔진을 소유하고 채널이 닫힐 때까지 작업 처리
fn run_worker(rx: mpsc::Receiver<OcrJob>, tessdata: Option<String>, language: String) {
    let mut engine: Option<leptess::LepTess> = None;

    while let Ok(job) = rx.recv() {
        if engine.is_none() {
            match leptess::LepTess::new(tessdata.as_deref(), &language) {
                Ok(lt) => {
                    info!(language = %language, "Tesseract 엔진 초기화 완료");
                    engine = Some(lt);
                }
                Err(e) => {
                    warn!("Tesseract 엔진 초기화 실패: {e}");
                    let _ = job.reply.send(Err(OcrError::Init(format!("{e}"))));
                    continue;
                }
            }
        }

        let Some(lt) = engine.as_mut() else {
            continue;
        };

        let (w, h) = (job.width, job.height);
        let result = lt
            .set_image_from_mem(&job.rgba, w as i32, h as i32, 4, (w * 4) as i32)
            .map_err(|_| OcrError::ImageSetup("이미지 메모리 설정 실패".to_string()))
            .and_then(|_| {
                lt.get_utf8_text()
                    .map_err(|e| OcrError::Extraction(format!("{e}")))
            });

        let _ = job.reply.send(result);
    }

    debug!("OCR 워커 종료");
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image: &[u8]) -> Result<RecognizedText, CoreError> {
        let rgba = decode_image(image)?.to_rgba8();
        let (width, height) = (rgba.width(), rgba.height());

        let (reply, response) = oneshot::channel();
        self.worker()?
            .send(OcrJob {
                rgba: rgba.into_raw(),
                width,
                height,
                reply,
            })
            .map_err(|_| OcrError::Worker("작업 큐가 닫혔습니다".to_string()))?;

        let raw = response
            .await
            .map_err(|_| OcrError::Worker("응답 채널이 닫혔습니다".to_string()))??;

        let spaceless = SPACELESS_LANGUAGES.contains(&self.language.as_str());
        let text = Self::split_lines(&raw, spaceless);
        debug!(fragments = text.len(), language = %self.language, "Tesseract 인식 완료");
        Ok(text)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
