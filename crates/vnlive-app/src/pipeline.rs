//! 인식 파이프라인.
//!
//! 프레임 → 인식 → 게이트 → 인식 텍스트 기록 → 번역 → 번역 기록.
//! `RecognitionPipeline`은 프레임 하나를 처리하고, `PipelineRunner`는 외부 캡처 도구가
//! 덮어쓰는 스크린샷 파일을 주기적으로 확인해 바뀐 프레임만 파이프라인에 넣는다.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use vnlive_core::error::CoreError;
use vnlive_core::ports::recognizer::TextRecognizer;
use vnlive_core::ports::state_store::StateStore;
use vnlive_core::ports::translator::Translator;
use vnlive_vision::gate::SimilarityGate;

/// 프레임 처리 결과
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// 이미지로 읽을 수 없는 프레임
    Undecodable,
    /// 인식된 텍스트 없음
    Empty,
    /// 직전 게시 텍스트와 충분히 비슷해서 건너뜀
    Skipped {
        /// 유사도 점수
        score: f64,
    },
    /// 새 텍스트 게시
    Published {
        /// 게시한 인식 텍스트
        text: String,
        /// 번역까지 기록했는지
        translated: bool,
    },
}

/// 프레임 하나를 처리하는 파이프라인
pub struct RecognitionPipeline {
    recognizer: Arc<dyn TextRecognizer>,
    translator: Option<Arc<dyn Translator>>,
    store: Arc<dyn StateStore>,
    gate: SimilarityGate,
    /// 마지막으로 기록에 성공한 인식 텍스트
    last_published: Option<String>,
}

impl RecognitionPipeline {
    /// 새 파이프라인 생성 (번역 없음)
    pub fn new(
        recognizer: Arc<dyn TextRecognizer>,
        store: Arc<dyn StateStore>,
        gate: SimilarityGate,
    ) -> Self {
        Self {
            recognizer,
            translator: None,
            store,
            gate,
            last_published: None,
        }
    }

    /// 번역기 설정
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// 마지막으로 게시한 텍스트
    pub fn last_published(&self) -> Option<&str> {
        self.last_published.as_deref()
    }

    /// 프레임 하나 처리
    ///
    /// 디코딩 실패와 빈 인식 결과는 `Ok`로 보고한다. 인식기 오류와 인식 텍스트 기록 실패는
    /// `Err`이며, 기록에 실패하면 `last_published`를 바꾸지 않아 다음 주기에 다시 시도된다.
    pub async fn process_frame(&mut self, image: &[u8]) -> Result<FrameOutcome, CoreError> {
        let recognized = match self.recognizer.recognize(image).await {
            Ok(recognized) => recognized,
            Err(e) if e.is_image_decode() => {
                warn!("프레임 디코딩 실패, 건너뜀: {e}");
                return Ok(FrameOutcome::Undecodable);
            }
            Err(e) => return Err(e),
        };

        let text = recognized.joined().trim().to_string();
        if text.is_empty() {
            debug!("인식된 텍스트 없음");
            return Ok(FrameOutcome::Empty);
        }

        if let Some(previous) = &self.last_published {
            let verdict = self.gate.evaluate(previous, &text);
            if verdict.is_skip() {
                return Ok(FrameOutcome::Skipped {
                    score: verdict.score,
                });
            }
        }

        if let Err(e) = self.store.write_recognized(&text).await {
            error!("인식 텍스트 기록 실패: {e}");
            return Err(e);
        }
        self.last_published = Some(text.clone());
        info!(chars = text.chars().count(), "새 텍스트 게시");

        let translated = self.translate_and_publish(&text).await;
        Ok(FrameOutcome::Published { text, translated })
    }

    /// 번역 후 번역 슬롯 기록. 실패하면 번역 슬롯은 그대로 둔다
    async fn translate_and_publish(&self, text: &str) -> bool {
        let Some(translator) = &self.translator else {
            return false;
        };

        let translated = match translator.translate(text).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!(translator = translator.name(), "번역 실패: {e}");
                return false;
            }
        };

        match self.store.write_translation(&translated).await {
            Ok(()) => true,
            Err(e) => {
                error!("번역 텍스트 기록 실패: {e}");
                false
            }
        }
    }
}

/// 프레임 파일 변경 식별자 (수정 시각, 크기)
type FrameSignature = (SystemTime, u64);

/// 프레임 파일 감시 루프
pub struct PipelineRunner {
    pipeline: RecognitionPipeline,
    frame_path: PathBuf,
    interval: Duration,
    last_signature: Option<FrameSignature>,
}

impl PipelineRunner {
    /// 새 러너 생성
    pub fn new(pipeline: RecognitionPipeline, frame_path: PathBuf, interval: Duration) -> Self {
        Self {
            pipeline,
            frame_path,
            interval,
            last_signature: None,
        }
    }

    /// 종료 신호까지 주기적으로 프레임 파일 확인
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) {
        info!(
            "인식 파이프라인 시작: {} ({}ms 간격)",
            self.frame_path.display(),
            self.interval.as_millis()
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    // 처리 중인 프레임은 종료 신호가 오면 버린다 (헬퍼 프로세스는 kill_on_drop)
                    tokio::select! {
                        _ = self.poll_once() => {}
                        changed = shutdown_rx.changed() => {
                            if changed.is_err() || *shutdown_rx.borrow() {
                                info!("프레임 처리 중 종료 신호 수신");
                                break;
                            }
                        }
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        info!("인식 파이프라인 종료");
    }

    /// 프레임 파일을 한 번 확인. 새 프레임을 처리했으면 결과를 반환
    pub async fn poll_once(&mut self) -> Option<FrameOutcome> {
        let signature = match tokio::fs::metadata(&self.frame_path).await {
            Ok(meta) => (meta.modified().ok()?, meta.len()),
            Err(e) => {
                debug!("프레임 파일 없음: {}: {e}", self.frame_path.display());
                return None;
            }
        };

        if self.last_signature == Some(signature) {
            return None;
        }

        let bytes = match tokio::fs::read(&self.frame_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("프레임 파일 읽기 실패: {}: {e}", self.frame_path.display());
                return None;
            }
        };

        match self.pipeline.process_frame(&bytes).await {
            Ok(outcome) => {
                self.last_signature = Some(signature);
                debug!(?outcome, "프레임 처리 완료");
                Some(outcome)
            }
            Err(CoreError::Storage(_)) => {
                // 같은 프레임을 다음 주기에 다시 처리한다
                None
            }
            Err(e) => {
                self.last_signature = Some(signature);
                error!("프레임 처리 실패: {e}");
                None
            }
        }
    }
}
