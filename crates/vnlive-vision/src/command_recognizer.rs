//! 외부 헬퍼 프로그램 인식기.
//!
//! 이미지를 임시 파일로 쓰고 `<program> [args...] <image_path>`를 실행한다.
//! 표준 출력의 비어 있지 않은 줄 하나가 조각 하나가 된다.
//! 종료 코드가 0이 아니면 표준 에러 내용을 담아 `CoreError::Recognition`으로 보고한다.

use async_trait::async_trait;
use std::io::Write;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use vnlive_core::error::CoreError;
use vnlive_core::models::fragment::{RecognizedFragment, RecognizedText};
use vnlive_core::ports::recognizer::TextRecognizer;

use crate::decode::{decode_image, file_extension};

/// 헬퍼 실행 기본 타임아웃
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// 에러 메시지에 담을 stderr 최대 글자 수
const STDERR_EXCERPT_CHARS: usize = 300;

/// 외부 헬퍼 프로그램 기반 인식기
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    name: String,
}

impl CommandRecognizer {
    /// 명령 줄(프로그램 + 고정 인자)로 생성
    pub fn new(command: &[String]) -> Result<Self, CoreError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| CoreError::Config("헬퍼 명령이 비어 있습니다".to_string()))?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout: DEFAULT_TIMEOUT,
            name: format!("command:{program}"),
        })
    }

    /// 실행 타임아웃 설정
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 헬퍼 표준 출력 → 조각
    fn parse_stdout(stdout: &[u8]) -> RecognizedText {
        String::from_utf8_lossy(stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(RecognizedFragment::text_only)
            .collect()
    }
}

#[async_trait]
impl TextRecognizer for CommandRecognizer {
    async fn recognize(&self, image: &[u8]) -> Result<RecognizedText, CoreError> {
        decode_image(image)?;

        let mut frame = tempfile::Builder::new()
            .prefix("vnlive-frame-")
            .suffix(&format!(".{}", file_extension(image)))
            .tempfile()?;
        frame.write_all(image)?;
        frame.flush()?;

        debug!(program = %self.program, path = %frame.path().display(), "헬퍼 실행");

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(frame.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CoreError::Recognition(format!("헬퍼 실행 실패 ({}): {e}", self.program)))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                CoreError::Recognition(format!(
                    "헬퍼 응답 없음: {}ms 초과",
                    self.timeout.as_millis()
                ))
            })??;

        if !output.status.success() {
            let stderr: String = String::from_utf8_lossy(&output.stderr)
                .trim()
                .chars()
                .take(STDERR_EXCERPT_CHARS)
                .collect();
            warn!(status = %output.status, "헬퍼 비정상 종료");
            return Err(CoreError::Recognition(format!(
                "헬퍼 비정상 종료 ({}): {stderr}",
                output.status
            )));
        }

        let text = Self::parse_stdout(&output.stdout);
        debug!(fragments = text.len(), "헬퍼 인식 완료");
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
