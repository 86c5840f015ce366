//! 명령줄 인자 정의.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// vnlive: 화면 텍스트 라이브 인식/번역 표시
#[derive(Parser, Debug)]
#[command(name = "vnlive")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 설정 파일 경로 (기본: 플랫폼별 설정 디렉토리의 config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 상태 파일 디렉토리 (last_text.txt, last_translation.txt)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// 공개 서버 포트
    #[arg(long, short = 'p', global = true)]
    pub port: Option<u16>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// 하위 명령
#[derive(Subcommand, Debug)]
pub enum Command {
    /// 공개 서버 실행 (뷰어 페이지 + 상태 조회 API)
    Serve,

    /// 두 텍스트 비교. 비슷하면 종료 코드 0, 다르면 1
    Similar {
        /// 직전 텍스트
        #[arg(allow_hyphen_values = true)]
        text1: String,
        /// 새 텍스트
        #[arg(allow_hyphen_values = true)]
        text2: String,
        /// 유사도 임계값 (0.0 ~ 1.0, 기본: 0.85)
        #[arg(value_parser = parse_threshold)]
        threshold: Option<f64>,
    },

    /// 이미지 한 장 인식. 이어 붙인 텍스트를 표준 출력에 쓴다
    Ocr {
        /// 이미지 파일 경로
        image: PathBuf,
    },

    /// 상태 저장소에 텍스트 기록
    #[command(group(ArgGroup::new("slot").required(true).multiple(true).args(["text", "translation"])))]
    Publish {
        /// 인식 텍스트
        #[arg(long)]
        text: Option<String>,
        /// 번역 텍스트
        #[arg(long)]
        translation: Option<String>,
    },

    /// 스크린샷 파일을 감시하며 인식 → 게이트 → 게시 → 번역
    Pipeline(PipelineArgs),

    /// 파이프라인과 공개 서버를 한 프로세스에서 실행
    Run(PipelineArgs),
}

/// 파이프라인 옵션
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// 외부 캡처 도구가 덮어쓰는 스크린샷 파일
    #[arg(long)]
    pub frame: Option<PathBuf>,

    /// 번역 활성화 (설정 파일 값보다 우선)
    #[arg(long, conflicts_with = "no_translate")]
    pub translate: bool,

    /// 번역 비활성화 (설정 파일 값보다 우선)
    #[arg(long)]
    pub no_translate: bool,
}

/// 임계값 파싱 (0.0 ~ 1.0)
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("숫자가 아닙니다: {s}"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("0.0 ~ 1.0 범위여야 합니다: {value}"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn similar_with_default_threshold() {
        let args = Args::try_parse_from(["vnlive", "similar", "a", "b"]).unwrap();
        match args.command {
            Command::Similar { threshold, .. } => assert_eq!(threshold, None),
            other => panic!("예상치 못한 명령: {other:?}"),
        }
    }

    #[test]
    fn similar_accepts_texts_starting_with_hyphen() {
        let args =
            Args::try_parse_from(["vnlive", "similar", "-5度", "--ねこ--", "0.9"]).unwrap();
        match args.command {
            Command::Similar {
                text1,
                text2,
                threshold,
            } => {
                assert_eq!(text1, "-5度");
                assert_eq!(text2, "--ねこ--");
                assert_eq!(threshold, Some(0.9));
            }
            other => panic!("예상치 못한 명령: {other:?}"),
        }
    }

    #[test]
    fn similar_rejects_non_numeric_threshold() {
        let err = Args::try_parse_from(["vnlive", "similar", "a", "b", "high"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn similar_requires_two_texts() {
        let err = Args::try_parse_from(["vnlive", "similar", "a"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn publish_requires_a_slot() {
        assert!(Args::try_parse_from(["vnlive", "publish"]).is_err());
        assert!(Args::try_parse_from(["vnlive", "publish", "--translation", "hi"]).is_ok());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["vnlive", "serve", "--port", "9000", "--state-dir", "/tmp/s"])
                .unwrap();
        assert_eq!(args.port, Some(9000));
        assert_eq!(args.state_dir, Some(PathBuf::from("/tmp/s")));
    }

    #[test]
    fn threshold_range() {
        assert_eq!(parse_threshold("0.5"), Ok(0.5));
        assert!(parse_threshold("1.5").is_err());
        assert!(parse_threshold("abc").is_err());
    }
}
