//! 하위 명령 실행.

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

use vnlive_core::config::AppConfig;
use vnlive_core::config_manager::ConfigManager;
use vnlive_core::ports::state_store::StateStore;
use vnlive_core::ports::translator::Translator;
use vnlive_network::http_translator::HttpTranslator;
use vnlive_storage::file_store::FileStateStore;
use vnlive_vision::gate::{should_skip, SimilarityGate, DEFAULT_THRESHOLD};
use vnlive_vision::recognizer::create_recognizer;
use vnlive_web::WebServer;

use crate::cli::PipelineArgs;
use crate::lifecycle::LifecycleManager;
use crate::pipeline::{PipelineRunner, RecognitionPipeline};

/// `vnlive similar`: 비슷하면 종료 코드 0 (건너뜀), 다르면 1 (처리)
pub fn similar(text1: &str, text2: &str, threshold: Option<f64>) -> ExitCode {
    if is_similar(text1, text2, threshold) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn is_similar(text1: &str, text2: &str, threshold: Option<f64>) -> bool {
    should_skip(text1, text2, threshold.unwrap_or(DEFAULT_THRESHOLD))
}

/// `vnlive ocr`: 인식 결과를 이어 붙여 표준 출력에 쓴다
pub async fn ocr(config: &AppConfig, image: &Path) -> Result<()> {
    let bytes = tokio::fs::read(image)
        .await
        .with_context(|| format!("이미지 파일 읽기 실패: {}", image.display()))?;

    let recognizer = create_recognizer(&config.recognition)?;
    let recognized = recognizer.recognize(&bytes).await?;

    println!("{}", recognized.joined());
    Ok(())
}

/// `vnlive publish`: 상태 파일에 직접 기록
pub async fn publish(
    config: &AppConfig,
    text: Option<&str>,
    translation: Option<&str>,
) -> Result<()> {
    let store = open_file_store(config).await?;

    if let Some(text) = text {
        store.write_recognized(text).await?;
        info!("인식 텍스트 기록 완료");
    }
    if let Some(translation) = translation {
        store.write_translation(translation).await?;
        info!("번역 텍스트 기록 완료");
    }
    Ok(())
}

/// `vnlive serve`: 시그널을 받을 때까지 공개 서버 실행
pub async fn serve(config: &AppConfig) -> Result<()> {
    let store: Arc<dyn StateStore> = Arc::new(open_file_store(config).await?);
    let server = WebServer::new(store, config.web.clone());
    print_banner(&server.url());

    let lifecycle = Arc::new(LifecycleManager::new());
    let signal_task = spawn_signal_watcher(&lifecycle);

    let result = server.run(lifecycle.subscribe()).await;
    signal_task.abort();
    result.context("공개 서버 실행 실패")
}

/// `vnlive pipeline`: 시그널을 받을 때까지 인식 파이프라인 실행
pub async fn pipeline(config: &AppConfig, args: &PipelineArgs) -> Result<()> {
    let store: Arc<dyn StateStore> = Arc::new(open_file_store(config).await?);
    let runner = build_runner(config, args, store)?;

    let lifecycle = Arc::new(LifecycleManager::new());
    let signal_task = spawn_signal_watcher(&lifecycle);

    runner.run(lifecycle.subscribe()).await;
    signal_task.abort();
    Ok(())
}

/// `vnlive run`: 파이프라인과 공개 서버가 저장소 하나를 공유
pub async fn run(config: &AppConfig, args: &PipelineArgs) -> Result<()> {
    let store: Arc<dyn StateStore> = Arc::new(open_file_store(config).await?);
    let runner = build_runner(config, args, store.clone())?;
    let server = WebServer::new(store, config.web.clone());
    print_banner(&server.url());

    let lifecycle = Arc::new(LifecycleManager::new());
    let signal_task = spawn_signal_watcher(&lifecycle);

    let pipeline_task = tokio::spawn(runner.run(lifecycle.subscribe()));
    let result = server.run(lifecycle.subscribe()).await;

    // 서버가 먼저 끝났으면 (바인드 실패 등) 파이프라인도 멈춘다
    lifecycle.shutdown();
    signal_task.abort();
    if let Err(e) = pipeline_task.await {
        warn!("파이프라인 태스크 조인 실패: {e}");
    }

    result.context("공개 서버 실행 실패")
}

/// 설정의 상태 디렉토리로 파일 저장소 열기
async fn open_file_store(config: &AppConfig) -> Result<FileStateStore> {
    let dir = ConfigManager::state_dir(config)?;
    Ok(FileStateStore::new(dir).await?)
}

/// 설정 + 명령줄 옵션으로 파이프라인 러너 구성
fn build_runner(
    config: &AppConfig,
    args: &PipelineArgs,
    store: Arc<dyn StateStore>,
) -> Result<PipelineRunner> {
    let frame_path = args
        .frame
        .clone()
        .or_else(|| config.pipeline.frame_path.clone())
        .ok_or_else(|| anyhow!("프레임 파일이 지정되지 않았습니다 (--frame 또는 pipeline.frame_path)"))?;

    let recognizer = create_recognizer(&config.recognition)?;
    let gate = SimilarityGate::new(config.gate.threshold);
    let mut pipeline = RecognitionPipeline::new(recognizer, store, gate);

    let translate = if args.translate {
        true
    } else if args.no_translate {
        false
    } else {
        config.translation.enabled
    };
    if translate {
        let translator: Arc<dyn Translator> = Arc::new(HttpTranslator::new(&config.translation)?);
        info!(translator = translator.name(), "번역 활성화");
        pipeline = pipeline.with_translator(translator);
    }

    Ok(PipelineRunner::new(
        pipeline,
        frame_path,
        config.frame_poll_interval(),
    ))
}

fn spawn_signal_watcher(lifecycle: &Arc<LifecycleManager>) -> tokio::task::JoinHandle<()> {
    let lifecycle = Arc::clone(lifecycle);
    tokio::spawn(async move {
        lifecycle.wait_for_signal().await;
    })
}

/// 배너 출력
fn print_banner(url: &str) {
    println!();
    println!("vnlive 공개 서버");
    println!();
    println!("  서버 주소:   {url}");
    println!("  브라우저:    {}", url.replace("localhost", "127.0.0.1"));
    println!();
    println!("  Ctrl+C로 종료");
    println!("{}", "=".repeat(60));
}
