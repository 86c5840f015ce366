//! # vnlive-app
//!
//! vnlive 바이너리 진입점.
//! 설정 로드, 로깅 초기화, 하위 명령 실행.

mod cli;
mod commands;
mod lifecycle;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vnlive_core::config::AppConfig;
use vnlive_core::config_manager::ConfigManager;

use crate::cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // 로그는 stderr로 (ocr 명령의 stdout 보호)
    let level = &args.log_level;
    let log_filter = format!(
        "vnlive={level},vnlive_app={level},vnlive_core={level},vnlive_vision={level},\
         vnlive_storage={level},vnlive_network={level},vnlive_web={level}"
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &args.command {
        // 순수 비교 명령은 설정 파일을 건드리지 않는다
        Command::Similar {
            text1,
            text2,
            threshold,
        } => return Ok(commands::similar(text1, text2, *threshold)),
        Command::Serve => commands::serve(&load_config(&args)?).await?,
        Command::Ocr { image } => commands::ocr(&load_config(&args)?, image).await?,
        Command::Publish { text, translation } => {
            let config = load_config(&args)?;
            commands::publish(&config, text.as_deref(), translation.as_deref()).await?
        }
        Command::Pipeline(pipeline_args) => {
            commands::pipeline(&load_config(&args)?, pipeline_args).await?
        }
        Command::Run(pipeline_args) => commands::run(&load_config(&args)?, pipeline_args).await?,
    }

    Ok(ExitCode::SUCCESS)
}

/// 설정 파일 로드 + 명령줄 옵션 적용
fn load_config(args: &Args) -> Result<AppConfig> {
    let manager = ConfigManager::open(args.config.clone())?;
    debug!("설정 파일: {}", manager.config_path().display());

    let mut config = manager.into_config();
    if let Some(dir) = &args.state_dir {
        config.storage.state_dir = Some(dir.clone());
    }
    if let Some(port) = args.port {
        config.web.port = port;
    }
    config.validate()?;

    Ok(config)
}
