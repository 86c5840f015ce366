//! 설정 파일 관리.
//!
//! 플랫폼별 설정 디렉토리의 JSON 파일에서 설정을 읽는다. 파일이 없으면 기본값으로 만든다.
//! 같은 디렉토리가 상태 파일(`last_text.txt`, `last_translation.txt`)의 기본 위치이기도 하다.

use crate::config::AppConfig;
use crate::error::CoreError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 설정 파일 이름
const CONFIG_FILE_NAME: &str = "config.json";

/// 앱 디렉토리 이름
const APP_DIR_NAME: &str = "vnlive";

/// 설정 파일 로더
///
/// 시작 시 한 번 읽는다. 파일이 없으면 기본 설정으로 만들어 둔다.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AppConfig,
    config_path: PathBuf,
}

impl ConfigManager {
    /// 설정 파일 열기
    ///
    /// `config_path`가 `None`이면 플랫폼별 설정 디렉토리의 `config.json`.
    pub fn open(config_path: Option<PathBuf>) -> Result<Self, CoreError> {
        let config_path = match config_path {
            Some(path) => path,
            None => Self::config_dir()?.join(CONFIG_FILE_NAME),
        };

        let config = Self::read_or_create(&config_path)?;
        config.validate()?;

        Ok(Self {
            config,
            config_path,
        })
    }

    /// 로드된 설정
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 설정 소유권 넘기기
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// 설정 파일 경로
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// 상태 파일 디렉토리
    ///
    /// `storage.state_dir`이 지정되어 있으면 그 경로, 아니면 플랫폼별 설정 디렉토리.
    pub fn state_dir(config: &AppConfig) -> Result<PathBuf, CoreError> {
        match &config.storage.state_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::config_dir(),
        }
    }

    /// 플랫폼별 설정 디렉토리 경로
    pub fn config_dir() -> Result<PathBuf, CoreError> {
        #[cfg(target_os = "macos")]
        {
            // macOS: ~/Library/Application Support/vnlive/
            let home = std::env::var("HOME")
                .map_err(|_| CoreError::Config("HOME 환경 변수를 찾을 수 없습니다".to_string()))?;
            Ok(PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR_NAME))
        }

        #[cfg(target_os = "windows")]
        {
            // Windows: %APPDATA%\vnlive\
            let appdata = std::env::var("APPDATA").map_err(|_| {
                CoreError::Config("APPDATA 환경 변수를 찾을 수 없습니다".to_string())
            })?;
            Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
        }

        #[cfg(target_os = "linux")]
        {
            // Linux: $XDG_CONFIG_HOME/vnlive/ 또는 ~/.config/vnlive/
            if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
                if !xdg.is_empty() {
                    return Ok(PathBuf::from(xdg).join(APP_DIR_NAME));
                }
            }
            let home = std::env::var("HOME")
                .map_err(|_| CoreError::Config("HOME 환경 변수를 찾을 수 없습니다".to_string()))?;
            Ok(PathBuf::from(home).join(".config").join(APP_DIR_NAME))
        }

        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            tracing::warn!("지원되지 않는 플랫폼, 현재 디렉토리 사용");
            Ok(PathBuf::from(".").join(APP_DIR_NAME))
        }
    }

    /// 설정 파일 읽기. 없으면 기본 설정을 써 두고 반환
    fn read_or_create(path: &Path) -> Result<AppConfig, CoreError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let config = serde_json::from_str(&content).map_err(|e| {
                    CoreError::Config(format!("설정 파일 파싱 실패: {}: {}", path.display(), e))
                })?;
                debug!("설정 파일 로드 완료: {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = AppConfig::default_config();
                Self::write_default(path, &config)?;
                info!("기본 설정 파일 생성: {}", path.display());
                Ok(config)
            }
            Err(e) => Err(CoreError::Config(format!(
                "설정 파일 읽기 실패: {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn write_default(path: &Path, config: &AppConfig) -> Result<(), CoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CoreError::Config(format!(
                    "설정 디렉토리 생성 실패: {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| CoreError::Config(format!("설정 직렬화 실패: {}", e)))?;
        fs::write(path, content).map_err(|e| {
            CoreError::Config(format!("설정 파일 저장 실패: {}: {}", path.display(), e))
        })
    }
}
