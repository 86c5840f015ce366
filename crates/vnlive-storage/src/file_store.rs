//! 파일 상태 저장소.
//!
//! 상태 디렉토리 아래 두 파일로 슬롯을 보관한다.
//! - `last_text.txt`: 인식 텍스트. 파일 수정 시각이 곧 `updated_at`
//! - `last_translation.txt`: 번역 텍스트
//!
//! 쓰기는 같은 디렉토리의 임시 파일에 내용을 쓰고 수정 시각을 찍은 뒤
//! rename으로 교체한다. 읽는 쪽은 이전 파일이나 새 파일 중 하나만 본다.
//! 읽을 때 앞뒤 공백은 제거한다 (외부 도구가 붙인 개행 무시).

use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use vnlive_core::error::CoreError;
use vnlive_core::models::display::RecognizedSlot;
use vnlive_core::ports::state_store::StateStore;

use crate::clock;

/// 인식 텍스트 파일 이름
pub const TEXT_FILE_NAME: &str = "last_text.txt";

/// 번역 텍스트 파일 이름
pub const TRANSLATION_FILE_NAME: &str = "last_translation.txt";

/// 파일 저장소
#[derive(Debug, Clone)]
pub struct FileStateStore {
    dir: PathBuf,
    /// 이 프로세스가 마지막으로 찍은 인식 텍스트 시각 (µs). 쓰기 직렬화 잠금 겸용
    last_stamp: Arc<Mutex<Option<i64>>>,
}

impl FileStateStore {
    /// 새 파일 저장소 생성 (디렉토리가 없으면 만든다)
    pub async fn new(dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&dir).await.map_err(|e| {
            CoreError::Storage(format!("상태 디렉토리 생성 실패: {}: {e}", dir.display()))
        })?;

        info!("상태 저장소 초기화: {}", dir.display());

        Ok(Self {
            dir,
            last_stamp: Arc::new(Mutex::new(None)),
        })
    }

    /// 상태 디렉토리
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 인식 텍스트 파일 경로
    pub fn text_path(&self) -> PathBuf {
        self.dir.join(TEXT_FILE_NAME)
    }

    /// 번역 텍스트 파일 경로
    pub fn translation_path(&self) -> PathBuf {
        self.dir.join(TRANSLATION_FILE_NAME)
    }

    /// 블로킹 파일 작업을 전용 스레드 풀에서 실행
    async fn blocking<T, F>(&self, task: F) -> Result<T, CoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Path, &Mutex<Option<i64>>) -> Result<T, CoreError> + Send + 'static,
    {
        let dir = self.dir.clone();
        let last_stamp = Arc::clone(&self.last_stamp);
        tokio::task::spawn_blocking(move || task(&dir, &last_stamp))
            .await
            .map_err(|e| CoreError::Internal(format!("태스크 실패: {e}")))?
    }
}

/// 파일 수정 시각 (µs). 파일이 없으면 None
fn modified_micros(path: &Path) -> Result<Option<i64>, CoreError> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(Some(system_time_micros(meta.modified()?))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(storage_error("상태 파일 확인 실패", path, e)),
    }
}

fn system_time_micros(at: SystemTime) -> i64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_micros()).unwrap_or(i64::MAX),
        Err(_) => 0,
    }
}

fn storage_error(context: &str, path: &Path, e: std::io::Error) -> CoreError {
    CoreError::Storage(format!("{context}: {}: {e}", path.display()))
}

/// 임시 파일에 쓰고 rename으로 교체. `stamp`가 있으면 수정 시각으로 찍는다
fn replace_file(dir: &Path, name: &str, content: &str, stamp: Option<i64>) -> Result<(), CoreError> {
    let target = dir.join(name);
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{name}."))
        .tempfile_in(dir)
        .map_err(|e| storage_error("임시 파일 생성 실패", dir, e))?;

    tmp.write_all(content.as_bytes())
        .map_err(|e| storage_error("임시 파일 쓰기 실패", tmp.path(), e))?;

    if let Some(micros) = stamp {
        let at = UNIX_EPOCH + Duration::from_micros(micros.max(0) as u64);
        tmp.as_file()
            .set_modified(at)
            .map_err(|e| storage_error("수정 시각 설정 실패", tmp.path(), e))?;
    }

    tmp.persist(&target)
        .map_err(|e| storage_error("상태 파일 교체 실패", &target, e.error))?;
    Ok(())
}

/// 파일 내용과 수정 시각을 같은 핸들에서 읽는다. 파일이 없으면 None
async fn read_slot(path: &Path) -> Result<Option<(String, SystemTime)>, CoreError> {
    let mut file = match fs::File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(storage_error("상태 파일 열기 실패", path, e)),
    };

    let modified = file
        .metadata()
        .await
        .and_then(|meta| meta.modified())
        .map_err(|e| storage_error("상태 파일 확인 실패", path, e))?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .await
        .map_err(|e| storage_error("상태 파일 읽기 실패", path, e))?;

    let text = String::from_utf8_lossy(&bytes).trim().to_string();
    Ok(Some((text, modified)))
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn write_recognized(&self, text: &str) -> Result<(), CoreError> {
        let content = text.to_string();
        let stamp = self
            .blocking(move |dir, last_stamp| {
                let mut last = last_stamp.lock();
                // 다른 프로세스가 쓴 파일이 더 최근일 수 있다
                let on_disk = modified_micros(&dir.join(TEXT_FILE_NAME))?;
                let previous = match (*last, on_disk) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
                let stamp = clock::next_stamp(previous);
                replace_file(dir, TEXT_FILE_NAME, &content, Some(stamp))?;
                *last = Some(stamp);
                Ok(stamp)
            })
            .await?;

        debug!(chars = text.chars().count(), stamp, "인식 텍스트 기록");
        Ok(())
    }

    async fn write_translation(&self, text: &str) -> Result<(), CoreError> {
        let content = text.to_string();
        self.blocking(move |dir, last_stamp| {
            let _guard = last_stamp.lock();
            replace_file(dir, TRANSLATION_FILE_NAME, &content, None)
        })
        .await?;

        debug!(chars = text.chars().count(), "번역 텍스트 기록");
        Ok(())
    }

    async fn read_recognized(&self) -> Result<RecognizedSlot, CoreError> {
        Ok(match read_slot(&self.text_path()).await? {
            Some((text, modified)) => RecognizedSlot {
                text,
                updated_at: clock::from_micros(system_time_micros(modified)),
            },
            None => RecognizedSlot::empty(),
        })
    }

    async fn read_translation(&self) -> Result<String, CoreError> {
        Ok(read_slot(&self.translation_path())
            .await?
            .map(|(text, _)| text)
            .unwrap_or_default())
    }
}
