//! 라이프사이클 관리.
//!
//! 종료 신호 전파, 시그널 핸들링.

use tokio::sync::watch;
use tracing::{info, warn};

/// 라이프사이클 관리자
pub struct LifecycleManager {
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl LifecycleManager {
    /// 새 라이프사이클 관리자 생성
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            shutdown_tx: tx,
            shutdown_rx: rx,
        }
    }

    /// 종료 수신기 복제
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// 종료 신호 발송
    pub fn shutdown(&self) {
        info!("종료 신호 발송");
        let _ = self.shutdown_tx.send(true);
    }

    /// OS 시그널 대기 (SIGINT, SIGTERM) 후 종료 신호 발송
    pub async fn wait_for_signal(&self) {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            match (
                signal(SignalKind::interrupt()),
                signal(SignalKind::terminate()),
            ) {
                (Ok(mut sigint), Ok(mut sigterm)) => {
                    tokio::select! {
                        _ = sigint.recv() => {
                            info!("SIGINT 수신");
                        }
                        _ = sigterm.recv() => {
                            info!("SIGTERM 수신");
                        }
                    }
                }
                (Err(e), _) | (_, Err(e)) => {
                    warn!("시그널 핸들러 등록 실패, Ctrl+C만 대기: {e}");
                    wait_for_ctrl_c().await;
                }
            }
        }

        #[cfg(not(unix))]
        wait_for_ctrl_c().await;

        self.shutdown();
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C 수신"),
        Err(e) => {
            // 시그널로는 종료할 수 없으므로 다른 경로의 종료 신호를 기다린다
            warn!("Ctrl+C 핸들러 등록 실패: {e}");
            std::future::pending::<()>().await;
        }
    }
}
