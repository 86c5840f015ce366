//! 텍스트 변경 감지 게이트.
//!
//! 새로 인식한 텍스트가 직전에 받아들인 텍스트와 충분히 다른지 판단한다.
//! 상태가 없는 순수 함수이며, "직전 텍스트"를 기억하는 것은 호출자 몫이다.

use tracing::debug;

use crate::similarity::similarity;

/// 기본 유사도 임계값
pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// 게이트 판정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// 직전 텍스트와 충분히 비슷함: 재처리 생략
    Skip,
    /// 충분히 다름: 번역/게시 진행
    Process,
}

/// 판정 + 근거 점수
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateVerdict {
    /// 유사도 점수 (0.0 ~ 1.0)
    pub score: f64,
    /// 판정
    pub decision: GateDecision,
}

impl GateVerdict {
    /// 건너뛰어야 하는지
    pub fn is_skip(&self) -> bool {
        self.decision == GateDecision::Skip
    }
}

/// 점수가 임계값 이상이면 `true` (건너뜀), 미만이면 `false` (처리)
pub fn should_skip(previous: &str, candidate: &str, threshold: f64) -> bool {
    similarity(previous, candidate) >= threshold
}

/// 고정 임계값 게이트
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityGate {
    threshold: f64,
}

impl SimilarityGate {
    /// 새 게이트 생성
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// 임계값
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 직전 텍스트와 후보 텍스트 비교
    pub fn evaluate(&self, previous: &str, candidate: &str) -> GateVerdict {
        let score = similarity(previous, candidate);
        let decision = if score >= self.threshold {
            GateDecision::Skip
        } else {
            GateDecision::Process
        };

        debug!(
            score,
            threshold = self.threshold,
            ?decision,
            "게이트 판정"
        );

        GateVerdict { score, decision }
    }
}

impl Default for SimilarityGate {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
