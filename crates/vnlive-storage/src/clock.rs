//! 단조 증가 기록 시각.
//!
//! 시각은 마이크로초 단위로 다룬다. 뷰어가 받는 `timestamp`(초, 소수점 포함)가
//! 연속된 두 기록 사이에서 같아지지 않도록 직전 값보다 최소 1µs 뒤를 보장한다.

use chrono::{DateTime, Utc};

/// 직전 기록 시각(µs)보다 엄격히 뒤인 새 기록 시각(µs)
pub fn next_stamp(previous: Option<i64>) -> i64 {
    let now = Utc::now().timestamp_micros();
    match previous {
        Some(prev) if prev >= now => prev + 1,
        _ => now,
    }
}

/// µs → `DateTime<Utc>` (범위를 벗어나면 epoch)
pub fn from_micros(micros: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_micros(micros).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_stamp_is_now() {
        let before = Utc::now().timestamp_micros();
        let stamp = next_stamp(None);
        assert!(stamp >= before);
    }

    #[test]
    fn future_previous_is_bumped_by_one_micro() {
        let future = Utc::now().timestamp_micros() + 10_000_000;
        assert_eq!(next_stamp(Some(future)), future + 1);
    }

    #[test]
    fn consecutive_stamps_strictly_increase() {
        let mut prev = None;
        for _ in 0..1_000 {
            let stamp = next_stamp(prev);
            if let Some(p) = prev {
                assert!(stamp > p);
            }
            prev = Some(stamp);
        }
    }

    #[test]
    fn micros_round_trip() {
        let at = from_micros(1_700_000_000_123_456);
        assert_eq!(at.timestamp_micros(), 1_700_000_000_123_456);
    }
}
