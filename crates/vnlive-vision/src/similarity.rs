//! 블록 매칭 기반 문자열 유사도.
//!
//! 두 문자열에서 가장 긴 공통 연속 블록을 찾고, 그 좌우 구간에서 재귀적으로
//! 다시 찾는 방식(opcode 기반 시퀀스 매칭)으로 겹치지 않고 순서를 지키는 블록을 모은다.
//! 점수는 `2 * M / T` (M = 매칭 블록 길이 합, T = 두 문자열 길이 합).
//!
//! 길이는 바이트가 아니라 `char` 단위로 센다.

use std::collections::HashMap;

/// 매칭 블록: `a[a..a+size] == b[b..b+size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchBlock {
    /// `a` 시작 위치
    pub a: usize,
    /// `b` 시작 위치
    pub b: usize,
    /// 블록 길이
    pub size: usize,
}

/// 시퀀스 매처
///
/// `b`의 문자 → 위치 목록 인덱스를 한 번 만들어 두고 블록 탐색에 재사용한다.
pub struct SequenceMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    /// 새 매처 생성
    pub fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, ch) in b.iter().enumerate() {
            b2j.entry(*ch).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// `a[alo..ahi]`, `b[blo..bhi]` 구간에서 가장 긴 공통 블록
    ///
    /// 길이가 같으면 `a`에서 가장 먼저 시작하는 블록, 그중에서도 `b`에서 가장 먼저
    /// 시작하는 블록을 고른다.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchBlock {
        let mut best = MatchBlock {
            a: alo,
            b: blo,
            size: 0,
        };
        // j2len[j] = a[..i]와 b[..=j]에서 j로 끝나는 공통 블록 길이
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = if j > 0 {
                        j2len.get(&(j - 1)).copied().unwrap_or(0)
                    } else {
                        0
                    };
                    let k = prev + 1;
                    next.insert(j, k);
                    if k > best.size {
                        best = MatchBlock {
                            a: i + 1 - k,
                            b: j + 1 - k,
                            size: k,
                        };
                    }
                }
            }
            j2len = next;
        }

        best
    }

    /// 겹치지 않고 순서를 지키는 매칭 블록 목록 (`a` 위치 순)
    pub fn matching_blocks(&self) -> Vec<MatchBlock> {
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            if alo < m.a && blo < m.b {
                pending.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                pending.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
            blocks.push(m);
        }

        blocks.sort();
        blocks
    }

    /// 매칭 문자 수 합계 (M)
    pub fn matched_len(&self) -> usize {
        self.matching_blocks().iter().map(|m| m.size).sum()
    }

    /// `2 * M / T`: 둘 다 비어 있으면 1.0
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.matched_len() as f64 / total as f64
    }
}

/// 두 문자열의 유사도 (0.0 ~ 1.0)
///
/// 인자 순서와 무관하다. 블록 탐색의 동점 처리가 방향에 따라 달라지지 않도록
/// 항상 (길이, 내용) 순으로 작은 쪽을 `a`로 놓고 계산한다.
pub fn similarity(left: &str, right: &str) -> f64 {
    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();

    let (a, b) = if (left.len(), &left) <= (right.len(), &right) {
        (&left, &right)
    } else {
        (&right, &left)
    };

    SequenceMatcher::new(a, b).ratio()
}
